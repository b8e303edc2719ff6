//! HTTP handlers for the tracker page and the htmx endpoints that change it.
//!
//! Every endpoint that changes the tracker responds with the re-rendered
//! `#tracker` partial. Errors are returned as alerts for `#alert-container`.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    routing::get_internal_server_error_redirect,
    timezone::local_today,
    tracker::{
        Tracker,
        page::{tracker_page, tracker_view},
    },
    transaction::{Category, Draft, SubmitOutcome, TransactionType},
};

/// The state needed to show or change the tracker.
#[derive(Debug, Clone)]
pub struct TrackerState {
    /// The saved transactions and the transaction form.
    pub tracker: Arc<Mutex<Tracker>>,
}

impl FromRef<AppState> for TrackerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
        }
    }
}

/// The state needed to submit the transaction form.
#[derive(Debug, Clone)]
pub struct SubmitTransactionState {
    /// The saved transactions and the transaction form.
    pub tracker: Arc<Mutex<Tracker>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for SubmitTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The fields of the transaction form.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DraftForm {
    /// Whether the transaction is an expense or income.
    #[serde(default)]
    pub type_: TransactionType,
    /// The amount as typed by the user.
    #[serde(default)]
    pub amount: String,
    /// The category label, missing if none was selected.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional notes.
    #[serde(default)]
    pub notes: String,
}

/// Display the expense tracker page.
pub async fn get_tracker_page(State(state): State<TrackerState>) -> Result<Response, Error> {
    let tracker = state
        .tracker
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire tracker lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(tracker_page(&tracker).into_response())
}

/// Save the transaction form, adding a new transaction or updating the one
/// being edited.
///
/// An incomplete form is left as is without an error.
pub async fn submit_transaction_endpoint(
    State(state): State<SubmitTransactionState>,
    Form(form): Form<DraftForm>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut tracker = match lock_tracker(&state.tracker) {
        Ok(tracker) => tracker,
        Err(response) => return response,
    };

    if let Err(error) = apply_form(tracker.draft_mut(), form) {
        tracing::error!("could not read transaction form: {error}");
        return error.into_alert_response();
    }

    match tracker.submit(today) {
        Ok(SubmitOutcome::Rejected) => {
            tracing::debug!("Transaction form is missing the amount or category, nothing saved")
        }
        Ok(SubmitOutcome::Inserted(id)) => tracing::info!("Added transaction {id}"),
        Ok(SubmitOutcome::Updated(id)) => tracing::info!("Updated transaction {id}"),
        Err(error) => {
            tracing::error!("could not save transaction: {error}");
            return error.into_alert_response();
        }
    }

    tracker_view(&tracker).into_response()
}

/// Load a transaction into the form for editing.
pub async fn begin_edit_endpoint(
    State(state): State<TrackerState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let mut tracker = match lock_tracker(&state.tracker) {
        Ok(tracker) => tracker,
        Err(response) => return response,
    };

    if let Err(error) = tracker.begin_edit(&transaction_id) {
        tracing::error!("could not edit transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    tracker_view(&tracker).into_response()
}

/// Delete a transaction.
///
/// Deleting a transaction that does not exist leaves everything unchanged.
pub async fn delete_transaction_endpoint(
    State(state): State<TrackerState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let mut tracker = match lock_tracker(&state.tracker) {
        Ok(tracker) => tracker,
        Err(response) => return response,
    };

    match tracker.delete(&transaction_id) {
        Ok(true) => tracing::info!("Deleted transaction {transaction_id}"),
        Ok(false) => tracing::warn!("Tried to delete missing transaction {transaction_id}"),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    tracker_view(&tracker).into_response()
}

/// Switch the form between expense and income, keeping the other fields.
pub async fn change_draft_type_endpoint(
    State(state): State<TrackerState>,
    Form(form): Form<DraftForm>,
) -> Response {
    let mut tracker = match lock_tracker(&state.tracker) {
        Ok(tracker) => tracker,
        Err(response) => return response,
    };

    if let Err(error) = apply_form(tracker.draft_mut(), form) {
        tracing::error!("could not read transaction form: {error}");
        return error.into_alert_response();
    }

    tracker_view(&tracker).into_response()
}

/// Stop editing and clear the form.
pub async fn cancel_draft_endpoint(State(state): State<TrackerState>) -> Response {
    let mut tracker = match lock_tracker(&state.tracker) {
        Ok(tracker) => tracker,
        Err(response) => return response,
    };

    tracker.draft_mut().cancel();

    tracker_view(&tracker).into_response()
}

/// Copy the submitted form fields into `draft`.
///
/// The type is set before the category so that a category from the other
/// type is dropped.
///
/// # Errors
/// Returns an [Error::InvalidCategory] if the category label is unknown, in
/// which case `draft` is not changed.
fn apply_form(draft: &mut Draft, form: DraftForm) -> Result<(), Error> {
    let category = match form.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(label) => Some(label.parse::<Category>()?),
    };

    draft.set_type(form.type_);
    draft.set_category(category);
    draft.set_amount(&form.amount);
    draft.set_notes(&form.notes);

    Ok(())
}

/// Lock the tracker, or get a response that sends the client to the error
/// page if the lock is poisoned.
fn lock_tracker(tracker: &Mutex<Tracker>) -> Result<MutexGuard<'_, Tracker>, Response> {
    tracker.lock().map_err(|error| {
        tracing::error!("could not acquire tracker lock: {error}");
        get_internal_server_error_redirect()
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{FromRef, Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        AppState, build_router, endpoints,
        endpoints::format_endpoint,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, get_input_value,
            parse_html_document, parse_html_fragment,
        },
        transaction::{Category, Transaction, TransactionType},
    };

    use super::{
        DraftForm, SubmitTransactionState, TrackerState, begin_edit_endpoint,
        cancel_draft_endpoint, change_draft_type_endpoint, delete_transaction_endpoint,
        get_tracker_page, submit_transaction_endpoint,
    };

    fn get_test_state() -> AppState {
        let connection = Connection::open_in_memory().unwrap();
        AppState::new(connection, "Etc/UTC").unwrap()
    }

    fn expense_form(amount: &str, category: &str) -> DraftForm {
        DraftForm {
            type_: TransactionType::Expense,
            amount: amount.to_owned(),
            category: Some(category.to_owned()),
            notes: String::new(),
        }
    }

    async fn submit(state: &AppState, form: DraftForm) -> Html {
        let response = submit_transaction_endpoint(
            State(SubmitTransactionState::from_ref(state)),
            Form(form),
        )
        .await;

        assert_status_ok(&response);
        parse_html_fragment(response).await
    }

    fn transactions(state: &AppState) -> Vec<Transaction> {
        state
            .tracker
            .lock()
            .unwrap()
            .store()
            .transactions()
            .to_vec()
    }

    #[track_caller]
    fn card_text(html: &Html, id: &str) -> String {
        html.select(&Selector::parse(&format!("#{id} p")).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No card found for #{id}"))
            .text()
            .collect()
    }

    #[track_caller]
    fn row_count(html: &Html) -> usize {
        html.select(&Selector::parse("#transaction-list li").unwrap())
            .count()
    }

    #[tokio::test]
    async fn page_shows_empty_tracker() {
        let state = get_test_state();

        let response = get_tracker_page(State(TrackerState::from_ref(&state)))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(card_text(&html, "total-income"), "₹0.00");
        assert_eq!(card_text(&html, "total-expenses"), "₹0.00");
        assert_eq!(card_text(&html, "balance"), "₹0.00");
        assert!(
            html.select(&Selector::parse("#no-transactions").unwrap())
                .next()
                .is_some(),
            "want empty state"
        );
        assert!(
            html.select(&Selector::parse("#category-chart").unwrap())
                .next()
                .is_none(),
            "want no chart without expenses"
        );
    }

    #[tokio::test]
    async fn submit_adds_expense() {
        let state = get_test_state();

        let html = submit(&state, expense_form("500", "Food")).await;

        assert_valid_html(&html);
        assert_eq!(card_text(&html, "total-expenses"), "₹500.00");
        assert_eq!(card_text(&html, "balance"), "-₹500.00");
        assert_eq!(row_count(&html), 1);
        assert!(
            html.select(&Selector::parse("#category-chart").unwrap())
                .next()
                .is_some(),
            "want chart once there are expenses"
        );

        let saved = transactions(&state);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].amount, 500.0);
        assert_eq!(saved[0].category, Category::Food);
    }

    #[tokio::test]
    async fn submit_calculates_balance() {
        let state = get_test_state();

        submit(
            &state,
            DraftForm {
                type_: TransactionType::Income,
                amount: "2000".to_owned(),
                category: Some("Salary".to_owned()),
                notes: String::new(),
            },
        )
        .await;
        let html = submit(&state, expense_form("300", "Travel")).await;

        assert_eq!(card_text(&html, "total-income"), "₹2,000.00");
        assert_eq!(card_text(&html, "total-expenses"), "₹300.00");
        assert_eq!(card_text(&html, "balance"), "₹1,700.00");
        assert_eq!(row_count(&html), 2);
    }

    #[tokio::test]
    async fn incomplete_form_is_ignored() {
        let state = get_test_state();

        let html = submit(
            &state,
            DraftForm {
                type_: TransactionType::Expense,
                amount: "250".to_owned(),
                category: None,
                notes: "no category".to_owned(),
            },
        )
        .await;

        assert!(transactions(&state).is_empty());
        assert_eq!(get_input_value(&html, "amount").as_deref(), Some("250"));
    }

    #[tokio::test]
    async fn invalid_amount_is_bad_request() {
        let state = get_test_state();

        let response = submit_transaction_endpoint(
            State(SubmitTransactionState::from_ref(&state)),
            Form(expense_form("-5", "Food")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(transactions(&state).is_empty());
    }

    #[tokio::test]
    async fn unknown_category_is_bad_request() {
        let state = get_test_state();

        let response = submit_transaction_endpoint(
            State(SubmitTransactionState::from_ref(&state)),
            Form(expense_form("5", "Rent")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(transactions(&state).is_empty());
    }

    #[tokio::test]
    async fn invalid_timezone_is_server_error() {
        let mut state = get_test_state();
        state.local_timezone = "Not/A_Timezone".to_owned();

        let response = submit_transaction_endpoint(
            State(SubmitTransactionState::from_ref(&state)),
            Form(expense_form("5", "Food")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(transactions(&state).is_empty());
    }

    #[tokio::test]
    async fn edit_then_submit_updates_transaction() {
        let state = get_test_state();
        submit(&state, expense_form("100", "Food")).await;
        let original = transactions(&state).remove(0);

        let response = begin_edit_endpoint(
            State(TrackerState::from_ref(&state)),
            Path(original.id.clone()),
        )
        .await;
        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert!(html.html().contains("Update Transaction"));

        let html = submit(&state, expense_form("150", "Food")).await;

        let saved = transactions(&state);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, original.id);
        assert_eq!(saved[0].date, original.date);
        assert_eq!(saved[0].amount, 150.0);
        assert_eq!(card_text(&html, "total-expenses"), "₹150.00");
        assert!(html.html().contains("Add Transaction"));
        assert!(!html.html().contains("Cancel Edit"));
    }

    #[tokio::test]
    async fn edit_unknown_transaction_is_not_found() {
        let state = get_test_state();

        let response = begin_edit_endpoint(
            State(TrackerState::from_ref(&state)),
            Path("missing".to_owned()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_transaction() {
        let state = get_test_state();
        submit(&state, expense_form("100", "Food")).await;
        let id = transactions(&state).remove(0).id;

        let response =
            delete_transaction_endpoint(State(TrackerState::from_ref(&state)), Path(id)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert!(transactions(&state).is_empty());
        assert_eq!(row_count(&html), 0);
        assert_eq!(card_text(&html, "total-expenses"), "₹0.00");
    }

    #[tokio::test]
    async fn delete_unknown_transaction_changes_nothing() {
        let state = get_test_state();
        submit(&state, expense_form("100", "Food")).await;

        let response = delete_transaction_endpoint(
            State(TrackerState::from_ref(&state)),
            Path("missing".to_owned()),
        )
        .await;

        assert_status_ok(&response);
        assert_eq!(transactions(&state).len(), 1);
    }

    #[tokio::test]
    async fn changing_type_drops_category_of_other_type() {
        let state = get_test_state();

        let response = change_draft_type_endpoint(
            State(TrackerState::from_ref(&state)),
            Form(DraftForm {
                type_: TransactionType::Income,
                amount: "42".to_owned(),
                category: Some("Food".to_owned()),
                notes: "kept".to_owned(),
            }),
        )
        .await;

        assert_status_ok(&response);
        let tracker = state.tracker.lock().unwrap();
        assert_eq!(tracker.draft().transaction_type(), TransactionType::Income);
        assert_eq!(tracker.draft().category(), None);
        assert_eq!(tracker.draft().amount(), "42");
        assert_eq!(tracker.draft().notes(), "kept");
    }

    #[tokio::test]
    async fn changing_type_keeps_shared_category() {
        let state = get_test_state();

        change_draft_type_endpoint(
            State(TrackerState::from_ref(&state)),
            Form(DraftForm {
                type_: TransactionType::Income,
                amount: String::new(),
                category: Some("Other".to_owned()),
                notes: String::new(),
            }),
        )
        .await;

        let tracker = state.tracker.lock().unwrap();
        assert_eq!(tracker.draft().category(), Some(Category::Other));
    }

    #[tokio::test]
    async fn cancel_stops_editing() {
        let state = get_test_state();
        submit(&state, expense_form("100", "Food")).await;
        let id = transactions(&state).remove(0).id;
        begin_edit_endpoint(State(TrackerState::from_ref(&state)), Path(id)).await;

        let response = cancel_draft_endpoint(State(TrackerState::from_ref(&state))).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert!(html.html().contains("Add Transaction"));
        assert!(!html.html().contains("Cancel Edit"));
        assert_eq!(state.tracker.lock().unwrap().draft().editing_id(), None);
    }

    #[tokio::test]
    async fn full_flow_through_router() {
        let server =
            TestServer::try_new(build_router(get_test_state())).expect("Could not create test server.");

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&expense_form("500", "Food"))
            .await
            .assert_status_ok();

        let page = server.get(endpoints::ROOT).await;
        page.assert_status_ok();
        let html = Html::parse_document(&page.text());
        let row = html
            .select(&Selector::parse("#transaction-list li").unwrap())
            .next()
            .expect("No transaction row found");
        let id = row
            .value()
            .attr("data-transaction-id")
            .expect("Row has no transaction ID")
            .to_owned();

        let response = server
            .delete(&format_endpoint(endpoints::DELETE_TRANSACTION, &id))
            .await;
        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        assert_eq!(row_count(&html), 0);
    }

    #[tokio::test]
    async fn page_response_is_html() {
        let state = get_test_state();

        let response = get_tracker_page(State(TrackerState::from_ref(&state)))
            .await
            .into_response();

        assert_content_type(&response, "text/html; charset=utf-8");
    }
}
