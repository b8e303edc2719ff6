//! Expense Tracker is a web app for recording income and expenses.
//!
//! This library provides a REST API that directly serves HTML pages. The
//! transactions are kept in memory and saved to a key/value slot in a SQLite
//! database after every change.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod routing;
mod storage;
mod timezone;
mod tracker;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{add_tracing_layer, init_tracing};
pub use routing::build_router;
pub use storage::{create_key_value_table as initialize_db, write_slot};
pub use transaction::{
    Category, TRANSACTIONS_SLOT, Transaction, TransactionType, new_transaction_id,
};

use crate::{
    alert::Alert,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount is not a positive number.
    ///
    /// Holds the text the user entered, or the number that was rejected.
    #[error("\"{0}\" is not a positive amount")]
    InvalidAmount(String),

    /// The category label does not name a known category.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The category cannot be used with the transaction type, e.g. a salary
    /// recorded as an expense.
    #[error("{0} is not a valid category for {1} transactions")]
    CategoryTypeMismatch(Category, TransactionType),

    /// A transaction with the same ID is already saved.
    #[error("a transaction with the ID {0} already exists")]
    DuplicateTransactionId(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that does not exist")]
    UpdateMissingTransaction,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing or deserializing JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock on the tracker.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, message, details) = match self {
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                "Invalid amount",
                format!("\"{amount}\" is not a valid amount. Enter a number greater than zero."),
            ),
            Error::InvalidCategory(category) => (
                StatusCode::BAD_REQUEST,
                "Invalid category",
                format!("\"{category}\" is not a category. Choose one from the list."),
            ),
            Error::CategoryTypeMismatch(category, transaction_type) => (
                StatusCode::BAD_REQUEST,
                "Invalid category",
                format!(
                    "{category} cannot be used for {} transactions.",
                    transaction_type.as_str()
                ),
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not update transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if it has been deleted."
                    .to_owned(),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Transaction not found",
                "Try refreshing the page to see if the transaction has been deleted.".to_owned(),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings",
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        Alert {
            message: message.to_owned(),
            details,
        }
        .into_response_with_status(status_code)
    }
}
