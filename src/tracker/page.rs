//! The expense tracker page and the partial that htmx swaps after each change.

use maud::{Markup, html};

use crate::{
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, currency_input_styles},
    tracker::{
        Tracker, cards::summary_cards_view, chart::category_chart_view, form::transaction_form_view,
        list::transaction_list_view,
    },
    transaction::{calculate_totals, category_breakdown, newest_first},
};

/// Renders the full page.
pub(super) fn tracker_page(tracker: &Tracker) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="mb-8 text-center"
            {
                h1 class="text-3xl font-bold" { "Expense Tracker" }
                p class="text-gray-600 dark:text-gray-400" { "Track your income and expenses" }
            }

            (tracker_view(tracker))
        }
    };

    let head_elements = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        currency_input_styles(),
    ];

    base("Expense Tracker", &head_elements, &content)
}

/// Renders everything below the page header.
///
/// Totals and the category breakdown are recalculated from the saved
/// transactions on every call.
pub(super) fn tracker_view(tracker: &Tracker) -> Markup {
    let transactions = tracker.store().transactions();
    let totals = calculate_totals(transactions);
    let breakdown = category_breakdown(transactions);
    let sorted = newest_first(transactions);

    html! {
        div id="tracker"
        {
            (summary_cards_view(&totals))
            (transaction_form_view(tracker.draft()))

            @if let Some(chart) = category_chart_view(&breakdown) {
                (chart)
            }

            (transaction_list_view(&sorted))
        }
    }
}
