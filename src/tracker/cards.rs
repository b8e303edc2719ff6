//! The summary cards for total income, total expenses and balance.

use maud::{Markup, html};

use crate::{html::format_currency, transaction::Totals};

const SUMMARY_CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

const INCOME_STYLE: &str = "text-2xl font-bold text-green-600 dark:text-green-400";
const EXPENSES_STYLE: &str = "text-2xl font-bold text-red-600 dark:text-red-400";

/// Renders the three summary cards.
///
/// The balance is shown in green when it is zero or more and red otherwise.
pub(super) fn summary_cards_view(totals: &Totals) -> Markup {
    let balance_style = if totals.balance >= 0.0 {
        INCOME_STYLE
    } else {
        EXPENSES_STYLE
    };

    html! {
        section id="summary" class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-6"
        {
            (summary_card("total-income", "Total Income", totals.income, INCOME_STYLE))
            (summary_card("total-expenses", "Total Expenses", totals.expenses, EXPENSES_STYLE))
            (summary_card("balance", "Balance", totals.balance, balance_style))
        }
    }
}

fn summary_card(id: &str, title: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div id=(id) class=(SUMMARY_CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2" { (title) }
            p class=(amount_style) { (format_currency(amount)) }
        }
    }
}
