//! The list of saved transactions with buttons to edit or delete each one.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, BUTTON_SMALL_STYLE, CARD_STYLE, format_currency, format_date},
    transaction::{Transaction, TransactionType},
};

/// Notes longer than this many characters are cut short in the list.
const MAX_NOTES_GRAPHEMES: usize = 120;

/// Renders the transaction list card.
///
/// `transactions` should already be sorted in display order.
pub(super) fn transaction_list_view(transactions: &[&Transaction]) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold" { "Transactions" }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4"
            {
                "Your recent income and expenses"
            }

            @if transactions.is_empty() {
                p id="no-transactions" class="text-center py-8 text-gray-500 dark:text-gray-400"
                {
                    "No transactions yet. Add your first transaction above."
                }
            } @else {
                ul id="transaction-list" class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.transaction_type {
        TransactionType::Expense => ("➖ ", "font-semibold text-red-600 dark:text-red-400"),
        TransactionType::Income => ("➕ ", "font-semibold text-green-600 dark:text-green-400"),
    };
    let edit_endpoint = format_endpoint(endpoints::EDIT_TRANSACTION, &transaction.id);
    let delete_endpoint = format_endpoint(endpoints::DELETE_TRANSACTION, &transaction.id);

    html! {
        li
            data-transaction-id=(transaction.id)
            class="flex justify-between items-start gap-4 py-3"
        {
            div class="min-w-0"
            {
                p class=(amount_style)
                {
                    (sign) (format_currency(transaction.amount))
                }
                p class="text-sm text-gray-600 dark:text-gray-400"
                {
                    (transaction.category) " • " (format_date(transaction.date))
                }
                @if let Some(notes) = transaction.notes() {
                    p class="text-sm text-gray-500 dark:text-gray-400 break-words" title=(notes)
                    {
                        (truncate_notes(notes))
                    }
                }
            }

            div class="flex gap-2 shrink-0"
            {
                button
                    type="button"
                    hx-post=(edit_endpoint)
                    hx-target="#tracker"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_SMALL_STYLE)
                {
                    "Edit"
                }

                button
                    type="button"
                    hx-delete=(delete_endpoint)
                    hx-target="#tracker"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

/// Shorten `notes` to [MAX_NOTES_GRAPHEMES] user-perceived characters.
fn truncate_notes(notes: &str) -> String {
    let mut graphemes = notes.graphemes(true);
    let truncated: String = graphemes.by_ref().take(MAX_NOTES_GRAPHEMES).collect();

    if graphemes.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}
