//! The form for adding a transaction or editing an existing one.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::{Draft, TransactionType},
};

const TRANSACTION_TYPES: [TransactionType; 2] = [TransactionType::Expense, TransactionType::Income];

/// Renders the transaction form filled with the contents of `draft`.
///
/// Changing the type posts the form to the draft endpoint so that the
/// category options are re-rendered for the new type.
pub(super) fn transaction_form_view(draft: &Draft) -> Markup {
    let is_editing = draft.editing_id().is_some();
    let (title, subtitle, submit_text) = if is_editing {
        (
            "Edit Transaction",
            "Update your transaction details",
            "Update Transaction",
        )
    } else {
        (
            "Add Transaction",
            "Add a new income or expense",
            "Add Transaction",
        )
    };
    let selected_type = draft.transaction_type();
    let selected_category = draft.category();

    html! {
        section class={ (CARD_STYLE) " mb-6" }
        {
            h2 class="text-xl font-semibold" { (title) }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4" { (subtitle) }

            form
                id="transaction-form"
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target="#tracker"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    div
                    {
                        label for="type_" class=(FORM_LABEL_STYLE) { "Type" }

                        select
                            name="type_"
                            id="type_"
                            hx-post=(endpoints::DRAFT_TYPE)
                            hx-trigger="change"
                            hx-include="closest form"
                            hx-target="#tracker"
                            hx-swap="outerHTML"
                            hx-target-error="#alert-container"
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @for transaction_type in TRANSACTION_TYPES {
                                option
                                    value=(transaction_type.as_str())
                                    selected[transaction_type == selected_type]
                                {
                                    (transaction_type)
                                }
                            }
                        }
                    }

                    div
                    {
                        label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                        div class="input-wrapper w-full"
                        {
                            input
                                name="amount"
                                id="amount"
                                type="number"
                                step="0.01"
                                placeholder="0.00"
                                value=(draft.amount())
                                required
                                class=(FORM_TEXT_INPUT_STYLE);
                        }
                    }
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" disabled selected[selected_category.is_none()]
                        {
                            "Select category"
                        }

                        @for &category in selected_type.categories() {
                            option
                                value=(category.label())
                                selected[selected_category == Some(category)]
                            {
                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label for="notes" class=(FORM_LABEL_STYLE) { "Notes (Optional)" }

                    textarea
                        name="notes"
                        id="notes"
                        rows="3"
                        placeholder="Add any notes about this transaction"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        (draft.notes())
                    }
                }

                div class="flex flex-col md:flex-row gap-2"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }

                    @if is_editing {
                        button
                            type="button"
                            hx-post=(endpoints::CANCEL_DRAFT)
                            hx-target="#tracker"
                            hx-swap="outerHTML"
                            hx-target-error="#alert-container"
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Cancel Edit"
                        }
                    }
                }
            }
        }
    }
}
