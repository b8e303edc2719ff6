//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its type-dependent categories
//! - The `TransactionStore` that keeps the list saved in the key/value slot
//! - The totals and category breakdown derived from the list
//! - The `Draft` form state used to add and edit transactions

mod core;
mod draft;
mod store;
mod summary;

pub use core::{
    Category, EXPENSE_CATEGORIES, Transaction, TransactionId, TransactionType, new_transaction_id,
    parse_amount,
};
pub use draft::{Draft, SubmitOutcome};
pub use store::{TRANSACTIONS_SLOT, TransactionStore};
pub use summary::{CategoryTotal, Totals, calculate_totals, category_breakdown, newest_first};
