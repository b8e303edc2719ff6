//! Tracker module
//!
//! The single page of the app: summary cards, the transaction form, the
//! expense categories chart and the transaction list.

mod cards;
mod chart;
mod core;
mod form;
mod handlers;
mod list;
mod page;

pub use core::Tracker;
pub use handlers::{
    begin_edit_endpoint, cancel_draft_endpoint, change_draft_type_endpoint,
    delete_transaction_endpoint, get_tracker_page, submit_transaction_endpoint,
};
