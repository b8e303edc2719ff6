//! Totals and per-category aggregation derived from the transaction list.
//!
//! Everything here is recomputed from the full list on each render.

use crate::transaction::{Category, EXPENSE_CATEGORIES, Transaction, TransactionType};

/// The income, expense and balance figures for a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of all income amounts.
    pub income: f64,
    /// Sum of all expense amounts.
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// The amount spent in one expense category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Sum the amounts of the transactions of `transaction_type`.
pub fn total_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
        .map(|transaction| transaction.amount)
        .sum()
}

/// Calculate the income, expense and balance totals.
pub fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let income = total_by_type(transactions, TransactionType::Income);
    let expenses = total_by_type(transactions, TransactionType::Expense);

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Sum expenses per category.
///
/// Categories follow the order of [EXPENSE_CATEGORIES] and categories with
/// nothing spent are left out.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    EXPENSE_CATEGORIES
        .iter()
        .map(|&category| CategoryTotal {
            category,
            total: transactions
                .iter()
                .filter(|transaction| {
                    transaction.transaction_type == TransactionType::Expense
                        && transaction.category == category
                })
                .map(|transaction| transaction.amount)
                .sum(),
        })
        .filter(|category_total| category_total.total > 0.0)
        .collect()
}

/// Get the transactions ordered from the most recent date to the oldest.
///
/// Transactions on the same date keep their relative order.
pub fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<_> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
