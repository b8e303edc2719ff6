//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the opaque string used to identify a transaction.
pub type TransactionId = String;

/// Create a fresh, random transaction ID.
pub fn new_transaction_id() -> TransactionId {
    Uuid::new_v4().to_string()
}

/// Whether money was spent or earned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was spent.
    #[default]
    Expense,
    /// Money that was earned.
    Income,
}

impl TransactionType {
    /// The categories a transaction of this type may use, in display order.
    pub fn categories(self) -> &'static [Category] {
        match self {
            TransactionType::Expense => &EXPENSE_CATEGORIES,
            TransactionType::Income => &INCOME_CATEGORIES,
        }
    }

    /// The value used for this type in forms and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "Expense"),
            TransactionType::Income => write!(f, "Income"),
        }
    }
}

/// A label describing what a transaction was for.
///
/// Which labels are valid depends on the [TransactionType], see
/// [TransactionType::categories]. [Category::Other] is valid for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries and eating out.
    Food,
    Travel,
    /// Rent, utilities and other recurring bills.
    Bills,
    Shopping,
    Entertainment,
    Healthcare,
    /// Income from employment.
    Salary,
    Gifts,
    Freelance,
    Investment,
    /// Anything else, valid for both expenses and income.
    Other,
}

/// Expense categories in the order they are displayed and aggregated.
pub const EXPENSE_CATEGORIES: [Category; 7] = [
    Category::Food,
    Category::Travel,
    Category::Bills,
    Category::Shopping,
    Category::Entertainment,
    Category::Healthcare,
    Category::Other,
];

/// Income categories in the order they are displayed.
pub const INCOME_CATEGORIES: [Category; 5] = [
    Category::Salary,
    Category::Gifts,
    Category::Freelance,
    Category::Investment,
    Category::Other,
];

impl Category {
    /// The display label, which is also the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Salary => "Salary",
            Category::Gifts => "Gifts",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }

    /// Whether this category may be used by transactions of `transaction_type`.
    pub fn belongs_to(self, transaction_type: TransactionType) -> bool {
        transaction_type.categories().contains(&self)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EXPENSE_CATEGORIES
            .iter()
            .chain(INCOME_CATEGORIES.iter())
            .find(|category| category.label() == s)
            .copied()
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, stable across edits.
    pub id: TransactionId,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// What the money was spent on or earned from.
    pub category: Category,
    /// The day the transaction was recorded.
    pub date: Date,
    /// Free text about the transaction, empty if there are no notes.
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    /// The notes, if any were written.
    pub fn notes(&self) -> Option<&str> {
        let notes = self.notes.trim();

        if notes.is_empty() { None } else { Some(notes) }
    }

    /// Check the invariants every stored transaction must hold.
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount] if the amount is not a positive, finite
    /// number, or an [Error::CategoryTypeMismatch] if the category is not valid
    /// for the transaction type.
    pub fn validate(&self) -> Result<(), Error> {
        validate_amount(self.amount)?;

        if !self.category.belongs_to(self.transaction_type) {
            return Err(Error::CategoryTypeMismatch(
                self.category,
                self.transaction_type,
            ));
        }

        Ok(())
    }
}

/// Check that `amount` is a positive, finite number.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount.to_string()))
    }
}

/// Parse user-entered amount text.
///
/// Blank text yields `Ok(None)` so that callers can treat a missing amount
/// separately from a malformed one.
///
/// # Errors
/// Returns an [Error::InvalidAmount] if the text is not a number or is not
/// positive and finite.
pub fn parse_amount(text: &str) -> Result<Option<f64>, Error> {
    let text = text.trim();

    if text.is_empty() {
        return Ok(None);
    }

    let amount = text
        .parse::<f64>()
        .map_err(|_| Error::InvalidAmount(text.to_owned()))?;

    validate_amount(amount)
        .map(Some)
        .map_err(|_| Error::InvalidAmount(text.to_owned()))
}
