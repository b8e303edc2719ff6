//! The transaction form state and the add/edit state machine behind it.

use time::Date;

use crate::{
    Error,
    transaction::{
        Category, Transaction, TransactionId, TransactionStore, TransactionType,
        new_transaction_id, parse_amount,
    },
};

/// Whether the form creates a new transaction or updates an existing one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum DraftMode {
    /// Submitting the form adds a new transaction.
    #[default]
    Idle,
    /// Submitting the form replaces the transaction with this ID.
    Editing(TransactionId),
}

/// What happened when a draft was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The amount or category was missing, nothing was changed.
    Rejected,
    /// A new transaction was added with this ID.
    Inserted(TransactionId),
    /// The transaction with this ID was updated.
    Updated(TransactionId),
}

/// The unsaved contents of the transaction form.
///
/// The selected category always belongs to the selected type.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Draft {
    transaction_type: TransactionType,
    amount: String,
    category: Option<Category>,
    notes: String,
    mode: DraftMode,
}

impl Draft {
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The amount exactly as the user typed it.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The ID of the transaction being edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            DraftMode::Idle => None,
            DraftMode::Editing(id) => Some(id),
        }
    }

    /// Change the transaction type.
    ///
    /// The category is cleared if it is not valid for the new type.
    pub fn set_type(&mut self, transaction_type: TransactionType) {
        self.transaction_type = transaction_type;

        if self
            .category
            .is_some_and(|category| !category.belongs_to(transaction_type))
        {
            self.category = None;
        }
    }

    /// Select a category, or clear it if it is not valid for the current type.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category.filter(|category| category.belongs_to(self.transaction_type));
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_owned();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_owned();
    }

    /// Fill the form from `transaction` and switch to editing it.
    pub fn begin_edit(&mut self, transaction: &Transaction) {
        self.transaction_type = transaction.transaction_type;
        self.amount = transaction.amount.to_string();
        self.category = Some(transaction.category);
        self.notes = transaction.notes.clone();
        self.mode = DraftMode::Editing(transaction.id.clone());
    }

    /// Stop editing and clear the form fields.
    ///
    /// The transaction type is kept so that consecutive entries of the same
    /// type do not need it selected again.
    pub fn cancel(&mut self) {
        *self = Self {
            transaction_type: self.transaction_type,
            ..Default::default()
        };
    }

    /// Clear the form if it is editing the transaction `id`.
    ///
    /// Call this after deleting a transaction so the form does not point at a
    /// transaction that no longer exists.
    pub fn forget(&mut self, id: &str) {
        if self.editing_id() == Some(id) {
            tracing::debug!("Transaction {id} was deleted while being edited, clearing form");
            self.cancel();
        }
    }

    /// Save the draft to `store`.
    ///
    /// When idle, a new transaction dated `today` is added. When editing, the
    /// edited transaction is replaced, keeping its ID and original date. The
    /// form is cleared after a successful save.
    ///
    /// Returns [SubmitOutcome::Rejected] without changing anything if the
    /// amount or category is missing.
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount] if the amount is not a positive
    /// number, an [Error::UpdateMissingTransaction] if the edited transaction
    /// no longer exists (the form is cleared), or an error from the store.
    pub fn submit(
        &mut self,
        store: &mut TransactionStore,
        today: Date,
    ) -> Result<SubmitOutcome, Error> {
        let Some(category) = self.category else {
            return Ok(SubmitOutcome::Rejected);
        };

        let Some(amount) = parse_amount(&self.amount)? else {
            return Ok(SubmitOutcome::Rejected);
        };

        let outcome = match self.mode.clone() {
            DraftMode::Idle => {
                let transaction = Transaction {
                    id: new_transaction_id(),
                    transaction_type: self.transaction_type,
                    amount,
                    category,
                    date: today,
                    notes: self.notes.clone(),
                };
                let id = transaction.id.clone();
                store.insert(transaction)?;

                SubmitOutcome::Inserted(id)
            }
            DraftMode::Editing(id) => {
                let Some(date) = store.get(&id).map(|existing| existing.date) else {
                    tracing::error!("Could not update transaction {id}: it no longer exists");
                    self.cancel();
                    return Err(Error::UpdateMissingTransaction);
                };

                let transaction = Transaction {
                    id: id.clone(),
                    transaction_type: self.transaction_type,
                    amount,
                    category,
                    date,
                    notes: self.notes.clone(),
                };

                if !store.replace(transaction)? {
                    self.cancel();
                    return Err(Error::UpdateMissingTransaction);
                }

                SubmitOutcome::Updated(id)
            }
        };

        self.cancel();

        Ok(outcome)
    }
}
