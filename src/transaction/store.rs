//! The in-memory transaction collection and its persistence to the key/value slot.

use rusqlite::Connection;

use crate::{
    Error,
    storage::{read_slot, write_slot},
    transaction::Transaction,
};

/// The name of the key/value slot that holds the serialized transactions.
pub const TRANSACTIONS_SLOT: &str = "transactions";

/// The ordered collection of transactions.
///
/// Every mutation writes the whole collection to the [TRANSACTIONS_SLOT] slot
/// before the in-memory copy is updated, so the two never diverge.
#[derive(Debug)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    connection: Connection,
}

impl TransactionStore {
    /// Load the transactions saved in the slot.
    ///
    /// The store starts empty if the slot is missing, cannot be read, or does
    /// not hold a valid list of transactions. The slot itself is left untouched
    /// until the next mutation.
    pub fn load(connection: Connection) -> Self {
        let transactions = match read_slot(TRANSACTIONS_SLOT, &connection) {
            Ok(Some(json)) => parse_transactions(&json).unwrap_or_else(|error| {
                tracing::warn!("Discarding saved transactions, could not parse slot: {error}");
                Vec::new()
            }),
            Ok(None) => {
                tracing::info!("No saved transactions found, starting with an empty list");
                Vec::new()
            }
            Err(error) => {
                tracing::warn!("Could not read saved transactions: {error}");
                Vec::new()
            }
        };

        tracing::info!("Loaded {} transactions", transactions.len());

        Self {
            transactions,
            connection,
        }
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get the transaction with `id`.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// Append a new transaction.
    ///
    /// # Errors
    /// Returns an [Error::DuplicateTransactionId] if the ID is already used, an
    /// error from [Transaction::validate] if the transaction is invalid, or an
    /// error if the collection could not be saved.
    pub fn insert(&mut self, transaction: Transaction) -> Result<(), Error> {
        transaction.validate()?;

        if self.get(&transaction.id).is_some() {
            return Err(Error::DuplicateTransactionId(transaction.id));
        }

        let mut next = self.transactions.clone();
        next.push(transaction);
        self.commit(next)
    }

    /// Replace the transaction that has the same ID as `transaction`, keeping
    /// its position in the collection.
    ///
    /// Returns `false` without saving if no transaction has that ID.
    ///
    /// # Errors
    /// Returns an error from [Transaction::validate] if the transaction is
    /// invalid, or an error if the collection could not be saved.
    pub fn replace(&mut self, transaction: Transaction) -> Result<bool, Error> {
        transaction.validate()?;

        let Some(index) = self.position(&transaction.id) else {
            return Ok(false);
        };

        let mut next = self.transactions.clone();
        next[index] = transaction;
        self.commit(next)?;

        Ok(true)
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns `false` without saving if no transaction has that ID.
    ///
    /// # Errors
    /// Returns an error if the collection could not be saved.
    pub fn remove(&mut self, id: &str) -> Result<bool, Error> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.transactions.clone();
        next.remove(index);
        self.commit(next)?;

        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.transactions
            .iter()
            .position(|transaction| transaction.id == id)
    }

    fn commit(&mut self, next: Vec<Transaction>) -> Result<(), Error> {
        let json = serde_json::to_string(&next)?;

        write_slot(TRANSACTIONS_SLOT, &json, &self.connection).inspect_err(|error| {
            tracing::error!("Could not save transactions: {error}");
        })?;

        self.transactions = next;

        Ok(())
    }
}

/// Parse and validate a serialized list of transactions.
fn parse_transactions(json: &str) -> Result<Vec<Transaction>, Error> {
    let transactions: Vec<Transaction> = serde_json::from_str(json)?;

    for (index, transaction) in transactions.iter().enumerate() {
        transaction.validate()?;

        if transactions[..index]
            .iter()
            .any(|other| other.id == transaction.id)
        {
            return Err(Error::DuplicateTransactionId(transaction.id.clone()));
        }
    }

    Ok(transactions)
}
