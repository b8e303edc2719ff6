//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, storage::create_key_value_table, tracker::Tracker, transaction::TransactionStore,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The saved transactions and the contents of the transaction form.
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will create the key/value table if needed and load the
    /// saved transactions.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        create_key_value_table(&db_connection)?;

        let store = TransactionStore::load(db_connection);

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            tracker: Arc::new(Mutex::new(Tracker::new(store))),
        })
    }
}
