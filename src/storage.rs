//! A string-keyed slot store backed by a single SQLite table.
//!
//! Each key holds one text value that is overwritten in full on every write.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Create the key/value table if it does not already exist.
///
/// # Errors
/// Returns an [Error::SqlError] if the table could not be created.
pub fn create_key_value_table(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )",
        (),
    )?;

    Ok(())
}

/// Read the value stored under `key`, or `None` if the slot is empty.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn read_slot(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .query_row(
            "SELECT value FROM key_value WHERE key = :key",
            &[(":key", key)],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::from)
}

/// Overwrite the value stored under `key`.
///
/// # Errors
/// Returns an [Error::SqlError] if the write fails.
pub fn write_slot(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO key_value (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}
