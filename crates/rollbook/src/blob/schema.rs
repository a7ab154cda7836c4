//! `SQLite` schema for the blob store.
//!
//! The database holds a single `blobs` table. Its layout version is stamped in
//! `PRAGMA user_version`; a database stamped with a later version is refused
//! rather than written in a layout it may not expect.

use rusqlite::Connection;

use crate::error::{Error, Result};

/// Schema version created and read by this build.
pub const SCHEMA_VERSION: i64 = 1;

/// SQL statement to create the blobs table.
pub const CREATE_BLOBS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS blobs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// Create the schema on a fresh database, or check an existing one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchema`] if the database carries a newer
/// version stamp, or a query error if the statements fail.
pub fn initialize(conn: &Connection) -> Result<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(Error::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    conn.execute(CREATE_BLOBS_TABLE, [])?;
    if found < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }
    Ok(())
}

/// Read the version stamp; a fresh database reports 0.
///
/// # Errors
///
/// Returns an error if the pragma cannot be queried.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
