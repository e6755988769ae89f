//! Database connection management
//!
//! Provides utilities for opening and preparing SQLite connections

use crate::errors::{from_rusqlite, io_error, store_unavailable, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Open a SQLite database at the given path, creating parent directories
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("db_open", e))?;
    }
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Open an existing database file read-only.
///
/// Never creates the file or its parent directory.
///
/// # Errors
///
/// - `StoreUnavailable` if the file is missing or SQLite cannot open it
pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(store_unavailable(
            "db_open",
            format!("no store at {}", path.display()),
        ));
    }
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| store_unavailable("db_open", format!("{}: {}", path.display(), e)))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a file-backed connection
pub fn configure(conn: &Connection) -> Result<()> {
    // journal_mode returns a row, so batch execution is required.
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")
        .map_err(from_rusqlite)
}
