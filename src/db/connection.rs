use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::config;
use crate::error::TudooError;

use super::migrations;

/// Open the database under the data home. Returns error if not initialized.
pub fn open_db() -> Result<Connection, TudooError> {
    let path = config::db_path()?;
    if !path.exists() {
        return Err(TudooError::not_initialized());
    }
    open_at(&path)
}

/// Open an existing database file.
pub fn open_at(path: &Path) -> Result<Connection, TudooError> {
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create the data directory, database, and run migrations.
pub fn init_db() -> Result<PathBuf, TudooError> {
    let path = config::db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TudooError::gateway(e.to_string()))?;
    }
    let conn = open_at(&path)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

/// Fresh migrated in-memory database.
pub fn open_in_memory() -> Result<Connection, TudooError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), TudooError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
