//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define owner-scoped data access contracts for entries and profiles.
//! - Isolate SQLite query details from services and views.
//!
//! # Invariants
//! - Repository writes enforce model `validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod entry_repo;
pub mod profile_repo;

use entry_repo::{RepoError, RepoResult};
use rusqlite::Connection;

const REQUIRED_TABLES: [&str; 7] = [
    "goal_profiles",
    "diet_entries",
    "weight_entries",
    "water_entries",
    "exercise_entries",
    "mood_entries",
    "reminders",
];

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
