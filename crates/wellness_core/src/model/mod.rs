//! Domain model for tracked wellness data.
//!
//! # Responsibility
//! - Define the entities every other layer talks about.
//! - Own field-level validation so no layer writes an invalid row.
//!
//! # Invariants
//! - Every entity belongs to exactly one `OwnerId`.
//! - Every entity is identified by a stable `EntryId` that is never reused.
//! - `created_at` is epoch milliseconds and never changes after creation.

pub mod entry;
pub mod profile;
pub mod reminder;
mod validation;

pub use validation::EntryValidationError;

use uuid::Uuid;

/// Opaque account identifier. Resolved by the caller, never by core.
pub type OwnerId = Uuid;

/// Stable identifier of one stored entry or reminder.
pub type EntryId = Uuid;

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
