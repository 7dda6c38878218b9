//! Typed query operations over the workspace databases. All SQL lives here;
//! the IPC handlers only coerce params and map errors onto the envelope.

pub mod gradebook;
pub mod registry;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected user input. Recovered at the presentation boundary; nothing
    /// was written when this is returned.
    #[error("{0}")]
    Invalid(String),
    #[error("SQLite error: {0}")]
    Db(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Required free-text field: trimmed, must be non-empty.
pub(crate) fn require_text(value: &str, field: &str) -> StoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Invalid(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
