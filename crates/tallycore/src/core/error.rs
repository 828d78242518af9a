use thiserror::Error;

use crate::conversation::{Event, Slot, StateTag};
use crate::storage::UserIdentity;

/// Centralized error types for the application
///
/// Flows return these to the assistant, which decides per variant whether
/// the user sees a notice, whether the conversation is reset, or both.
///
/// # Example
///
/// ```no_run
/// use tallycore::core::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[source] anyhow::Error),

    /// A ledger already exists for this user
    #[error("User {0} is already registered")]
    DuplicateIdentity(UserIdentity),

    /// No ledger exists for this user
    #[error("User {0} is not registered")]
    NotFound(UserIdentity),

    /// Stored row exists but lacks a category or total
    #[error("Ledger of user {0} is malformed")]
    MalformedRecord(UserIdentity),

    /// Expense input that does not parse as a finite number
    #[error("Not a valid number: {0:?}")]
    InvalidNumber(String),

    /// Registration reached its last step without an earlier label
    #[error("Conversation scratch has no {0} category")]
    IncompleteScratch(Slot),

    /// The transition table has no entry for this pair
    #[error("No transition from {from:?} on {event:?}")]
    InvalidTransition { from: StateTag, event: Event },

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate table without the expected currencies
    #[error("Malformed exchange rate data: {0}")]
    MalformedRates(String),
}

impl AppError {
    /// Durable store could not be reached or refused the statement.
    ///
    /// The in-flight step must be retried as-is; conversation state is left untouched.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::DatabasePool(_))
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_unavailable_classification() {
        let err = AppError::Database(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.is_store_unavailable());

        assert!(!AppError::NotFound(UserIdentity(1)).is_store_unavailable());
        assert!(!AppError::InvalidNumber("abc".into()).is_store_unavailable());
    }

    #[test]
    fn test_error_messages_name_the_user() {
        assert_eq!(
            AppError::DuplicateIdentity(UserIdentity(42)).to_string(),
            "User 42 is already registered"
        );
        assert_eq!(AppError::NotFound(UserIdentity(7)).to_string(), "User 7 is not registered");
    }
}
