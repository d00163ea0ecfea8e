//! Common error types for the MadWildlife backend

use thiserror::Error;

/// Common result type for MadWildlife operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the backend
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error), retryable at the caller
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Finalize was called with no staged temp log for the user
    #[error("No staged temp log for user {user_id}")]
    MissingStage { user_id: String },

    /// Finalize referenced a category/species pair with no reference entry
    #[error("Unknown species {species_id} in category {category}")]
    UnknownSpecies {
        category: String,
        species_id: String,
    },

    /// The staged temp log was consumed or replaced by a concurrent call
    #[error("Staged temp log for user {user_id} changed during finalize")]
    StageConflict { user_id: String },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
