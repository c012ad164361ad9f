//! Error types for the document store and repositories.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a JSON document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse document {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to serialize document {}: {}", .0.display(), .1)]
    Encode(PathBuf, #[source] serde_json::Error),

    #[error("Failed to parse bundled default document: {0}")]
    Default(#[source] serde_json::Error),
}

/// Errors returned by the quote repository.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Invalid quote ID")]
    InvalidId,

    #[error("Quote must be between 1 and 400 characters long")]
    InvalidQuote,

    #[error("Name must be between 1 and 40 characters long")]
    InvalidName,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("No quotes available")]
    EmptyCollection,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors returned by the planner repository.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Referenced record not found")]
    NotFound,

    #[error("Username is already taken")]
    UsernameTaken,

    #[error(transparent)]
    Store(#[from] StoreError),
}
