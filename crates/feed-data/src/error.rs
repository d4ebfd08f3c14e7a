//! Error types for the feed-data crate.
//!
//! Snapshot loading is the only fallible surface in this crate; once a
//! snapshot is materialized every query on it is total.

use thiserror::Error;

/// Errors that can occur while loading and indexing a feed snapshot.
#[derive(Error, Debug)]
pub enum FeedDataError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a snapshot file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A snapshot file was not valid JSON for the expected collection shape
    #[error("JSON error in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Referenced entity doesn't exist (e.g. post by an unknown author)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, FeedDataError>;
