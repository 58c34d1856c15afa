//! Error types for the project store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by [`crate::ProjectStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A project with this name is already registered.
    #[error("project '{0}' already exists")]
    AlreadyExists(String),

    /// No project with this name is registered.
    #[error("project '{0}' not found")]
    NotFound(String),

    /// A command needed the active project but none is set.
    #[error("no active project. Switch to one with 'project switch <name>'")]
    NoActiveProject,

    /// The name is empty or contains characters unsafe for a
    /// directory name.
    #[error("invalid project name '{0}': use letters, digits, '-' and '_'")]
    InvalidName(String),

    /// Reading a file or directory failed.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file or directory failed.
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted file did not contain valid JSON.
    #[error("malformed state file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
