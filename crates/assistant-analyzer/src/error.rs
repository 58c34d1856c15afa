//! Error types for the analyzer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by project and file analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The requested file does not exist inside the project.
    #[error("file not found in project: {0}")]
    FileNotFound(PathBuf),

    /// The requested path escapes the project directory.
    #[error("path is outside the project directory: {0}")]
    OutsideProject(PathBuf),

    /// The file exists but cannot be decoded as text.
    #[error("file is not text and cannot be analyzed: {0}")]
    UnsupportedFile(PathBuf),

    /// Reading the tree failed.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
