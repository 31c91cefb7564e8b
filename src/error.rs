//! Error types for Onsave
//!
//! Uses `thiserror` for library errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Onsave operations
pub type OnsaveResult<T> = Result<T, OnsaveError>;

/// Main error type for Onsave operations
#[derive(Error, Debug)]
pub enum OnsaveError {
    /// Target path has no file name component
    #[error("target '{path}' has no file name")]
    InvalidTarget { path: PathBuf },

    /// Directory containing the target does not exist
    #[error("cannot watch '{path}': directory does not exist")]
    WatchRootMissing { path: PathBuf },

    /// Command string contained no tokens
    #[error("command is empty - nothing to run on save")]
    EmptyCommand,

    /// Invalid config file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem notification error
    #[error("watch error: {0}")]
    Notify(#[from] notify::Error),
}
