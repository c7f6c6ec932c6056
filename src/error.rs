//! Error types for swaudit operations.
//!
//! This module defines [`AuditError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Listing command failures (`CommandExecution`, `CommandOutput`,
//!   `CommandTimeout`) abort the reconciliation they belong to
//! - `CatalogLoad` aborts the load only; the previously loaded catalog stays active
//! - Use `anyhow::Error` (via `AuditError::Other`) for unexpected errors

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for swaudit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The listing command could not be spawned or exited unsuccessfully.
    #[error("Failed to run `{command}`: {message}")]
    CommandExecution { command: String, message: String },

    /// The listing command wrote to its error stream.
    #[error("`{command}` reported errors: {stderr}")]
    CommandOutput { command: String, stderr: String },

    /// The listing command did not finish within the configured timeout.
    #[error("`{command}` timed out after {timeout:?}")]
    CommandTimeout { command: String, timeout: Duration },

    /// The catalog file is unreadable or malformed.
    #[error("Failed to load catalog {path}: {message}")]
    CatalogLoad { path: PathBuf, message: String },

    /// The listing output could not be interpreted.
    #[error("Failed to parse package listing: {message}")]
    Parse { message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AuditError {
    /// Whether this error came from the listing command stage.
    pub fn is_listing_failure(&self) -> bool {
        matches!(
            self,
            AuditError::CommandExecution { .. }
                | AuditError::CommandOutput { .. }
                | AuditError::CommandTimeout { .. }
                | AuditError::Parse { .. }
        )
    }
}

/// Result type alias for swaudit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
