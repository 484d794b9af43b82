//! Error types for the clone library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clone operations.
#[derive(Error, Debug)]
pub enum CloneError {
    /// Configuration file does not exist at the given path.
    #[error("{} not found. make your own copy from config.json.example as seen in the root directory, then configure it for your environment", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration file exists but could not be parsed.
    #[error("malformed config file {}: {message}", .path.display())]
    ConfigMalformed { path: PathBuf, message: String },

    /// Configuration error (missing fields, invalid combinations, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// One or both databases failed the pre-flight reachability check.
    #[error("unable to proceed (source reachable: {source_reachable}, target reachable: {target_reachable})")]
    Connectivity {
        source_reachable: bool,
        target_reachable: bool,
    },

    /// The staging directory cannot be written to.
    #[error("no write permissions for {}", .path.display())]
    StorageUnwritable { path: PathBuf },

    /// The dump tool exited nonzero or wrote diagnostics.
    #[error("dump tool failed: {output}")]
    DumpFailed { output: String },

    /// The restore tool exited nonzero or wrote diagnostics.
    #[error("restore tool failed: {output}")]
    RestoreFailed { output: String },

    /// Operator declined the confirmation gate.
    #[error("process cancelled")]
    Cancelled,

    /// Database connection or query error
    #[error("database error: {0}")]
    Database(#[from] mysql_async::Error),

    /// IO error (file operations, child processes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloneError {
    /// Whether this error is an operator cancellation rather than a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, CloneError::Cancelled)
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for clone operations.
pub type Result<T> = std::result::Result<T, CloneError>;
