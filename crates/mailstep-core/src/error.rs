//! Error types for the core module
//!
//! Only failures that abort the whole run live here. Per-action problems
//! are reported in-band as [`crate::StatusRecord`]s.

use mailstep_auth::AuthError;
use mailstep_graph::GraphError;
use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Fatal errors that terminate the run
#[derive(Debug, Error)]
pub enum CoreError {
    /// Token acquisition failed
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    /// A page of messages could not be fetched
    #[error("Error fetching emails: {0}")]
    FetchError(#[from] GraphError),
}

impl CoreError {
    /// Lines to print to the error stream before exiting
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            CoreError::AuthError(e) => vec![e.to_string()],
            CoreError::FetchError(e) => {
                let mut lines = vec!["Error fetching emails".to_string()];
                lines.extend(e.diagnostics());
                lines
            }
        }
    }
}
