//! Error types for the auth module

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur during authentication
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider answered with an OAuth2 error body
    #[error("Failed to acquire token: {}", .description.as_deref().unwrap_or(.code.as_str()))]
    TokenRejected {
        code: String,
        description: Option<String>,
    },

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The token endpoint answered with something that is not a token
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
