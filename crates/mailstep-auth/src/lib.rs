//! Authentication module for mailstep
//!
//! Exchanges tenant/client credentials for an app-only bearer token using
//! the OAuth2 client-credentials grant against the Microsoft identity
//! platform. One token is acquired per run; nothing is cached or refreshed.

mod client_credentials;
mod error;

pub use client_credentials::{AccessToken, Authenticator, Credentials};
pub use error::{AuthError, AuthResult};

/// Microsoft identity platform configuration
pub mod microsoft {
    /// Default authority host for the public cloud
    pub const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

    /// Default scope set for app-only Graph access
    pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

    /// Scopes used when the configuration supplies none
    pub fn default_scopes() -> Vec<String> {
        vec![GRAPH_DEFAULT_SCOPE.to_string()]
    }
}
