//! OAuth2 client-credentials grant (app-only authentication)
//!
//! The caller authenticates as an application, not as a signed-in user, so
//! there is no browser round-trip: a single POST to the tenant's token
//! endpoint yields the bearer token used for every Graph request in the run.

use crate::{microsoft, AuthError, AuthResult};
use oauth2::{
    basic::{BasicClient, BasicErrorResponse},
    AuthType, AuthUrl, ClientId, ClientSecret, RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use std::fmt;
use tracing::{debug, info};

/// Tenant and application credentials, supplied once at startup
#[derive(Clone)]
pub struct Credentials {
    /// Directory (tenant) ID
    pub tenant_id: String,
    /// Application (client) ID
    pub client_id: String,
    /// Client secret value
    pub client_secret: String,
    /// Requested scopes, in order
    pub scopes: Vec<String>,
}

impl Credentials {
    /// Create credentials, falling back to the Graph default scope when
    /// `scopes` is empty
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        let scopes = if scopes.is_empty() {
            microsoft::default_scopes()
        } else {
            scopes
        };

        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Bearer token for Graph API calls
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
    /// Token expiration timestamp (Unix seconds)
    pub expires_at: Option<i64>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_at: Option<i64>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    /// The raw bearer value
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Acquires app-only tokens for one tenant
pub struct Authenticator {
    credentials: Credentials,
    authority_host: String,
}

impl Authenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            authority_host: microsoft::AUTHORITY_HOST.to_string(),
        }
    }

    /// Use a different authority host (sovereign clouds, local test servers)
    pub fn with_authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Tenant-scoped authority, e.g. `https://login.microsoftonline.com/<tenant>`
    pub fn authority(&self) -> String {
        format!("{}/{}", self.authority_host, self.credentials.tenant_id)
    }

    fn client(&self) -> AuthResult<BasicClient> {
        let authority = self.authority();
        let auth_url = AuthUrl::new(format!("{}/oauth2/v2.0/authorize", authority))
            .map_err(|e| AuthError::InvalidConfig(format!("Invalid auth URL: {}", e)))?;
        let token_url = TokenUrl::new(format!("{}/oauth2/v2.0/token", authority))
            .map_err(|e| AuthError::InvalidConfig(format!("Invalid token URL: {}", e)))?;

        // The identity platform expects the secret as a form field
        Ok(BasicClient::new(
            ClientId::new(self.credentials.client_id.clone()),
            Some(ClientSecret::new(self.credentials.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody))
    }

    /// Request a token for the configured scope set.
    ///
    /// Exactly one attempt is made; any failure is returned to the caller,
    /// which treats it as fatal for the run.
    pub async fn acquire_token(&self) -> AuthResult<AccessToken> {
        let client = self.client()?;
        debug!(
            "Requesting app-only token from {} for scopes {:?}",
            self.authority(),
            self.credentials.scopes
        );

        let mut request = client.exchange_client_credentials();
        for scope in &self.credentials.scopes {
            request = request.add_scope(Scope::new(scope.clone()));
        }

        let token_response = request
            .request_async(oauth2::reqwest::async_http_client)
            .await
            .map_err(token_error)?;

        let expires_at = token_response.expires_in().map(|duration| {
            chrono::Utc::now().timestamp() + duration.as_secs() as i64
        });

        info!(
            "Acquired access token (expires in {}s)",
            token_response
                .expires_in()
                .map(|d| d.as_secs().to_string())
                .unwrap_or_else(|| "?".to_string())
        );

        Ok(AccessToken::new(
            token_response.access_token().secret().clone(),
            expires_at,
        ))
    }
}

fn token_error<RE: std::error::Error + 'static>(
    err: RequestTokenError<RE, BasicErrorResponse>,
) -> AuthError {
    match err {
        RequestTokenError::ServerResponse(response) => AuthError::TokenRejected {
            code: response.error().to_string(),
            description: response.error_description().cloned(),
        },
        RequestTokenError::Request(e) => AuthError::NetworkError(e.to_string()),
        RequestTokenError::Parse(e, _) => AuthError::InvalidResponse(e.to_string()),
        RequestTokenError::Other(message) => AuthError::InvalidResponse(message),
    }
}
