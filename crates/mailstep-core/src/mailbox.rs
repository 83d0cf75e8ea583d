//! The seam between the pipeline and the mail provider

use crate::CoreResult;
use async_trait::async_trait;
use mailstep_auth::Authenticator;
use mailstep_graph::{GraphMailClient, GraphResult, StatePatch};
use serde_json::Value;
use tracing::info;

/// Mailbox operations the dispatcher needs
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// Up to `top` raw messages from `folder`, newest first
    async fn fetch_messages(
        &self,
        folder: Option<&str>,
        top: usize,
        filter: Option<&str>,
    ) -> GraphResult<Vec<Value>>;

    async fn move_message(&self, message_id: &str, destination: &str) -> GraphResult<()>;

    async fn update_message(&self, message_id: &str, patch: &StatePatch) -> GraphResult<()>;
}

#[async_trait]
impl Mailbox for GraphMailClient {
    async fn fetch_messages(
        &self,
        folder: Option<&str>,
        top: usize,
        filter: Option<&str>,
    ) -> GraphResult<Vec<Value>> {
        GraphMailClient::fetch_messages(self, folder, top, filter).await
    }

    async fn move_message(&self, message_id: &str, destination: &str) -> GraphResult<()> {
        GraphMailClient::move_message(self, message_id, destination).await
    }

    async fn update_message(&self, message_id: &str, patch: &StatePatch) -> GraphResult<()> {
        GraphMailClient::update_message(self, message_id, patch).await
    }
}

/// Authenticate once and open the user's mailbox with the resulting token
pub async fn connect(authenticator: &Authenticator, user_id: &str) -> CoreResult<GraphMailClient> {
    info!("Authenticating with Microsoft Graph API...");
    let token = authenticator.acquire_token().await?;
    info!("Authentication successful");

    Ok(GraphMailClient::new(token.secret(), user_id))
}
