use crate::error::{GraphError, GraphResult};
use crate::types::*;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Well-known name of the default folder
const INBOX: &str = "inbox";

/// Newest first
const ORDER_BY: &str = "receivedDateTime DESC";

/// Mailbox client for one user, authenticated with an app-only token
pub struct GraphMailClient {
    client: reqwest::Client,
    access_token: String,
    user_id: String,
    base_url: String,
}

impl GraphMailClient {
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            user_id: user_id.into(),
            base_url: GRAPH_BASE.to_string(),
        }
    }

    /// Point the client at a different API root (tests, national clouds)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Message collection for a folder.
    ///
    /// The inbox is addressed through the mailbox-wide `messages` collection,
    /// which works with app-only permissions where `mailFolders/inbox` may not.
    pub fn messages_url(&self, folder: Option<&str>) -> String {
        match folder {
            Some(folder) if !folder.is_empty() && !folder.eq_ignore_ascii_case(INBOX) => format!(
                "{}/users/{}/mailFolders/{}/messages",
                self.base_url, self.user_id, folder
            ),
            _ => format!("{}/users/{}/messages", self.base_url, self.user_id),
        }
    }

    fn message_url(&self, message_id: &str) -> String {
        format!("{}/users/{}/messages/{}", self.base_url, self.user_id, message_id)
    }

    /// Fetch up to `top` messages from a folder, newest first, following
    /// `@odata.nextLink` until the quota is met or the provider has no more.
    ///
    /// The filter is only sent on the first request; continuation links
    /// already encode it and are followed verbatim.
    pub async fn fetch_messages(
        &self,
        folder: Option<&str>,
        top: usize,
        filter: Option<&str>,
    ) -> GraphResult<Vec<Value>> {
        if top == 0 {
            return Ok(Vec::new());
        }

        let url = self.messages_url(folder);
        let mut params = vec![("$top", top.to_string()), ("$orderby", ORDER_BY.to_string())];
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            params.push(("$filter", filter.to_string()));
        }
        debug!(
            "Graph: listing messages user={} folder={:?} top={} filter={:?}",
            self.user_id, folder, top, filter
        );

        let mut page = self.get_page(&url, Some(&params)).await?;
        let mut messages = Vec::new();
        loop {
            messages.extend(page.value);

            if messages.len() >= top {
                // Quota met; later pages are never requested
                messages.truncate(top);
                break;
            }

            match page.next_link {
                Some(next_link) => {
                    debug!("Graph: fetching next page ({} so far)", messages.len());
                    page = self.get_page(&next_link, None).await?;
                }
                None => break,
            }
        }

        info!("Graph: fetched {} messages", messages.len());
        Ok(messages)
    }

    async fn get_page(
        &self,
        url: &str,
        params: Option<&[(&str, String)]>,
    ) -> GraphResult<GraphListResponse<Value>> {
        let mut request = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            return Err(api_error(response).await);
        }

        let list: GraphListResponse<Value> = response
            .json()
            .await
            .map_err(|e| GraphError::ParseError(e.to_string()))?;

        debug!(
            "Graph: got {} messages, has_more={}",
            list.value.len(),
            list.next_link.is_some()
        );
        Ok(list)
    }

    /// Move a message to a folder named by id or well-known name
    pub async fn move_message(&self, message_id: &str, destination: &str) -> GraphResult<()> {
        let url = format!("{}/move", self.message_url(message_id));
        debug!("Graph: moving {} to {}", message_id, destination);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&MoveRequest {
                destination_id: destination.to_string(),
            })
            .send()
            .await?;

        if !matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            return Err(api_error(response).await);
        }

        info!("Graph: moved {} to {}", message_id, destination);
        Ok(())
    }

    /// Apply a partial update (flag and/or read state) to a message
    pub async fn update_message(&self, message_id: &str, patch: &StatePatch) -> GraphResult<()> {
        let url = self.message_url(message_id);
        debug!("Graph: updating {} with {:?}", message_id, patch);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.access_token)
            .json(patch)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(api_error(response).await);
        }

        Ok(())
    }
}

/// Capture everything about a failed response for diagnostics
async fn api_error(response: reqwest::Response) -> GraphError {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<non-ascii>").to_string(),
            )
        })
        .collect();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<GraphErrorBody>(&body)
        .ok()
        .map(|parsed| parsed.error);

    GraphError::ApiError {
        status,
        headers,
        body,
        detail,
    }
}
