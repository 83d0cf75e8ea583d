use crate::types::GraphErrorDetail;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Graph API error {status}: {body}")]
    ApiError {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
        /// Parsed `error` object, when the body was structured error JSON
        detail: Option<GraphErrorDetail>,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl GraphError {
    /// Multi-line diagnostic report for fatal failures
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            GraphError::ApiError {
                status,
                headers,
                body,
                detail,
            } => {
                let headers = headers
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .collect::<Vec<_>>()
                    .join(", ");

                let mut lines = vec![
                    format!("Status {}", status),
                    format!("Response headers: {{{}}}", headers),
                    format!("Response body: {}", body),
                ];
                match detail {
                    Some(detail) => {
                        lines.push(format!(
                            "Error code: {}",
                            detail.code.as_deref().unwrap_or("Unknown")
                        ));
                        lines.push(format!(
                            "Error message: {}",
                            detail.message.as_deref().unwrap_or("No message")
                        ));
                    }
                    None => lines.push("Response body is not structured error JSON".to_string()),
                }
                lines
            }
            other => vec![other.to_string()],
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_with_error_detail() {
        let err = GraphError::ApiError {
            status: 403,
            headers: vec![("request-id".to_string(), "abc".to_string())],
            body: r#"{"error":{"code":"ErrorAccessDenied","message":"Access is denied."}}"#
                .to_string(),
            detail: Some(GraphErrorDetail {
                code: Some("ErrorAccessDenied".to_string()),
                message: Some("Access is denied.".to_string()),
            }),
        };

        let lines = err.diagnostics();
        assert_eq!(lines[0], "Status 403");
        assert_eq!(lines[1], "Response headers: {request-id: abc}");
        assert!(lines.contains(&"Error code: ErrorAccessDenied".to_string()));
        assert!(lines.contains(&"Error message: Access is denied.".to_string()));
    }

    #[test]
    fn test_diagnostics_unstructured_body() {
        let err = GraphError::ApiError {
            status: 502,
            headers: Vec::new(),
            body: "Bad Gateway".to_string(),
            detail: None,
        };

        let lines = err.diagnostics();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "Response body: Bad Gateway");
        assert_eq!(lines[3], "Response body is not structured error JSON");
    }
}
