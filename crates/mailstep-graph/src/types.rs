use serde::{Deserialize, Serialize};

/// Response wrapper for Graph API list endpoints
#[derive(Debug, Deserialize)]
pub struct GraphListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphFlag {
    #[serde(rename = "flagStatus")]
    pub flag_status: String,
}

impl GraphFlag {
    pub fn from_flagged(flagged: bool) -> Self {
        Self {
            flag_status: if flagged { "flagged" } else { "notFlagged" }.to_string(),
        }
    }
}

/// Request body for moving a message
#[derive(Debug, Serialize)]
pub struct MoveRequest {
    #[serde(rename = "destinationId")]
    pub destination_id: String,
}

/// Partial update body for a message; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<GraphFlag>,
    #[serde(rename = "isRead", skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl StatePatch {
    pub fn new(flagged: Option<bool>, is_read: Option<bool>) -> Self {
        Self {
            flag: flagged.map(GraphFlag::from_flagged),
            is_read,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flag.is_none() && self.is_read.is_none()
    }
}

/// Error envelope returned by Graph on failed requests
#[derive(Debug, Deserialize)]
pub struct GraphErrorBody {
    pub error: GraphErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
}
