//! Step configuration
//!
//! Loaded from a JSON file with camelCase keys. Credentials may also come
//! from `MAILSTEP_*` environment variables, which win over the file.

use anyhow::{bail, Context, Result};
use mailstep_auth::Credentials;
use mailstep_core::{ReadRequest, DEFAULT_FOLDER, DEFAULT_TOP};
use serde::Deserialize;
use std::path::Path;

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Mailbox owner: UPN or object id
    #[serde(default)]
    pub user_id: String,

    /// Legacy single-read settings, used when no input is given
    pub folder: Option<String>,
    pub top: Option<usize>,
    pub filter: Option<String>,

    pub scopes: Option<Vec<String>>,

    /// Identity platform host, for sovereign clouds
    pub authority_host: Option<String>,
    /// Graph API root, for national clouds
    pub graph_base_url: Option<String>,
}

impl StepConfig {
    /// Read, apply environment overrides, and validate
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: StepConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields = [
            ("MAILSTEP_TENANT_ID", &mut self.tenant_id),
            ("MAILSTEP_CLIENT_ID", &mut self.client_id),
            ("MAILSTEP_CLIENT_SECRET", &mut self.client_secret),
            ("MAILSTEP_USER_ID", &mut self.user_id),
        ];
        for (variable, field) in fields {
            if let Some(value) = lookup(variable).filter(|v| !v.is_empty()) {
                *field = value;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("tenantId", &self.tenant_id),
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
            ("userId", &self.user_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                bail!("Parameter `{}` is required", key);
            }
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.tenant_id.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
            self.scopes.clone().unwrap_or_default(),
        )
    }

    /// The single read run when no action list is supplied. Empty or zero
    /// values fall back to the defaults.
    pub fn legacy_request(&self) -> ReadRequest {
        ReadRequest {
            folder: self
                .folder
                .clone()
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
            top: self.top.filter(|t| *t > 0).unwrap_or(DEFAULT_TOP),
            filter: self.filter.clone().filter(|f| !f.is_empty()),
        }
    }
}
