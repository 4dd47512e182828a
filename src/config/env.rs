// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::error::{ProductiveError, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Productive API base URL used when PRODUCTIVE_API_BASE_URL is unset
pub const DEFAULT_BASE_URL: &str = "https://api.productive.io/api/v2";

/// Request timeout used when PRODUCTIVE_TIMEOUT_SECS is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint for the Productive API
#[derive(Clone, Default)]
pub struct ApiConfig {
    /// API token (PRODUCTIVE_API_TOKEN), sent as X-Auth-Token
    pub token: Option<String>,
    /// Organization id (PRODUCTIVE_ORG_ID), sent as X-Organization-Id
    pub org_id: Option<String>,
    /// Base URL (PRODUCTIVE_API_BASE_URL)
    pub base_url: String,
    /// Per-request timeout (PRODUCTIVE_TIMEOUT_SECS)
    pub timeout: Duration,
}

// Hand-written so the token never ends up in logs
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &self.token.as_ref().map(|_| "<set>"))
            .field("org_id", &self.org_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Load API settings from environment variables
    pub fn from_env() -> Self {
        let timeout = std::env::var("PRODUCTIVE_TIMEOUT_SECS")
            .ok()
            .and_then(|t| match t.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    warn!(value = %t, "Invalid PRODUCTIVE_TIMEOUT_SECS, using default");
                    None
                }
            })
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = Self {
            token: read_var("PRODUCTIVE_API_TOKEN"),
            org_id: read_var("PRODUCTIVE_ORG_ID"),
            base_url: read_var("PRODUCTIVE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        };
        debug!(
            has_token = config.token.is_some(),
            has_org = config.org_id.is_some(),
            base_url = %config.base_url,
            "Productive API settings loaded"
        );
        config
    }

    /// Token and org id, or a configuration error naming what is missing
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let Some(token) = self.token.as_deref() else {
            return Err(unset("PRODUCTIVE_API_TOKEN"));
        };
        let Some(org) = self.org_id.as_deref() else {
            return Err(unset("PRODUCTIVE_ORG_ID"));
        };
        Ok((token, org))
    }
}

fn unset(name: &str) -> ProductiveError {
    ProductiveError::Config(format!("{} is not set", name))
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub api: ApiConfig,
    /// Person id behind "me" (PRODUCTIVE_USER_ID)
    pub user_id: Option<String>,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");

        Self {
            api: ApiConfig::from_env(),
            user_id: read_var("PRODUCTIVE_USER_ID"),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.api.token.is_none() {
            validation.add_error("PRODUCTIVE_API_TOKEN is not set.");
        }
        if self.api.org_id.is_none() {
            validation.add_error("PRODUCTIVE_ORG_ID is not set.");
        }

        if url::Url::parse(&self.api.base_url).is_err() {
            validation.add_error(format!(
                "PRODUCTIVE_API_BASE_URL '{}' is not a valid URL.",
                self.api.base_url
            ));
        }

        if self.user_id.is_none() {
            validation.add_warning(
                "PRODUCTIVE_USER_ID is not set. person_id=\"me\" will be rejected; callers must pass explicit ids.",
            );
        }

        validation
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
