//! Client configuration for reaching the remote note service.
//!
//! A `ClientConfig` names the service's base endpoint (every route in the
//! gateway is relative to it) and an optional request timeout. Values come
//! from the environment or are built directly by a front end that keeps its
//! own config file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const ENV_API_URL: &str = "NOTAS_API_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "NOTAS_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// `None` leaves requests unbounded.
    #[serde(default)]
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url.as_ref())?,
            request_timeout: None,
        })
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve `NOTAS_API_URL` / `NOTAS_REQUEST_TIMEOUT_SECS` through `lookup`,
    /// normally the process environment.
    ///
    /// Returns `Ok(None)` when no base URL is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let Some(url) = non_blank(lookup(ENV_API_URL)) else {
            return Ok(None);
        };
        let timeout = parse_timeout_secs(lookup(ENV_REQUEST_TIMEOUT_SECS))?;
        Ok(Some(Self::new(url)?.with_request_timeout(timeout)))
    }

    /// Absolute URL for a service-relative path such as `/tareas/3`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Trimmed value, or `None` when absent or whitespace only.
pub fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn parse_timeout_secs(raw: Option<String>) -> Result<Option<Duration>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    let secs = raw.parse::<u64>().map_err(|_| {
        Error::Config(format!(
            "{ENV_REQUEST_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
        ))
    })?;
    if secs == 0 {
        Ok(None)
    } else {
        Ok(Some(Duration::from_secs(secs)))
    }
}
