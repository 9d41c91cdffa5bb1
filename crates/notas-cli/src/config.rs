//! Persistent CLI configuration.
//!
//! The file only carries the API endpoint and timeout. `NOTAS_API_URL` and
//! `NOTAS_REQUEST_TIMEOUT_SECS` take precedence over whatever it holds.

use std::path::{Path, PathBuf};

use notas_core::config::{
    non_blank, normalize_base_url, ClientConfig, ENV_API_URL, ENV_REQUEST_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("notas").join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

impl CliConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self {
                version: default_config_version(),
                ..Self::default()
            });
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Set the endpoint, rejecting anything that is not an http(s) URL.
    pub fn set_api_base_url(&mut self, raw: &str) -> Result<(), String> {
        let url = normalize_base_url(raw).map_err(|error| error.to_string())?;
        self.api_base_url = Some(url);
        Ok(())
    }

    /// Effective client settings, with `lookup` values (normally the process
    /// environment) overriding the file.
    ///
    /// `Ok(None)` means no endpoint is configured anywhere.
    pub fn client_config(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> notas_core::Result<Option<ClientConfig>> {
        ClientConfig::from_lookup(|name| non_blank(lookup(name)).or_else(|| self.value(name)))
    }

    /// File value stored under an environment variable's name.
    fn value(&self, name: &str) -> Option<String> {
        match name {
            ENV_API_URL => non_blank(self.api_base_url.clone()),
            ENV_REQUEST_TIMEOUT_SECS => self.request_timeout_secs.map(|secs| secs.to_string()),
            _ => None,
        }
    }

    fn normalize(&mut self) {
        self.api_base_url = non_blank(self.api_base_url.clone());
        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }
    }
}
