//! Application configuration: an optional RON file, then CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use recommender_core::DEFAULT_RESULT_LIMIT;
use recommender_engine::{ClientSettings, DEFAULT_ENDPOINT};
use recommender_logging::rec_info;
use serde::Deserialize;

use super::cli::Cli;

const DEFAULT_CONFIG_FILENAME: &str = "recommender.ron";
// Grace period on top of the client timeouts before the session gives up waiting.
const RESPONSE_GRACE_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub default_result_limit: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_bytes: client.max_bytes,
            default_result_limit: i64::from(DEFAULT_RESULT_LIMIT),
        }
    }
}

impl AppConfig {
    /// Loads the file named on the command line, else `./recommender.ron` if it
    /// exists, else defaults. CLI flags win over file values.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                if path.is_file() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_overrides(cli))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = ron::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        rec_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(limit) = cli.top_k {
            self.default_result_limit = limit;
        }
        self
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..ClientSettings::default()
        }
    }

    /// How long the front end waits for a completion before treating it as a timeout.
    pub fn response_wait(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .saturating_add(self.request_timeout_secs)
                .saturating_add(RESPONSE_GRACE_SECS),
        )
    }
}
