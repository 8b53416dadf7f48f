//! Client configuration for the OnDemand chat API.
//!
//! This module provides the configuration value passed to the client at
//! construction time: credentials plus the fixed per-query constants
//! (endpoint, agent list, reasoning mode, model configuration). The
//! configuration can be loaded from environment variables or from
//! `~/.ondemand-chat/config.json`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::ModelConfigs;

/// The configuration directory name.
const CONFIG_DIR: &str = ".ondemand-chat";

/// The configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "ONDEMAND_API_KEY";

/// Environment variable holding the external user id.
pub const ENV_EXTERNAL_USER_ID: &str = "ONDEMAND_EXTERNAL_USER_ID";

/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "ONDEMAND_BASE_URL";

/// Placeholder API key shipped in example configs.
pub const PLACEHOLDER_API_KEY: &str = "<replace_api_key>";

/// Placeholder external user id shipped in example configs.
pub const PLACEHOLDER_EXTERNAL_USER_ID: &str = "<replace_external_user_id>";

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_external_user_id() -> String {
    PLACEHOLDER_EXTERNAL_USER_ID.to_string()
}

fn default_base_url() -> String {
    "https://api.on-demand.io/chat/v1".to_string()
}

fn default_endpoint_id() -> String {
    "predefined-openai-gpt4.1".to_string()
}

fn default_reasoning_mode() -> String {
    "medium".to_string()
}

/// Agents attached to every query.
static DEFAULT_AGENT_IDS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "agent-1712327325",
        "agent-1713962163",
        "agent-1716455998",
        "agent-1716434059",
        "agent-1716429542",
        "agent-1741770626",
        "agent-1713954536",
        "agent-1713958591",
        "agent-1713958830",
        "agent-1713961903",
        "agent-1713967141",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

fn default_agent_ids() -> Vec<String> {
    DEFAULT_AGENT_IDS.clone()
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// API key is empty or still the placeholder
    #[error("API key is missing or still set to the placeholder value")]
    MissingApiKey,
    /// External user id is empty or still the placeholder
    #[error("external user id is missing or still set to the placeholder value")]
    MissingExternalUserId,
}

/// Configuration for the OnDemand chat client.
///
/// Credentials are per-deployment; everything else defaults to the
/// constants the service documents for ad-hoc clients and only needs
/// overriding for custom endpoints or agent sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// API key sent in the `apikey` header
    pub api_key: String,
    /// Caller-side user identifier sessions are scoped to
    pub external_user_id: String,
    /// Base URL of the chat API
    pub base_url: String,
    /// Model endpoint selector attached to every query
    pub endpoint_id: String,
    /// Agent identifiers attached to every query
    pub agent_ids: Vec<String>,
    /// Reasoning-effort hint attached to every query
    pub reasoning_mode: String,
    /// Model configuration attached to every query
    pub model_configs: ModelConfigs,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            external_user_id: default_external_user_id(),
            base_url: default_base_url(),
            endpoint_id: default_endpoint_id(),
            agent_ids: default_agent_ids(),
            reasoning_mode: default_reasoning_mode(),
            model_configs: ModelConfigs::default(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given credentials and default
    /// query constants.
    pub fn new(api_key: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            external_user_id: external_user_id.into(),
            ..Self::default()
        }
    }

    /// Load credentials from the environment.
    ///
    /// Returns `None` unless both credential variables are set. The base
    /// URL override is applied when present.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(ENV_API_KEY).ok()?;
        let external_user_id = std::env::var(ENV_EXTERNAL_USER_ID).ok()?;

        let mut config = Self::new(api_key, external_user_id);
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        Some(config)
    }

    /// Check that both credentials are present and not placeholders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::MissingApiKey);
        }
        if self.external_user_id.is_empty()
            || self.external_user_id == PLACEHOLDER_EXTERNAL_USER_ID
        {
            return Err(ConfigError::MissingExternalUserId);
        }
        Ok(())
    }
}

/// Manages configuration storage and retrieval.
#[derive(Debug)]
pub struct ConfigManager {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let config_path = home.join(CONFIG_DIR).join(CONFIG_FILE);
        Some(Self { config_path })
    }

    /// Create a ConfigManager backed by an explicit file path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Get the path to the configuration file.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from the configuration file.
    ///
    /// Returns the default configuration if the file doesn't exist or
    /// can't be read.
    pub fn load(&self) -> ClientConfig {
        if !self.config_path.exists() {
            return ClientConfig::default();
        }

        let file = match File::open(&self.config_path) {
            Ok(f) => f,
            Err(_) => return ClientConfig::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(config) => config,
            Err(_) => ClientConfig::default(),
        }
    }

    /// Save configuration to the configuration file.
    ///
    /// Creates the parent directory if it doesn't exist.
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, config: &ClientConfig) -> bool {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.config_path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(&mut writer, config) {
            Ok(()) => writer.flush().is_ok(),
            Err(_) => false,
        }
    }
}
