//! Configuration file support for hub-integration.
//!
//! Provides YAML-based configuration through `hub-integration.config.yml`
//! files: the hub connection, the scan wait and the policy rules of interest.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "hub-integration.config.yml";

/// Environment variable read when the file has no `api_token`
pub const API_TOKEN_ENV: &str = "HUB_API_TOKEN";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub server_url: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub scan_timeout_ms: Option<i64>,
    pub max_concurrent_notifications: Option<usize>,
    /// Policy rule names, ids or URLs used to filter policy notifications.
    pub policy_rules: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The configured token, or the one in `HUB_API_TOKEN`.
    pub fn api_token_or_env(&self) -> Option<String> {
        self.api_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| std::env::var(API_TOKEN_ENV).ok())
            .filter(|token| !token.trim().is_empty())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref server_url) = config.server_url {
        let server_url = server_url.trim();
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            bail!(
                "Invalid config: server_url '{}' must be an http:// or https:// URL.\n\n\
                 💡 Hint: Use the hub's base address, e.g. \"https://hub.example.com\".",
                server_url
            );
        }
    }

    if config.request_timeout_secs == Some(0) {
        bail!("Invalid config: request_timeout_secs must be greater than 0.");
    }

    if config.max_concurrent_notifications == Some(0) {
        bail!("Invalid config: max_concurrent_notifications must be greater than 0.");
    }

    if let Some(ref rules) = config.policy_rules {
        for (i, rule) in rules.iter().enumerate() {
            if rule.trim().is_empty() {
                bail!(
                    "Invalid config: policy_rules[{}] must not be empty.\n\n\
                     💡 Hint: Each entry is a policy rule name, id or URL.",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
