//! Configuration for notecheck.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (GOOGLE_API_KEY, GOOGLE_CSE_ID, YOUTUBE_API_KEY)
//! 2. Config file (.notecheck/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - NOTECHECK_CONFIG, if set, names the file directly
//! - Otherwise searches current directory and parents for .notecheck/config.yaml
//! - Falls back to ~/.notecheck/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::{google_search, youtube};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub google: Option<GoogleConfig>,
    #[serde(default)]
    pub youtube: Option<YouTubeConfig>,
    #[serde(default)]
    pub discovery: Option<DiscoveryConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleConfig {
    pub api_key: Option<String>,
    pub cse_id: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YouTubeConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryConfig {
    pub max_results: Option<u32>,
    pub request_timeout_seconds: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub google: GoogleSettings,
    pub youtube: YouTubeSettings,
    pub discovery: DiscoverySettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleSettings {
    pub api_key: Option<String>,
    pub cse_id: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct YouTubeSettings {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoverySettings {
    pub max_results: u32,
    /// Per-request HTTP timeout; 0 disables it
    pub request_timeout_seconds: u64,
}

impl DiscoverySettings {
    /// Timeout to apply to each lookup request, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_seconds > 0).then(|| Duration::from_secs(self.request_timeout_seconds))
    }

    /// HTTP client honoring the configured timeout
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            max_results: 5,
            request_timeout_seconds: 30,
        }
    }
}

impl ResolvedConfig {
    /// Copy with API keys masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.google.api_key = config.google.api_key.as_ref().map(|_| redact());
        config.youtube.api_key = config.youtube.api_key.as_ref().map(|_| redact());
        config
    }
}

fn redact() -> String {
    "********".to_string()
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("NOTECHECK_CONFIG") {
        return Some(PathBuf::from(explicit));
    }

    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".notecheck").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(".notecheck").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a parsed config file with environment overrides and defaults
fn resolve(
    file: ConfigFile,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let google = file.google.unwrap_or_default();
    let youtube = file.youtube.unwrap_or_default();
    let discovery = file.discovery.unwrap_or_default();
    let defaults = DiscoverySettings::default();

    ResolvedConfig {
        google: GoogleSettings {
            api_key: env("GOOGLE_API_KEY").or(google.api_key),
            cse_id: env("GOOGLE_CSE_ID").or(google.cse_id),
            base_url: google
                .base_url
                .unwrap_or_else(|| google_search::DEFAULT_BASE_URL.to_string()),
        },
        youtube: YouTubeSettings {
            api_key: env("YOUTUBE_API_KEY").or(youtube.api_key),
            base_url: youtube
                .base_url
                .unwrap_or_else(|| youtube::DEFAULT_BASE_URL.to_string()),
        },
        discovery: DiscoverySettings {
            max_results: discovery.max_results.unwrap_or(defaults.max_results),
            request_timeout_seconds: discovery
                .request_timeout_seconds
                .unwrap_or(defaults.request_timeout_seconds),
        },
        config_file,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let file = match config_file {
        Some(ref path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    Ok(resolve(file, config_file, |key| {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
