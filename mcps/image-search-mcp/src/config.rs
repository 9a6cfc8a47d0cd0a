//! Configuration loading for image-search
//!
//! Configuration is loaded from:
//! 1. Environment variable IMAGE_SEARCH_CONFIG_PATH
//! 2. ~/.image-search/config.toml
//! 3. Default values
//!
//! Environment variables always win over file values:
//! IMAGE_SEARCH_PROVIDER, PIXABAY_API_KEY, UNSPLASH_ACCESS_KEY,
//! PIXABAY_URL, UNSPLASH_URL.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which image provider answers searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Pixabay,
    Unsplash,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Pixabay => "pixabay",
            ProviderKind::Unsplash => "unsplash",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pixabay" => Ok(ProviderKind::Pixabay),
            "unsplash" => Ok(ProviderKind::Unsplash),
            other => Err(anyhow!("unknown provider '{}' (expected pixabay or unsplash)", other)),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Pixabay specific configuration
    #[serde(default)]
    pub pixabay: PixabayConfig,
    /// Unsplash specific configuration
    #[serde(default)]
    pub unsplash: UnsplashConfig,
}

/// General search configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Active provider
    #[serde(default)]
    pub provider: ProviderKind,
    /// Request timeout in seconds (unset = transport default)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Pixabay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixabayConfig {
    /// API endpoint
    #[serde(default = "default_pixabay_url")]
    pub base_url: String,
    /// API key sent as `key`
    #[serde(default)]
    pub api_key: String,
}

/// Unsplash configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsplashConfig {
    /// Photo search endpoint
    #[serde(default = "default_unsplash_url")]
    pub base_url: String,
    /// Access key sent as `client_id`
    #[serde(default)]
    pub access_key: String,
}

fn default_pixabay_url() -> String {
    "https://pixabay.com/api/".to_string()
}

fn default_unsplash_url() -> String {
    "https://api.unsplash.com/search/photos".to_string()
}

impl Default for PixabayConfig {
    fn default() -> Self {
        Self {
            base_url: default_pixabay_url(),
            api_key: String::new(),
        }
    }
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            base_url: default_unsplash_url(),
            access_key: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply the environment
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(_) => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay environment values onto the loaded config
    ///
    /// Takes a lookup function so callers (and tests) control the source.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("IMAGE_SEARCH_PROVIDER") {
            self.search.provider = provider.parse()?;
        }
        if let Some(key) = lookup("PIXABAY_API_KEY") {
            self.pixabay.api_key = key;
        }
        if let Some(key) = lookup("UNSPLASH_ACCESS_KEY") {
            self.unsplash.access_key = key;
        }
        if let Some(url) = lookup("PIXABAY_URL") {
            self.pixabay.base_url = url;
        }
        if let Some(url) = lookup("UNSPLASH_URL") {
            self.unsplash.base_url = url;
        }
        Ok(())
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("IMAGE_SEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.image-search/config.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home).join(".image-search").join("config.toml");
            return Some(path);
        }

        None
    }
}
