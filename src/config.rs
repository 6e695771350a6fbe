/// Application settings
///
/// Settings are read from a TOML file in the user's config directory:
/// - Linux: ~/.config/unsplash-gallery/settings.toml
/// - macOS: ~/Library/Application Support/unsplash-gallery/settings.toml
/// - Windows: %APPDATA%\unsplash-gallery\settings.toml
///
/// The access key can also come from the `UNSPLASH_ACCESS_KEY` environment
/// variable, which wins over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_DIR: &str = "unsplash-gallery";
const CONFIG_FILE: &str = "settings.toml";

/// Environment variable holding the Unsplash access key
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the photo API, without trailing slash
    pub api_url: String,
    /// Unsplash "Client-ID" access key
    pub access_key: Option<String>,
    /// Per-request timeout so a hung request ends as an error
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_key: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Apply the environment override for the access key.
    /// Empty values are treated as absent.
    pub fn resolve_access_key(mut self, env_value: Option<String>) -> Self {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            self.access_key = Some(key.trim().to_string());
        }
        if self
            .access_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            self.access_key = None;
        }
        self
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load settings from the default location. On first run a default
/// settings file is written there. The environment override is always applied.
pub fn load() -> Result<Config, ConfigError> {
    let config = match get_config_path() {
        Some(path) => load_or_create(&path)?,
        None => Config::default(),
    };
    Ok(config.resolve_access_key(std::env::var(ACCESS_KEY_ENV).ok()))
}

/// Read the settings at `path`, or write the defaults there if the file
/// doesn't exist yet. Failing to write the defaults is not fatal.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        return load_from_path(path);
    }

    let config = Config::default();
    match save_to_path(&config, path) {
        Ok(()) => log::info!("Wrote default settings to {}", path.display()),
        Err(err) => log::warn!("Could not write default settings: {}", err),
    }
    Ok(config)
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
