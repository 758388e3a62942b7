//! Top-level application configuration.
//!
//! Configuration is stored in `.storefront/config.yaml` and includes:
//! - API endpoint and the public app URL used for share links
//! - Authentication token (enables review/question composition)
//! - Page size for the review and question lists
//! - Color table for the rating histogram
//!
//! Environment variables take precedence over the file:
//! `STOREFRONT_API_URL`, `STOREFRONT_APP_URL`, `STOREFRONT_TOKEN`.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};
use crate::page::rating::{RatingPalette, Rgb};
use crate::types::DEFAULT_PAGE_SIZE;

/// Directory holding config and logs, relative to the working directory
pub const STOREFRONT_DIR: &str = ".storefront";

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_APP_URL: &str = "STOREFRONT_APP_URL";
pub const ENV_TOKEN: &str = "STOREFRONT_TOKEN";

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Keys accepted by `config get` and `config set`
pub const VALID_KEYS: &[&str] = &[
    "api.url",
    "app.url",
    "auth.token",
    "page_size",
    "rating_colors.<1-5>",
];

/// Prefix of the per-rating histogram color keys
const RATING_COLOR_PREFIX: &str = "rating_colors.";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "ApiConfig::is_default")]
    pub api: ApiConfig,

    #[serde(default, skip_serializing_if = "AppConfig::is_default")]
    pub app: AppConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Items per page for reviews and questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Histogram bar color per star rating, as `#rrggbb`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rating_colors: BTreeMap<u8, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ApiConfig {
    pub fn is_default(&self) -> bool {
        self.url.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AppConfig {
    pub fn is_default(&self) -> bool {
        self.url.is_none()
    }
}

/// Authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(STOREFRONT_DIR).join("config.yaml")
    }

    /// Get the path to the TUI log file
    pub fn log_path() -> PathBuf {
        PathBuf::from(STOREFRONT_DIR).join("storefront.log")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Base URL of the storefront REST API
    pub fn api_url(&self) -> String {
        env_non_empty(ENV_API_URL)
            .or_else(|| self.api.url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Public base URL of the web app, used to build share links
    pub fn app_url(&self) -> String {
        env_non_empty(ENV_APP_URL)
            .or_else(|| self.app.url.clone())
            .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
    }

    /// API token from environment or config file
    pub fn token(&self) -> Option<String> {
        env_non_empty(ENV_TOKEN).or_else(|| self.auth.token.clone().filter(|t| !t.is_empty()))
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Histogram colors: defaults overlaid with any configured entries.
    ///
    /// Entries with a rating outside 1..=5 or an unparsable color are
    /// rejected so a typo does not silently fall back to the default.
    pub fn rating_palette(&self) -> Result<RatingPalette> {
        let mut palette = RatingPalette::default();
        for (rating, color) in &self.rating_colors {
            let rgb: Rgb = color.parse()?;
            palette.set(*rating, rgb)?;
        }
        Ok(palette)
    }

    /// Set a value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.url" => self.api.url = Some(validated_url(key, value)?),
            "app.url" => self.app.url = Some(validated_url(key, value)?),
            "auth.token" => self.auth.token = Some(value.to_string()),
            "page_size" => {
                let size = value.parse::<u32>().ok().filter(|s| *s > 0).ok_or_else(|| {
                    StorefrontError::Config(format!(
                        "invalid value '{value}' for page_size. Expected a positive integer"
                    ))
                })?;
                self.page_size = Some(size);
            }
            _ => {
                let rating = rating_color_key(key)?;
                let rgb: Rgb = value.parse()?;
                self.rating_colors.insert(rating, rgb.to_string());
            }
        }
        Ok(())
    }

    /// Get the effective value for a dotted key, if any
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "api.url" => Ok(Some(self.api_url())),
            "app.url" => Ok(Some(self.app_url())),
            "auth.token" => Ok(self.token()),
            "page_size" => Ok(Some(self.page_size().to_string())),
            _ => {
                let rating = rating_color_key(key)?;
                Ok(Some(self.rating_palette()?.color_for(rating).to_string()))
            }
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validated_url(key: &str, value: &str) -> Result<String> {
    url::Url::parse(value)
        .map_err(|e| StorefrontError::Config(format!("invalid URL '{value}' for {key}: {e}")))?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Rating named by a `rating_colors.<n>` key
fn rating_color_key(key: &str) -> Result<u8> {
    let rating = key
        .strip_prefix(RATING_COLOR_PREFIX)
        .ok_or_else(|| unknown_key(key))?;
    rating
        .parse::<u8>()
        .ok()
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| {
            StorefrontError::Config(format!(
                "invalid rating '{rating}' in '{key}', expected 1-5"
            ))
        })
}

fn unknown_key(key: &str) -> StorefrontError {
    StorefrontError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        VALID_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.auth.token.is_none());
        assert_eq!(config.page_size(), 10);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let mut config = Config::default();
        config.set("app.url", "https://shop.example.com/").unwrap();
        assert_eq!(config.app_url(), "https://shop.example.com");

        // SAFETY: serialized with other env tests
        unsafe { env::set_var(ENV_APP_URL, "https://override.example.com") };
        assert_eq!(config.app_url(), "https://override.example.com");
        unsafe { env::remove_var(ENV_APP_URL) };
    }

    #[test]
    #[serial]
    fn test_empty_token_is_unset() {
        unsafe { env::remove_var(ENV_TOKEN) };
        let mut config = Config::default();
        config.set("auth.token", "").unwrap();
        assert!(config.token().is_none());
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = Config::default();
        let err = config.set("theme", "dark").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
    }

    #[test]
    fn test_set_rejects_zero_page_size() {
        let mut config = Config::default();
        assert!(config.set("page_size", "0").is_err());
        assert!(config.set("page_size", "ten").is_err());
        config.set("page_size", "25").unwrap();
        assert_eq!(config.page_size(), 25);
    }

    #[test]
    fn test_rating_palette_overrides() {
        let mut config = Config::default();
        config.rating_colors.insert(5, "#000000".to_string());
        let palette = config.rating_palette().unwrap();
        assert_eq!(palette.color_for(5), Rgb(0, 0, 0));
        assert_eq!(palette.color_for(1), RatingPalette::default().color_for(1));
    }

    #[test]
    fn test_rating_color_keys() {
        let mut config = Config::default();
        assert_eq!(
            config.get("rating_colors.1").unwrap(),
            Some(RatingPalette::default().color_for(1).to_string())
        );

        config.set("rating_colors.5", "#0A0B0C").unwrap();
        assert_eq!(config.rating_colors.get(&5).map(String::as_str), Some("#0a0b0c"));
        assert_eq!(config.get("rating_colors.5").unwrap().as_deref(), Some("#0a0b0c"));
        assert_eq!(config.rating_palette().unwrap().color_for(5), Rgb(0x0a, 0x0b, 0x0c));

        assert!(config.set("rating_colors.6", "#000000").is_err());
        assert!(config.set("rating_colors.x", "#000000").is_err());
        assert!(config.set("rating_colors.3", "teal").is_err());
        assert!(config.get("rating_colors.0").is_err());
        assert!(!config.rating_colors.contains_key(&3));
    }

    #[test]
    fn test_rating_palette_rejects_bad_rating() {
        let mut config = Config::default();
        config.rating_colors.insert(9, "#000000".to_string());
        assert!(config.rating_palette().is_err());
    }

    #[test]
    fn test_auth_debug_is_redacted() {
        let mut config = Config::default();
        config.set("auth.token", "secret-token").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config.set("api.url", "https://api.example.com").unwrap();
        config.set("page_size", "20").unwrap();

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed.api.url.as_deref(), Some("https://api.example.com"));
        assert_eq!(parsed.page_size(), 20);
    }
}
