//! Configuration commands.
//!
//! - `config show`: Display the effective configuration
//! - `config get`: Print one value
//! - `config set`: Write one value to `.storefront/config.yaml`

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::Config;
use crate::error::{Result, StorefrontError};

const SENSITIVE_KEYS: &[&str] = &["auth.token"];

/// Reject underscore spellings of dotted keys with a suggestion
fn validate_config_key(key: &str) -> Result<&str> {
    if key == "page_size" || key.starts_with("rating_colors.") {
        return Ok(key);
    }
    if let Some(pos) = key.find('_') {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(StorefrontError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }
    Ok(key)
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(as_json: bool) -> Result<()> {
    let config = Config::load()?;
    let token_configured = config.token().is_some();

    let json_output = json!({
        "api": { "url": config.api_url() },
        "app": { "url": config.app_url() },
        "auth": { "token_configured": token_configured },
        "page_size": config.page_size(),
        "rating_colors": config.rating_colors,
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));
    text_output.push_str(&format!("{}: {}\n", "api.url".cyan(), config.api_url()));
    text_output.push_str(&format!("{}: {}\n", "app.url".cyan(), config.app_url()));

    // Auth status (don't show the token)
    let token_status = if token_configured {
        "configured".green().to_string()
    } else {
        "not configured".dimmed().to_string()
    };
    text_output.push_str(&format!("{}: {token_status}\n", "auth.token".cyan()));
    text_output.push_str(&format!("{}: {}\n", "page_size".cyan(), config.page_size()));

    if !config.rating_colors.is_empty() {
        text_output.push_str(&format!("{}:\n", "rating_colors".cyan()));
        for (rating, color) in &config.rating_colors {
            text_output.push_str(&format!("  {rating}: {color}\n"));
        }
    }

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(as_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, as_json: bool) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let sensitive = SENSITIVE_KEYS.contains(&key);
    let json_output = if sensitive {
        json!({ "action": "config_set", "key": key, "success": true })
    } else {
        json!({ "action": "config_set", "key": key, "value": value, "success": true })
    };
    let text_output = if sensitive {
        format!("Set {}", key.cyan())
    } else {
        format!("Set {} to {}", key.cyan(), value)
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(as_json)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, as_json: bool) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;
    let value = config.get(key)?;
    let sensitive = SENSITIVE_KEYS.contains(&key);

    let (json_output, text_output) = match value {
        Some(value) if sensitive => {
            let masked = mask_sensitive_value(&value);
            (
                json!({ "key": key, "value": masked, "configured": true, "masked": true }),
                format!("{masked} (masked - showing first 2 and last 2 characters)"),
            )
        }
        Some(value) => (json!({ "key": key, "value": value }), value),
        None => (
            json!({ "key": key, "value": null, "configured": false }),
            "not configured".to_string(),
        ),
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(as_json)
}
