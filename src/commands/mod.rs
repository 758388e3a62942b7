mod config;
mod product;
mod show;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use product::cmd_product;
pub use show::{ShowOptions, cmd_show};

use serde_json::Value;

use crate::error::Result;

/// Output of a one-shot command in both renderings
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when `as_json`, otherwise the text (falling back to JSON)
    pub fn print(self, as_json: bool) -> Result<()> {
        match (as_json, self.text) {
            (false, Some(text)) => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}
