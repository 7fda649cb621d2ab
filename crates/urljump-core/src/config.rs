use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::i18n::Locale;

/// Written on first run. Parses to [`Config::default`].
const DEFAULT_CONFIG: &str = r#"# urljump configuration

# UI language: "en" or "zh-hans"
locale = "en"

# Tracing filter, overridden by URLJUMP_LOG
log_filter = "info"

# Prefilled when the form opens
default_host = ""
default_route = ""

# Program that receives the URL as its last argument.
# Unset opens the URL with the desktop's default handler.
# open_command = ["adb", "shell", "am", "start", "-a", "android.intent.action.VIEW", "-d"]
"#;

/// Configuration loaded from `~/.config/urljump/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI language ("en" or "zh-hans").
    pub locale: Locale,
    /// Tracing filter used when `URLJUMP_LOG` is not set.
    pub log_filter: String,
    /// Host prefilled when the form opens.
    pub default_host: String,
    /// Route prefilled when the form opens.
    pub default_route: String,
    /// Program (plus leading args) that receives the URL as its last argument.
    /// Unset means the desktop's default handler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_command: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            log_filter: "info".to_string(),
            default_host: String::new(),
            default_route: String::new(),
            open_command: None,
        }
    }
}

impl Config {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).context("Invalid config")
    }

    /// Load the config at `path`, writing a default file if none exists.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            let cfg = Self::from_toml(DEFAULT_CONFIG)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            fs::write(path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            tracing::info!("created default config at {}", path.display());
            return Ok(cfg);
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("In {}", path.display()))
    }
}
