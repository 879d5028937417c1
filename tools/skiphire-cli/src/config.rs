//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skiphire_data::{DEFAULT_AREA, DEFAULT_BASE_URL, DEFAULT_POSTCODE};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["skiphire.toml", ".skiphire.toml", "skiphire.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog endpoint configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text; `.json` paths are JSON, anything else TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Where the catalog is fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API host.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Postcode to fetch skips for.
    #[serde(default = "default_postcode")]
    pub postcode: String,

    /// Area to fetch skips for.
    #[serde(default = "default_area")]
    pub area: String,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_postcode() -> String {
    DEFAULT_POSTCODE.to_string()
}

fn default_area() -> String {
    DEFAULT_AREA.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            postcode: default_postcode(),
            area: default_area(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Log format: "human" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "human".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// Generate a default skiphire.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Skiphire configuration

[catalog]
base_url = "{base_url}"
postcode = "{postcode}"
area = "{area}"
timeout_ms = {timeout_ms}

[output]
# "human" or "json"
format = "human"
"#,
        base_url = DEFAULT_BASE_URL,
        postcode = DEFAULT_POSTCODE,
        area = DEFAULT_AREA,
        timeout_ms = default_timeout_ms(),
    )
}
