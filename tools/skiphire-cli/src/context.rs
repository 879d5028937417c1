//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use skiphire_data::{
    CatalogLocation, CatalogSource, FetchClient, FileCatalogSource, HttpCatalogSource,
    TimeoutConfig,
};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::logging::LogFormat;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, verbose: bool, json: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output: Output::new(verbose, json),
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Log format: `--json` wins, then the config file.
    pub fn log_format(&self) -> LogFormat {
        if self.output.is_json() {
            return LogFormat::Json;
        }
        self.config.output.format.parse().unwrap_or_default()
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The catalog source: a local file when given, otherwise the
    /// configured endpoint.
    pub fn catalog_source(&self, catalog_file: Option<&str>) -> Result<Arc<dyn CatalogSource>> {
        if let Some(file) = catalog_file {
            return Ok(Arc::new(FileCatalogSource::new(self.resolve_path(file))));
        }

        let catalog = &self.config.catalog;
        let client = FetchClient::new(TimeoutConfig::from_millis(catalog.timeout_ms))
            .context("Failed to create HTTP client")?
            .with_base_url(catalog.base_url.clone());

        Ok(Arc::new(HttpCatalogSource::new(
            client,
            CatalogLocation::new(catalog.postcode.clone(), catalog.area.clone()),
        )))
    }
}
