//! Configuration file support for component-history.
//!
//! Provides YAML-based configuration through `component-history.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::component_history::domain::Repository;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "component-history.config.yml";

/// Top-level configuration file schema.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Repository coordinates as `owner/name`
    pub repository: Option<String>,
    /// Path of the tracked file with `{version}` and `{flavor}` placeholders
    pub path_template: Option<String>,
    pub app_version: Option<String>,
    pub os_flavor: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub arch_placeholder: Option<String>,
    pub arch: Option<String>,
    pub prioritized_columns: Option<Vec<String>>,
    pub dimensions: Option<Vec<String>>,
    pub state_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
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
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax and known format names.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    log::debug!("Loaded config file {}", path.display());
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
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: Use a request timeout in seconds, e.g. `timeout_secs: 30`."
        );
    }

    if let Some(ref repository) = config.repository {
        repository.parse::<Repository>().with_context(|| {
            format!(
                "Invalid config: repository '{}' is not of the form owner/name.",
                repository
            )
        })?;
    }

    if let Some(ref api_url) = config.api_url {
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            bail!(
                "Invalid config: api_url '{}' must start with http:// or https://.",
                api_url
            );
        }
    }

    if let Some(ref template) = config.path_template {
        if template.trim().is_empty() {
            bail!("Invalid config: path_template must not be empty.");
        }
    }

    if let Some(ref dimensions) = config.dimensions {
        if dimensions.is_empty() {
            bail!(
                "Invalid config: dimensions must list at least one column.\n\n\
                 💡 Hint: Remove the field to filter on IMAGE_VERSION and IMAGE_REF_NAME."
            );
        }
        for (i, dimension) in dimensions.iter().enumerate() {
            if dimension.trim().is_empty() {
                bail!("Invalid config: dimensions[{}] must not be empty.", i);
            }
        }
    }

    if let Some(ref columns) = config.prioritized_columns {
        for (i, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                bail!("Invalid config: prioritized_columns[{}] must not be empty.", i);
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
