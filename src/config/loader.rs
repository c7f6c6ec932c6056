//! Configuration file discovery and loading.
//!
//! An explicit `--config` path must exist. Otherwise `.swaudit/config.yml`
//! under the working directory is used when present, and built-in defaults
//! when it is not.

use crate::config::schema::AuditConfig;
use crate::error::{AuditError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".swaudit";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Find `.swaudit/config.yml` under `root`.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_DIR).join(CONFIG_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Parse YAML content into an [`AuditConfig`].
///
/// Relative catalog paths are resolved against the config file's directory.
pub fn parse_config(content: &str, source_path: &Path) -> Result<AuditConfig> {
    if content.trim().is_empty() {
        return Ok(AuditConfig::default());
    }

    let mut config: AuditConfig =
        serde_yaml::from_str(content).map_err(|e| AuditError::ConfigParse {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let (Some(catalog), Some(base)) = (&config.catalog, source_path.parent()) {
        if catalog.is_relative() {
            config.catalog = Some(base.join(catalog));
        }
    }

    Ok(config)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<AuditConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AuditError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AuditError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Load config with optional path override.
pub fn load_config(root: &Path, config_override: Option<&Path>) -> Result<AuditConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => match find_config(root) {
            Some(path) => load_config_file(&path),
            None => Ok(AuditConfig::default()),
        },
    }
}
