//! Configuration file discovery and loading.
//!
//! An explicit `--config` path must exist. Without one, the project
//! config at `.envcheck/config.yml` is used when present and the
//! built-in defaults otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::EnvcheckConfig;
use crate::config::validator::validate;
use crate::error::{EnvcheckError, Result};

/// Directory holding the project config.
pub const CONFIG_DIR: &str = ".envcheck";

/// Project config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Path of the project config for `project_root`, whether or not it exists.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Find the project config at `.envcheck/config.yml`.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_config_path(project_root);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into EnvcheckConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<EnvcheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvcheckError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into EnvcheckConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<EnvcheckConfig> {
    if content.trim().is_empty() {
        return Ok(EnvcheckConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| EnvcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve, load, and validate the configuration for a run.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `explicit` is given but missing,
/// `ConfigParseError` for invalid YAML, and `ConfigValidationError`
/// if the loaded values are unusable.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<EnvcheckConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_project_config(project_root),
    };

    let config = match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            EnvcheckConfig::default()
        }
    };

    validate(&config)?;
    Ok(config)
}
