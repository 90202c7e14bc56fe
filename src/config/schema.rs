//! Configuration schema definitions for envcheck.
//!
//! These structs map to `.envcheck/config.yml`. Every section is optional
//! and falls back to the built-in requirements.

use serde::{Deserialize, Serialize};

use crate::checks::install::DEFAULT_STDERR_TAIL;
use crate::checks::tools::default_tool_requirements;
use crate::checks::{RuntimeRequirement, ToolRequirement};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvcheckConfig {
    /// Interpreter settings
    pub python: PythonConfig,

    /// Packaging tools and their minimum versions, in check order
    #[serde(default = "default_tool_requirements")]
    pub tools: Vec<ToolRequirement>,

    /// Editable install settings
    pub install: InstallConfig,
}

impl Default for EnvcheckConfig {
    fn default() -> Self {
        Self {
            python: PythonConfig::default(),
            tools: default_tool_requirements(),
            install: InstallConfig::default(),
        }
    }
}

/// Interpreter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Interpreter name looked up on PATH
    pub executable: String,

    /// Required `major.minor`
    pub version: String,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            executable: "python".to_string(),
            version: RuntimeRequirement::default().to_string(),
        }
    }
}

impl PythonConfig {
    /// The parsed version requirement.
    ///
    /// Falls back to the default when `version` is malformed; validation
    /// rejects such configs before any check runs.
    pub fn required_version(&self) -> RuntimeRequirement {
        RuntimeRequirement::parse(&self.version).unwrap_or_default()
    }
}

/// Editable install settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Lines of installer stderr kept on failure
    pub stderr_tail: usize,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            stderr_tail: DEFAULT_STDERR_TAIL,
        }
    }
}
