//! Configuration validation rules.
//!
//! - `python.version` must be `major.minor`
//! - `python.executable` must not be empty
//! - Tool names must be unique and non-empty
//! - Tool minimum versions must parse

use std::collections::HashSet;

use crate::checks::{PackageVersion, RuntimeRequirement};
use crate::config::schema::EnvcheckConfig;
use crate::error::{EnvcheckError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &EnvcheckConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_python(config));
    errors.extend(validate_tools(config));

    errors
}

fn validate_python(config: &EnvcheckConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.python.executable.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-executable",
            "python.executable must not be empty".to_string(),
        ));
    }

    if RuntimeRequirement::parse(&config.python.version).is_err() {
        errors.push(ValidationError::new(
            "invalid-runtime-version",
            format!(
                "python.version '{}' must be major.minor (e.g. \"3.9\")",
                config.python.version
            ),
        ));
    }

    errors
}

fn validate_tools(config: &EnvcheckConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for tool in &config.tools {
        if tool.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-tool-name",
                "tool names must not be empty".to_string(),
            ));
            continue;
        }

        if !seen.insert(tool.name.to_lowercase()) {
            errors.push(ValidationError::new(
                "duplicate-tool",
                format!("tool '{}' is listed more than once", tool.name),
            ));
        }

        if PackageVersion::parse(&tool.min_version).is_err() {
            errors.push(ValidationError::new(
                "invalid-tool-version",
                format!(
                    "tool '{}' has an invalid min_version '{}'",
                    tool.name, tool.min_version
                ),
            ));
        }
    }

    errors
}

/// Validate and return Result (for simple use cases).
pub fn validate(config: &EnvcheckConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(EnvcheckError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::ToolRequirement;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&EnvcheckConfig::default()).is_empty());
        assert!(validate(&EnvcheckConfig::default()).is_ok());
    }

    #[test]
    fn rejects_duplicate_tools() {
        let mut config = EnvcheckConfig::default();
        config.tools.push(ToolRequirement::new("PIP", "24.0"));

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "duplicate-tool");
    }

    #[test]
    fn rejects_bad_tool_version() {
        let mut config = EnvcheckConfig::default();
        config.tools = vec![ToolRequirement::new("wheel", "latest")];

        let errors = validate_config(&config);
        assert_eq!(errors[0].rule, "invalid-tool-version");
        assert!(errors[0].message.contains("latest"));
    }

    #[test]
    fn rejects_runtime_version_without_minor() {
        let mut config = EnvcheckConfig::default();
        config.python.version = "3".to_string();

        let errors = validate_config(&config);
        assert_eq!(errors[0].rule, "invalid-runtime-version");
    }

    #[test]
    fn rejects_empty_executable_and_tool_name() {
        let mut config = EnvcheckConfig::default();
        config.python.executable = "  ".to_string();
        config.tools = vec![ToolRequirement::new("", "1.0")];

        let rules: Vec<_> = validate_config(&config).into_iter().map(|e| e.rule).collect();
        assert_eq!(rules, vec!["empty-executable", "empty-tool-name"]);
    }

    #[test]
    fn collects_every_error() {
        let mut config = EnvcheckConfig::default();
        config.python.version = "x.y".to_string();
        config.tools = vec![
            ToolRequirement::new("pip", "nope"),
            ToolRequirement::new("pip", "23.0"),
        ];

        let err = validate(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("python.version"));
        assert!(message.contains("invalid min_version"));
        assert!(message.contains("more than once"));
    }
}
