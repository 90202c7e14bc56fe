//! Configuration loading, parsing, and validation for envcheck.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use envcheck::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".envcheck");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "python:\n  version: \"3.11\"").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.python.version, "3.11");
//! assert_eq!(config.tools.len(), 3);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_config, load_config, load_config_file, parse_config, project_config_path,
    CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{EnvcheckConfig, InstallConfig, PythonConfig};
pub use validator::{validate, validate_config, ValidationError};

#[cfg(test)]
mod tests {
    #[test]
    fn serde_yaml_parses_nested_tool_lists() {
        let yaml = r#"
          tools:
            - name: pip
              min_version: "23.0.0"
            - name: wheel
              min_version: "0.40.0"
        "#;
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed["tools"][0]["name"], "pip");
        assert_eq!(parsed["tools"][1]["min_version"], "0.40.0");
    }
}
