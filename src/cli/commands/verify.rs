//! Verify command implementation.
//!
//! `envcheck verify` (and bare `envcheck`) loads the configuration, runs
//! every check, and exits non-zero if any of them failed.

use std::path::{Path, PathBuf};

use crate::checks::{VerificationReport, VerificationRunner};
use crate::cli::args::VerifyArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The verify command implementation.
pub struct VerifyCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(project_root: &Path, args: VerifyArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
        }
    }

    /// Use an explicit config file.
    pub fn with_config(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    fn report_json(report: &VerificationReport, ui: &mut dyn UserInterface) -> Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(anyhow::Error::from)?;
        ui.message(&json);
        Ok(())
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        tracing::debug!(
            "Verifying {} with interpreter '{}'",
            self.project_root.display(),
            config.python.executable
        );

        let runner = VerificationRunner::from_config(&config, &self.project_root);
        let report = if self.args.json {
            let report = runner.collect();
            Self::report_json(&report, ui)?;
            report
        } else {
            runner.run(ui)
        };

        if report.passed {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvcheckError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    /// A project whose config names an interpreter that cannot exist.
    fn project_with_missing_interpreter() -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".envcheck");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yml"),
            "python:\n  executable: envcheck-test-no-such-python\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn missing_interpreter_fails_every_interpreter_check() {
        let temp = project_with_missing_interpreter();
        let cmd = VerifyCommand::new(temp.path(), VerifyArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.spinners().len(), 4);
        assert!(ui.has_error("Issues found. See above."));
        assert!(ui.has_error("envcheck-test-no-such-python not found in PATH"));
    }

    #[test]
    fn json_report_lists_all_checks() {
        let temp = project_with_missing_interpreter();
        let cmd = VerifyCommand::new(temp.path(), VerifyArgs { json: true });
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.headers().is_empty());
        assert!(ui.spinners().is_empty());

        let report: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(report["passed"], false);
        let names: Vec<&str> = report["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["runtime", "tools", "privilege", "install"]);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cmd = VerifyCommand::new(temp.path(), VerifyArgs::default())
            .with_config(Some(temp.path().join("absent.yml")));
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, EnvcheckError::ConfigNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(ui.spinners().is_empty());
    }
}
