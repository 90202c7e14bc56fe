//! Interpreter version check.

use std::path::PathBuf;

use crate::shell::{CommandSpec, ProcessRunner};

use super::version::{RuntimeRequirement, RuntimeVersion};
use super::{Check, CheckResult, Finding, IssueKind};

/// Whether `found` matches `required` exactly on major and minor.
///
/// The patch level is ignored: 3.9.4 satisfies 3.9, 3.10.0 does not.
pub fn runtime_version_matches(found: &RuntimeVersion, required: RuntimeRequirement) -> bool {
    found.major == required.major && found.minor == required.minor
}

/// Checks that the interpreter reports the required `major.minor`.
pub struct RuntimeCheck {
    interpreter: PathBuf,
    required: RuntimeRequirement,
    runner: Box<dyn ProcessRunner>,
}

impl RuntimeCheck {
    pub fn new(
        interpreter: impl Into<PathBuf>,
        required: RuntimeRequirement,
        runner: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            required,
            runner,
        }
    }

    /// Ask the interpreter for its version.
    fn query_version(&self) -> Result<RuntimeVersion, Finding> {
        let spec = CommandSpec::new(&self.interpreter).args(["--version"]);
        let result = self.runner.run(&spec).map_err(|e| {
            Finding::fail(
                format!(
                    "Could not run {}: {}",
                    self.interpreter.display(),
                    e
                ),
                IssueKind::ExecutableNotFound,
            )
        })?;

        // Interpreters before 3.4 print the version on stderr.
        RuntimeVersion::from_output(&result.stdout)
            .or_else(|| RuntimeVersion::from_output(&result.stderr))
            .ok_or_else(|| {
                Finding::fail(
                    format!(
                        "Could not determine version from '{}'",
                        spec.display()
                    ),
                    IssueKind::VersionMismatch,
                )
            })
    }
}

impl Check for RuntimeCheck {
    fn name(&self) -> &str {
        "runtime"
    }

    fn label(&self) -> &str {
        "Python version"
    }

    fn run(&self) -> CheckResult {
        let found = match self.query_version() {
            Ok(v) => v,
            Err(finding) => {
                return CheckResult::fail(
                    self.name(),
                    format!("Python {}.x is required", self.required),
                )
                .with_finding(finding);
            }
        };

        tracing::debug!("Interpreter reports {:?}", found);

        if runtime_version_matches(&found, self.required) {
            CheckResult::pass(self.name(), format!("Python version OK: {}", found))
        } else {
            let message = format!("Python {}.x is required, found {}", self.required, found);
            CheckResult::fail(self.name(), message.clone())
                .with_finding(Finding::fail(message, IssueKind::VersionMismatch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EnvcheckError, Result};
    use crate::shell::CommandResult;
    use std::time::Duration;

    struct FixedOutput {
        stdout: &'static str,
        stderr: &'static str,
    }

    impl ProcessRunner for FixedOutput {
        fn run(&self, _spec: &CommandSpec) -> Result<CommandResult> {
            Ok(CommandResult::success(
                self.stdout.to_string(),
                self.stderr.to_string(),
                Duration::ZERO,
            ))
        }
    }

    struct Unspawnable;

    impl ProcessRunner for Unspawnable {
        fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
            Err(EnvcheckError::CommandFailed {
                command: spec.display(),
                reason: "not found".into(),
            })
        }
    }

    fn check_with(stdout: &'static str, stderr: &'static str) -> RuntimeCheck {
        RuntimeCheck::new(
            "python",
            RuntimeRequirement::default(),
            Box::new(FixedOutput { stdout, stderr }),
        )
    }

    #[test]
    fn exact_minor_with_any_patch_matches() {
        let required = RuntimeRequirement::new(3, 9);
        assert!(runtime_version_matches(&RuntimeVersion::new(3, 9, 4), required));
    }

    #[test]
    fn newer_minor_does_not_match() {
        let required = RuntimeRequirement::new(3, 9);
        assert!(!runtime_version_matches(&RuntimeVersion::new(3, 10, 0), required));
    }

    #[test]
    fn older_minor_does_not_match() {
        let required = RuntimeRequirement::new(3, 9);
        assert!(!runtime_version_matches(&RuntimeVersion::new(3, 8, 9), required));
    }

    #[test]
    fn other_major_does_not_match() {
        let required = RuntimeRequirement::new(3, 9);
        assert!(!runtime_version_matches(&RuntimeVersion::new(2, 9, 0), required));
    }

    #[test]
    fn passes_for_matching_interpreter() {
        let result = check_with("Python 3.9.18\n", "").run();
        assert!(result.passed);
        assert_eq!(result.summary, "Python version OK: 3.9.18");
        assert!(result.findings.is_empty());
    }

    #[test]
    fn fails_with_mismatch_finding() {
        let result = check_with("Python 3.11.2\n", "").run();
        assert!(!result.passed);
        assert_eq!(result.issues(), vec![IssueKind::VersionMismatch]);
        assert!(result.summary.contains("3.9.x is required"));
        assert!(result.summary.contains("3.11.2"));
    }

    #[test]
    fn reads_version_from_stderr() {
        let result = check_with("", "Python 3.9.1\n").run();
        assert!(result.passed);
    }

    #[test]
    fn unparseable_output_fails() {
        let result = check_with("hello", "").run();
        assert!(!result.passed);
        assert_eq!(result.issues(), vec![IssueKind::VersionMismatch]);
    }

    #[test]
    fn missing_interpreter_fails_without_panicking() {
        let check = RuntimeCheck::new("python", RuntimeRequirement::default(), Box::new(Unspawnable));
        let result = check.run();
        assert!(!result.passed);
        assert_eq!(result.issues(), vec![IssueKind::ExecutableNotFound]);
    }
}
