//! Editable-install check.
//!
//! This check has a real side effect: it runs `pip install -e .` against
//! the project and leaves whatever that installs in place.

use std::path::PathBuf;

use crate::shell::{tail_lines, CommandSpec, PathLookup, ProcessRunner};

use super::{Check, CheckResult, Diagnostic, Finding, IssueKind};

/// Lines of installer stderr kept when the install fails.
pub const DEFAULT_STDERR_TAIL: usize = 10;

/// Installer arguments passed after the interpreter.
const INSTALL_ARGS: [&str; 5] = ["-m", "pip", "install", "-e", "."];

/// Checks that the project installs in editable mode.
pub struct InstallCheck {
    interpreter: String,
    project_root: PathBuf,
    stderr_tail: usize,
    lookup: Box<dyn PathLookup>,
    runner: Box<dyn ProcessRunner>,
}

impl InstallCheck {
    pub fn new(
        interpreter: &str,
        project_root: impl Into<PathBuf>,
        lookup: Box<dyn PathLookup>,
        runner: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            interpreter: interpreter.to_string(),
            project_root: project_root.into(),
            stderr_tail: DEFAULT_STDERR_TAIL,
            lookup,
            runner,
        }
    }

    /// Keep `lines` lines of stderr on failure instead of the default.
    pub fn with_stderr_tail(mut self, lines: usize) -> Self {
        self.stderr_tail = lines;
        self
    }
}

impl Check for InstallCheck {
    fn name(&self) -> &str {
        "install"
    }

    fn label(&self) -> &str {
        "Editable install"
    }

    fn run(&self) -> CheckResult {
        let Some(executable) = self.lookup.find(&self.interpreter) else {
            let message = format!("{} not found in PATH", self.interpreter);
            return CheckResult::fail(self.name(), message.clone())
                .with_finding(Finding::fail(message, IssueKind::ExecutableNotFound));
        };

        let spec = CommandSpec::new(executable)
            .args(INSTALL_ARGS)
            .cwd(&self.project_root);

        let result = match self.runner.run(&spec) {
            Ok(r) => r,
            Err(e) => {
                return CheckResult::fail(self.name(), "Editable install failed")
                    .with_finding(Finding::fail(e.to_string(), IssueKind::SubprocessFailure));
            }
        };

        if result.success {
            return CheckResult::pass(self.name(), "Editable install worked")
                .with_output(result.stdout);
        }

        let exit = match result.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        CheckResult::fail(self.name(), "Editable install failed")
            .with_finding(Finding::fail(
                format!("{} failed with {}", spec.display(), exit),
                IssueKind::SubprocessFailure,
            ))
            .with_diagnostic(Diagnostic {
                command: spec.display(),
                output: tail_lines(&result.stderr, self.stderr_tail),
            })
            .with_output(result.stdout)
    }
}
