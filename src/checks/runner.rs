//! Verification runner.
//!
//! Runs every check in order and combines the results with logical AND.
//! Nothing short-circuits: a failing first check does not stop the others.

use std::path::Path;

use serde::Serialize;

use crate::config::EnvcheckConfig;
use crate::shell::{SystemPath, SystemRunner};
use crate::ui::UserInterface;

use super::{
    detect_privilege_querier, Check, CheckResult, FindingLevel, InstallCheck,
    InterpreterRegistry, PrivilegeCheck, RuntimeCheck, ToolsCheck,
};

/// Banner printed when every check passed.
pub const SUCCESS_BANNER: &str = "Environment verified!";

/// Banner printed when at least one check failed.
pub const FAILURE_BANNER: &str = "Issues found. See above.";

/// Hint attached to a diagnostic block unless command output is shown.
pub const VERBOSE_HINT: &str = "Run with --verbose to see the full command output";

/// Logical AND over check outcomes. An empty set is vacuously true.
pub fn aggregate(outcomes: &[bool]) -> bool {
    outcomes.iter().all(|passed| *passed)
}

/// Outcome of a full verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Logical AND of every result.
    pub passed: bool,
    /// One result per check, in run order.
    pub results: Vec<CheckResult>,
}

impl VerificationReport {
    /// Build a report, computing the aggregate once.
    pub fn new(results: Vec<CheckResult>) -> Self {
        let outcomes: Vec<bool> = results.iter().map(|r| r.passed).collect();
        Self {
            passed: aggregate(&outcomes),
            results,
        }
    }

    /// Look up a result by check name.
    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Names of the checks that failed.
    pub fn failed_checks(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Runs a fixed, ordered list of checks.
pub struct VerificationRunner {
    checks: Vec<Box<dyn Check>>,
}

impl VerificationRunner {
    /// Create a runner over the given checks, run in the order given.
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    /// The standard four checks, wired to the real system.
    pub fn from_config(config: &EnvcheckConfig, project_root: &Path) -> Self {
        let interpreter = config.python.executable.as_str();
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(RuntimeCheck::new(
                interpreter,
                config.python.required_version(),
                Box::new(SystemRunner),
            )),
            Box::new(ToolsCheck::new(
                config.tools.clone(),
                Box::new(InterpreterRegistry::new(interpreter, Box::new(SystemRunner))),
            )),
            Box::new(PrivilegeCheck::new(detect_privilege_querier())),
            Box::new(
                InstallCheck::new(
                    interpreter,
                    project_root,
                    Box::new(SystemPath),
                    Box::new(SystemRunner),
                )
                .with_stderr_tail(config.install.stderr_tail),
            ),
        ];
        Self::new(checks)
    }

    /// Names of the configured checks, in run order.
    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check without rendering anything.
    pub fn collect(&self) -> VerificationReport {
        let results = self
            .checks
            .iter()
            .map(|check| {
                tracing::debug!("Running check '{}'", check.name());
                check.run()
            })
            .collect();
        VerificationReport::new(results)
    }

    /// Run every check, printing each result as soon as it is known,
    /// then print the final banner.
    ///
    /// In quiet mode only the per-check result lines, problems, diagnostic
    /// blocks, and the banner are printed.
    pub fn run(&self, ui: &mut dyn UserInterface) -> VerificationReport {
        let details = ui.output_mode().shows_details();
        if details {
            ui.show_header("Verifying environment...");
        }

        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            tracing::debug!("Running check '{}'", check.name());
            let mut spinner = ui.start_spinner(&format!("Checking {}...", check.label()));
            let result = check.run();

            let line = format!("{}: {}", check.label(), result.summary);
            if result.passed {
                spinner.finish_success(&line);
            } else {
                spinner.finish_error(&line);
            }
            render_details(ui, &result);
            results.push(result);
        }

        let report = VerificationReport::new(results);
        if details {
            ui.message("");
        }
        if report.passed {
            ui.success(SUCCESS_BANNER);
        } else {
            tracing::debug!("Failed checks: {:?}", report.failed_checks());
            ui.error(FAILURE_BANNER);
        }
        report
    }
}

/// Print a result's findings, diagnostic block, and (verbose) output.
fn render_details(ui: &mut dyn UserInterface, result: &CheckResult) {
    let mode = ui.output_mode();
    for finding in &result.findings {
        let line = format!("  {}", finding.message);
        match finding.level {
            FindingLevel::Ok if mode.shows_details() => ui.success(&line),
            FindingLevel::Info if mode.shows_details() => ui.message(&line),
            FindingLevel::Ok | FindingLevel::Info => {}
            FindingLevel::Fail => ui.error(&line),
            FindingLevel::Warn => ui.warning(&line),
        }
    }

    if let Some(diagnostic) = &result.diagnostic {
        let hint = (!mode.shows_command_output()).then_some(VERBOSE_HINT);
        ui.show_error_block(
            &diagnostic.command,
            &diagnostic.output.join("\n"),
            hint,
        );
    }

    if mode.shows_command_output() {
        if let Some(output) = result.output.as_deref().filter(|o| !o.trim().is_empty()) {
            ui.message(output.trim_end());
        }
    }
}
