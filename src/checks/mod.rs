//! Environment checks.
//!
//! Each check implements [`Check`] and produces exactly one [`CheckResult`]
//! per run. Checks never fail with an `Err`: an unreachable interpreter or
//! a crashed installer is reported as a failing result so the remaining
//! checks still run.
//!
//! # Modules
//!
//! - [`runtime`] - Interpreter major.minor must match exactly
//! - [`tools`] - Packaging tools must meet minimum versions
//! - [`privilege`] - Elevated-privilege status (Windows only)
//! - [`install`] - Editable install of the project must succeed
//! - [`runner`] - Runs every check and aggregates the verdict
//! - [`version`] - Version parsing and comparison

pub mod install;
pub mod privilege;
pub mod runner;
pub mod runtime;
pub mod tools;
pub mod version;

pub use install::InstallCheck;
pub use privilege::{detect_privilege_querier, PrivilegeCheck, PrivilegeQuerier, PrivilegeStatus};
pub use runner::{VerificationReport, VerificationRunner};
pub use runtime::{runtime_version_matches, RuntimeCheck};
pub use tools::{InterpreterRegistry, PackageRegistry, ToolRequirement, ToolsCheck};
pub use version::{PackageVersion, RuntimeRequirement, RuntimeVersion};

use serde::Serialize;

/// A single environment check.
pub trait Check {
    /// Stable identifier (e.g. `"runtime"`), used in JSON output.
    fn name(&self) -> &str;

    /// Human-readable label (e.g. `"Python version"`).
    fn label(&self) -> &str;

    /// Run the check.
    fn run(&self) -> CheckResult;
}

/// Category of problem a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Runtime or tool version fails its comparison.
    VersionMismatch,
    /// Required tool absent from the package registry.
    MissingDependency,
    /// The platform has no privilege query. Attached to a passing result.
    PrivilegeQueryUnavailable,
    /// Required executable not on PATH or not spawnable.
    ExecutableNotFound,
    /// A subprocess exited non-zero or could not be started.
    SubprocessFailure,
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingLevel {
    Ok,
    Fail,
    Warn,
    Info,
}

/// One line of a check's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub level: FindingLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueKind>,
}

impl Finding {
    /// A passing finding.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Ok,
            message: message.into(),
            issue: None,
        }
    }

    /// A failing finding with its issue kind.
    pub fn fail(message: impl Into<String>, issue: IssueKind) -> Self {
        Self {
            level: FindingLevel::Fail,
            message: message.into(),
            issue: Some(issue),
        }
    }

    /// A warning.
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Warn,
            message: message.into(),
            issue: None,
        }
    }

    /// An informational note.
    pub fn info(message: impl Into<String>, issue: Option<IssueKind>) -> Self {
        Self {
            level: FindingLevel::Info,
            message: message.into(),
            issue,
        }
    }
}

/// Command output kept for display after a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The command line that ran.
    pub command: String,
    /// Tail of the captured error stream.
    pub output: Vec<String>,
}

/// Outcome of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Check identifier.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// One-line summary shown next to the check label.
    pub summary: String,
    /// Per-item findings, in evaluation order.
    pub findings: Vec<Finding>,
    /// Failure diagnostics from a subprocess.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
    /// Captured standard output, shown in verbose mode only.
    #[serde(skip)]
    pub output: Option<String>,
}

impl CheckResult {
    /// A passing result.
    pub fn pass(name: &str, summary: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            summary: summary.into(),
            findings: Vec::new(),
            diagnostic: None,
            output: None,
        }
    }

    /// A failing result.
    pub fn fail(name: &str, summary: impl Into<String>) -> Self {
        Self {
            passed: false,
            ..Self::pass(name, summary)
        }
    }

    /// Attach a finding.
    pub fn with_finding(mut self, finding: Finding) -> Self {
        self.findings.push(finding);
        self
    }

    /// Attach findings.
    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings.extend(findings);
        self
    }

    /// Attach a diagnostic block.
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }

    /// Attach captured output.
    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }

    /// Issue kinds raised by this result's findings.
    pub fn issues(&self) -> Vec<IssueKind> {
        self.findings.iter().filter_map(|f| f.issue).collect()
    }
}
