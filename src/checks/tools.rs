//! Packaging tool version check.
//!
//! Every required tool is looked up even after one fails, so the user sees
//! the whole picture in a single run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::shell::{CommandSpec, ProcessRunner};

use super::version::PackageVersion;
use super::{Check, CheckResult, Finding, IssueKind};

/// Prints the installed version of `sys.argv[1]` via `importlib.metadata`.
const METADATA_QUERY: &str =
    "import sys, importlib.metadata as m; print(m.version(sys.argv[1]))";

/// A tool that must be installed at or above `min_version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequirement {
    /// Distribution name as known to the package registry.
    pub name: String,
    /// Minimum acceptable version (inclusive).
    pub min_version: String,
}

impl ToolRequirement {
    pub fn new(name: &str, min_version: &str) -> Self {
        Self {
            name: name.to_string(),
            min_version: min_version.to_string(),
        }
    }
}

/// The tools required when no configuration overrides them.
pub fn default_tool_requirements() -> Vec<ToolRequirement> {
    vec![
        ToolRequirement::new("pip", "23.0.0"),
        ToolRequirement::new("setuptools", "67.0.0"),
        ToolRequirement::new("wheel", "0.40.0"),
    ]
}

/// Source of installed package versions.
pub trait PackageRegistry {
    /// Installed version of `name`, or `None` if it is not installed.
    fn installed_version(&self, name: &str) -> Result<Option<String>>;
}

/// [`PackageRegistry`] that asks the interpreter's `importlib.metadata`.
pub struct InterpreterRegistry {
    interpreter: PathBuf,
    runner: Box<dyn ProcessRunner>,
}

impl InterpreterRegistry {
    pub fn new(interpreter: impl Into<PathBuf>, runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            interpreter: interpreter.into(),
            runner,
        }
    }
}

impl PackageRegistry for InterpreterRegistry {
    fn installed_version(&self, name: &str) -> Result<Option<String>> {
        let spec = CommandSpec::new(&self.interpreter).args(["-c", METADATA_QUERY, name]);
        let result = self.runner.run(&spec)?;

        if result.success {
            let version = result.stdout.trim().to_string();
            tracing::debug!("Registry reports {} {}", name, version);
            return Ok(Some(version));
        }

        if result.stderr.contains("PackageNotFoundError") {
            tracing::debug!("Registry has no distribution named {}", name);
            return Ok(None);
        }

        let reason = result
            .stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("no error output")
            .trim()
            .to_string();
        Err(anyhow::anyhow!(
            "metadata query exited with {:?}: {}",
            result.exit_code,
            reason
        )
        .into())
    }
}

/// Checks installed tool versions against their minimums.
pub struct ToolsCheck {
    requirements: Vec<ToolRequirement>,
    registry: Box<dyn PackageRegistry>,
}

impl ToolsCheck {
    pub fn new(requirements: Vec<ToolRequirement>, registry: Box<dyn PackageRegistry>) -> Self {
        Self {
            requirements,
            registry,
        }
    }

    /// Evaluate a single requirement into one finding.
    fn evaluate(&self, req: &ToolRequirement) -> Finding {
        let installed = match self.registry.installed_version(&req.name) {
            Ok(Some(v)) => v,
            Ok(None) => {
                return Finding::fail(
                    format!("{} is not installed", req.name),
                    IssueKind::MissingDependency,
                );
            }
            Err(e) => {
                return Finding::fail(
                    format!("could not query {}: {}", req.name, e),
                    IssueKind::MissingDependency,
                );
            }
        };

        let required = match PackageVersion::parse(&req.min_version) {
            Ok(v) => v,
            Err(e) => {
                return Finding::fail(
                    format!("{}: bad minimum version: {}", req.name, e),
                    IssueKind::VersionMismatch,
                );
            }
        };
        let found = match PackageVersion::parse(&installed) {
            Ok(v) => v,
            Err(e) => {
                return Finding::fail(
                    format!("{}: bad installed version: {}", req.name, e),
                    IssueKind::VersionMismatch,
                );
            }
        };

        if found < required {
            Finding::fail(
                format!("{} is too old ({} < {})", req.name, found, required),
                IssueKind::VersionMismatch,
            )
        } else {
            Finding::ok(format!("{} version OK: {}", req.name, found))
        }
    }
}

impl Check for ToolsCheck {
    fn name(&self) -> &str {
        "tools"
    }

    fn label(&self) -> &str {
        "Packaging tools"
    }

    fn run(&self) -> CheckResult {
        let findings: Vec<Finding> = self
            .requirements
            .iter()
            .map(|req| self.evaluate(req))
            .collect();

        let problems = findings.iter().filter(|f| f.issue.is_some()).count();
        let result = if problems == 0 {
            CheckResult::pass(
                self.name(),
                format!("{} tools OK", findings.len()),
            )
        } else {
            let phrase = if problems == 1 {
                "tool needs"
            } else {
                "tools need"
            };
            CheckResult::fail(self.name(), format!("{} {} attention", problems, phrase))
        };
        result.with_findings(findings)
    }
}
