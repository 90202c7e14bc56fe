//! Integration tests for assembling and running checks through the public API.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use envcheck::checks::privilege::UnsupportedPlatform;
use envcheck::checks::{
    Check, CheckResult, InstallCheck, IssueKind, PackageRegistry, PrivilegeCheck, RuntimeCheck,
    RuntimeRequirement, ToolRequirement, ToolsCheck, VerificationRunner,
};
use envcheck::shell::{CommandResult, CommandSpec, PathLookup, ProcessRunner};
use envcheck::ui::MockUI;

/// Answers `--version` and the install command, recording every call.
struct FakeInterpreter {
    version_output: &'static str,
    install_ok: bool,
    calls: Rc<RefCell<Vec<String>>>,
}

impl ProcessRunner for FakeInterpreter {
    fn run(&self, spec: &CommandSpec) -> envcheck::Result<CommandResult> {
        self.calls.borrow_mut().push(spec.display());
        if spec.args == ["--version"] {
            return Ok(CommandResult::success(
                self.version_output.to_string(),
                String::new(),
                Duration::ZERO,
            ));
        }
        if self.install_ok {
            Ok(CommandResult::success(String::new(), String::new(), Duration::ZERO))
        } else {
            Ok(CommandResult::failure(
                Some(1),
                String::new(),
                "ERROR: Project has no setup.py or pyproject.toml".to_string(),
                Duration::ZERO,
            ))
        }
    }
}

struct FoundOnPath;

impl PathLookup for FoundOnPath {
    fn find(&self, name: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/usr/bin").join(name))
    }
}

struct Installed(&'static [(&'static str, &'static str)]);

impl PackageRegistry for Installed {
    fn installed_version(&self, name: &str) -> envcheck::Result<Option<String>> {
        Ok(self
            .0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.to_string()))
    }
}

fn runner(
    version_output: &'static str,
    installed: &'static [(&'static str, &'static str)],
    install_ok: bool,
) -> (VerificationRunner, Rc<RefCell<Vec<String>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let interpreter = || {
        Box::new(FakeInterpreter {
            version_output,
            install_ok,
            calls: Rc::clone(&calls),
        })
    };
    let checks: Vec<Box<dyn Check>> = vec![
        Box::new(RuntimeCheck::new(
            "python",
            RuntimeRequirement::new(3, 9),
            interpreter(),
        )),
        Box::new(ToolsCheck::new(
            vec![
                ToolRequirement::new("pip", "23.0.0"),
                ToolRequirement::new("setuptools", "67.0.0"),
                ToolRequirement::new("wheel", "0.40.0"),
            ],
            Box::new(Installed(installed)),
        )),
        Box::new(PrivilegeCheck::new(Box::new(UnsupportedPlatform))),
        Box::new(InstallCheck::new(
            "python",
            "/work/project",
            Box::new(FoundOnPath),
            interpreter(),
        )),
    ];
    (VerificationRunner::new(checks), calls)
}

const GOOD_TOOLS: &[(&str, &str)] = &[("pip", "23.3.1"), ("setuptools", "69.0.3"), ("wheel", "0.42.0")];

#[test]
fn healthy_environment_is_verified() {
    let (runner, calls) = runner("Python 3.9.18", GOOD_TOOLS, true);
    let mut ui = MockUI::new();

    let report = runner.run(&mut ui);

    assert!(report.passed);
    assert!(ui.has_success("Environment verified!"));
    assert_eq!(
        *calls.borrow(),
        vec![
            "python --version".to_string(),
            "/usr/bin/python -m pip install -e .".to_string(),
        ]
    );
}

#[test]
fn wrong_runtime_still_runs_install() {
    let (runner, calls) = runner("Python 3.10.0", GOOD_TOOLS, true);
    let mut ui = MockUI::new();

    let report = runner.run(&mut ui);

    assert!(!report.passed);
    assert_eq!(report.failed_checks(), vec!["runtime"]);
    assert_eq!(calls.borrow().len(), 2);
    assert!(ui.has_error("Python 3.9.x is required, found 3.10.0"));
    assert!(ui.has_error("Issues found. See above."));
}

#[test]
fn old_tool_and_failed_install_are_both_reported() {
    let tools: &'static [(&str, &str)] = &[("pip", "22.0.0"), ("setuptools", "69.0.3"), ("wheel", "0.42.0")];
    let (runner, _) = runner("Python 3.9.4", tools, false);
    let mut ui = MockUI::new();

    let report = runner.run(&mut ui);

    assert_eq!(report.failed_checks(), vec!["tools", "install"]);
    assert!(ui.has_error("pip is too old (22.0.0 < 23.0.0)"));
    assert_eq!(ui.error_blocks().len(), 1);
    assert!(ui.error_blocks()[0].1.contains("no setup.py"));

    let install: &CheckResult = report.result("install").unwrap();
    assert_eq!(install.issues(), vec![IssueKind::SubprocessFailure]);
}

#[test]
fn unsupported_privilege_query_is_informational() {
    let (runner, _) = runner("Python 3.9.18", GOOD_TOOLS, true);
    let report = runner.collect();

    let privilege = report.result("privilege").unwrap();
    assert!(privilege.passed);
    assert_eq!(privilege.issues(), vec![IssueKind::PrivilegeQueryUnavailable]);
}
