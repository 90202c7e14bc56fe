//! Elevated-privilege check.
//!
//! Only Windows has a meaningful admin query here. Everywhere else the
//! check is *not applicable* and passes with an informational note: being
//! unable to ask is not treated as a failure. This is the one check that
//! is lenient by default.

use crate::shell::os_name;

use super::{Check, CheckResult, Finding, IssueKind};

/// Outcome of a privilege query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeStatus {
    /// Running with administrator rights.
    Elevated,
    /// Running as a regular user.
    NotElevated,
    /// This platform has no privilege query.
    NotApplicable,
}

/// Capability for asking the OS whether the process is elevated.
pub trait PrivilegeQuerier {
    fn query(&self) -> PrivilegeStatus;
}

/// Queries shell32's `IsUserAnAdmin`.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsAdminQuerier;

#[cfg(windows)]
impl PrivilegeQuerier for WindowsAdminQuerier {
    fn query(&self) -> PrivilegeStatus {
        // SAFETY: IsUserAnAdmin takes no arguments and only reads the
        // current process token.
        let is_admin = unsafe { windows_sys::Win32::UI::Shell::IsUserAnAdmin() } != 0;
        if is_admin {
            PrivilegeStatus::Elevated
        } else {
            PrivilegeStatus::NotElevated
        }
    }
}

/// Querier for platforms without an admin query.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl PrivilegeQuerier for UnsupportedPlatform {
    fn query(&self) -> PrivilegeStatus {
        PrivilegeStatus::NotApplicable
    }
}

/// Select the querier available on this platform.
pub fn detect_privilege_querier() -> Box<dyn PrivilegeQuerier> {
    #[cfg(windows)]
    {
        Box::new(WindowsAdminQuerier)
    }

    #[cfg(not(windows))]
    {
        Box::new(UnsupportedPlatform)
    }
}

/// Checks that the process runs elevated where that can be determined.
pub struct PrivilegeCheck {
    querier: Box<dyn PrivilegeQuerier>,
}

impl PrivilegeCheck {
    pub fn new(querier: Box<dyn PrivilegeQuerier>) -> Self {
        Self { querier }
    }
}

impl Check for PrivilegeCheck {
    fn name(&self) -> &str {
        "privilege"
    }

    fn label(&self) -> &str {
        "Administrator rights"
    }

    fn run(&self) -> CheckResult {
        let status = self.querier.query();
        tracing::debug!("Privilege query returned {:?}", status);

        match status {
            PrivilegeStatus::Elevated => {
                CheckResult::pass(self.name(), "Running as Administrator")
            }
            PrivilegeStatus::NotElevated => {
                CheckResult::fail(self.name(), "Not running as Administrator").with_finding(
                    Finding::warn("Not running as Administrator, may cause install errors"),
                )
            }
            PrivilegeStatus::NotApplicable => {
                CheckResult::pass(self.name(), "Admin check not available").with_finding(
                    Finding::info(
                        format!("Admin check not available on {}", os_name()),
                        Some(IssueKind::PrivilegeQueryUnavailable),
                    ),
                )
            }
        }
    }
}
