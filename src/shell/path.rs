//! Executable lookup on PATH.
//!
//! Does NOT use the `which` command. Its behavior varies across systems and
//! it is sometimes a shell builtin with inconsistent error handling.

use std::path::{Path, PathBuf};

/// Finds executables by name.
pub trait PathLookup {
    /// Return the first matching executable, if any.
    fn find(&self, name: &str) -> Option<PathBuf>;
}

/// [`PathLookup`] over the process's `PATH` environment variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPath;

impl PathLookup for SystemPath {
    fn find(&self, name: &str) -> Option<PathBuf> {
        let entries = parse_system_path();
        let found = resolve_tool_path(name, &entries);
        tracing::debug!("PATH lookup for '{}': {:?}", name, found);
        found
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Candidate file names for `tool`, including `PATHEXT` variants on Windows.
fn candidate_names(tool: &str) -> Vec<String> {
    let mut names = vec![tool.to_string()];
    if cfg!(windows) && Path::new(tool).extension().is_none() {
        let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".into());
        for ext in pathext.split(';').filter(|e| !e.is_empty()) {
            names.push(format!("{}{}", tool, ext.to_lowercase()));
        }
    }
    names
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}
