//! Process execution and executable lookup.

pub mod command;
pub mod path;
pub mod platform;

pub use command::{tail_lines, CommandResult, CommandSpec, ProcessRunner, SystemRunner};
pub use path::{parse_system_path, resolve_tool_path, PathLookup, SystemPath};
pub use platform::{is_ci, os_name};
