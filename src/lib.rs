//! envcheck - Verify a development environment before installing a project.
//!
//! envcheck runs a fixed sequence of checks against the local machine and
//! reports each result as it completes:
//!
//! 1. The Python interpreter matches the required `major.minor`
//! 2. pip, setuptools and wheel meet their minimum versions
//! 3. The process runs with administrator rights (Windows only)
//! 4. `python -m pip install -e .` succeeds for the project
//!
//! The overall verdict is the logical AND of every check. A failing check
//! never stops the ones after it.
//!
//! # Modules
//!
//! - [`checks`] - The checks, their results, and the verification runner
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Process execution and executable lookup
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use envcheck::checks::{PackageVersion, RuntimeVersion, RuntimeRequirement, runtime_version_matches};
//!
//! let found = RuntimeVersion::from_output("Python 3.9.18").unwrap();
//! assert!(runtime_version_matches(&found, RuntimeRequirement::new(3, 9)));
//!
//! let pip = PackageVersion::parse("23.1.5").unwrap();
//! assert!(pip >= PackageVersion::parse("23.0.0").unwrap());
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{EnvcheckError, Result};
