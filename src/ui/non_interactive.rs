//! Non-interactive UI for CI/headless environments.
//!
//! Everything a check reports goes to stdout, failures included.

use super::theme::EnvcheckTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Spinners are replaced by a single line when the operation starts and
/// another when it finishes.
pub struct NonInteractiveUI {
    mode: OutputMode,
    is_ci: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            is_ci: crate::shell::is_ci(),
        }
    }

    fn shows_start_lines(&self) -> bool {
        self.mode.shows_details() && !self.is_ci
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        println!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        println!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        // Start lines are suppressed in CI.
        if self.shows_start_lines() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            theme: EnvcheckTheme::detect(),
        })
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", title);
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        println!("    ┌─ Command ──────────────────────────");
        println!("    │ {}", command);
        if !output.is_empty() {
            println!("    ├─ Output ───────────────────────────");
            for line in output.lines() {
                println!("    │ {}", line);
            }
        }
        println!("    └────────────────────────────────────");
        if let Some(h) = hint {
            println!("    Hint: {}", h);
        }
    }
}

/// Spinner that only prints its finish line.
struct NoopSpinner {
    theme: EnvcheckTheme,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        println!("{}", self.theme.format_error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn start_lines_follow_mode_and_ci() {
        let local = NonInteractiveUI {
            mode: OutputMode::Normal,
            is_ci: false,
        };
        let ci = NonInteractiveUI {
            mode: OutputMode::Normal,
            is_ci: true,
        };
        let quiet = NonInteractiveUI {
            mode: OutputMode::Quiet,
            is_ci: false,
        };

        assert!(local.shows_start_lines());
        assert!(!ci.shows_start_lines());
        assert!(!quiet.shows_start_lines());
    }

    #[test]
    fn noop_spinner_methods() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner("Checking Python version...");
        spinner.finish_success("done");
        spinner.finish_error("failed");
    }
}
