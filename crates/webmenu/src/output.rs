//! Build progress reporting on stderr.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use console::{Style, Term};

/// Styled progress lines for the CLI commands.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    done: Style,
    failure: Style,
}

impl Output {
    /// Create a reporter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().cyan().bold(),
            done: Style::new().green(),
            failure: Style::new().red(),
        }
    }

    /// Announce the directory being scanned.
    pub(crate) fn scanning(&self, source_dir: &Path) {
        let line = format!("Analyzing file tree at {}", source_dir.display());
        self.line(&self.heading.apply_to(line).to_string());
    }

    /// Report a counted step, e.g. `Found 3 pages`.
    pub(crate) fn step(&self, verb: &str, count: usize, noun: &str) {
        self.line(&format!("{verb} {}", counted(count, noun)));
    }

    /// Announce the output directory.
    pub(crate) fn writing(&self, output_dir: &Path) {
        self.line(&format!("Writing files to {}", output_dir.display()));
    }

    /// Report a finished build.
    pub(crate) fn finished(&self, written: usize, elapsed: Duration) {
        let line = format!(
            "Built {} in {:.2}s",
            counted(written, "page"),
            elapsed.as_secs_f64()
        );
        self.line(&self.done.apply_to(line).to_string());
    }

    /// Report a failed command.
    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(&self.failure.apply_to(format!("Error: {err}")).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

/// `1 page`, `2 pages`.
fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counted() {
        assert_eq!(counted(0, "page"), "0 pages");
        assert_eq!(counted(1, "menu"), "1 menu");
        assert_eq!(counted(12, "page"), "12 pages");
    }
}
