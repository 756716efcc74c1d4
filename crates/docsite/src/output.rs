//! Colored status output on stderr.
//!
//! Stdout is reserved for the JSON written by `docsite build`.

use console::{Style, Term};

/// Status line printer.
pub(crate) struct Output {
    term: Term,
    success: Style,
    warning: Style,
    error: Style,
    heading: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            heading: Style::new().cyan().bold(),
        }
    }

    /// Print a message in the given style.
    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.success, msg);
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.warning, msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.error, msg);
    }

    /// Print a heading (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        self.styled(&self.heading, msg);
    }
}
