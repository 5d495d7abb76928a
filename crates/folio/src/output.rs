//! Colored diagnostics on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Writes pipeline diagnostics to stderr so stdout stays machine-readable.
pub(crate) struct Output {
    term: Term,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }

    /// Report renderer warnings for one post.
    pub(crate) fn post_warnings(&self, post: &str, warnings: &[String]) {
        if warnings.is_empty() {
            return;
        }
        let noun = if warnings.len() == 1 {
            "warning"
        } else {
            "warnings"
        };
        self.line(&self.warn, &format!("{post}: {} {noun}", warnings.len()));
        for warning in warnings {
            self.line(&self.warn, &format!("  {warning}"));
        }
    }

    /// Report a post that could not be read.
    pub(crate) fn skipped(&self, post: &str, reason: &impl Display) {
        self.line(&self.warn, &format!("Skipping {post}: {reason}"));
    }

    /// Report a fatal error.
    pub(crate) fn error(&self, err: &impl Display) {
        self.line(&self.fail, &format!("Error: {err}"));
    }

    fn line(&self, style: &Style, msg: &str) {
        // stderr being closed is not worth failing the command over
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
