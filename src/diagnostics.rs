//! Per-run diagnostic accumulator.
//!
//! One [`Diagnostics`] is created with the generation context and shared by
//! every service through cheap clones. Services only write to it; the run
//! report reads it back once the pass is over. Every entry is mirrored to
//! `tracing` as it is recorded.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Shared, append-only diagnostic sink.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error.
    pub fn error(&self, message: impl fmt::Display) {
        let message = message.to_string();
        tracing::error!("{}", message);
        self.push(Severity::Error, message);
    }

    /// Records a warning.
    pub fn warning(&self, message: impl fmt::Display) {
        let message = message.to_string();
        tracing::warn!("{}", message);
        self.push(Severity::Warning, message);
    }

    fn push(&self, severity: Severity, message: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic { severity, message });
    }

    /// Snapshot of everything recorded so far, in recording order.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Records an error with `format!` syntax.
///
/// ```
/// use sharpener::{diagnostics::Diagnostics, report_error};
///
/// let diagnostics = Diagnostics::new();
/// report_error!(diagnostics, "Could not generate component '{}'", "SharpFooComponent");
/// assert!(diagnostics.has_errors());
/// ```
#[macro_export]
macro_rules! report_error {
    ($sink:expr, $($arg:tt)+) => {
        $sink.error(::std::format_args!($($arg)+))
    };
}

/// Records a warning with `format!` syntax.
#[macro_export]
macro_rules! report_warning {
    ($sink:expr, $($arg:tt)+) => {
        $sink.warning(::std::format_args!($($arg)+))
    };
}
