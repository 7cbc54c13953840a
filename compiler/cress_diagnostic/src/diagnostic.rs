//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`], [`Label`], and [`Severity`], the building blocks
//! every compiler phase uses to report errors and warnings. A diagnostic
//! carries interned spans; rendering resolves them against the compile's
//! interner so the user always sees `path:line`.

use std::fmt;
use std::fmt::Write as _;

use cress_ir::{Span, StringInterner};

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A secondary message attached to a diagnostic.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Label {
    /// Human-readable context message.
    pub message: String,
    /// Source location the message refers to.
    pub span: Span,
}

impl Label {
    /// Create a new label.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Label {
            message: message.into(),
            span,
        }
    }
}

/// A structured diagnostic.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    /// How severe the diagnostic is.
    pub severity: Severity,
    /// Stable code for documentation lookups.
    pub code: ErrorCode,
    /// What went wrong.
    pub message: String,
    /// Where it went wrong.
    pub span: Span,
    /// Additional context.
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Error,
            code,
            message: message.into(),
            span,
            labels: Vec::new(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            code,
            message: message.into(),
            span,
            labels: Vec::new(),
        }
    }

    /// Attach a label (builder style).
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Render the diagnostic for terminal output.
    ///
    /// Format:
    /// ```text
    /// error[E0401]: undefined mixin `rounded`
    ///   --> sheet.cress:12
    /// ```
    pub fn render(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}[{}]: {}",
            self.severity, self.code, self.message
        );
        let _ = write!(
            out,
            "  --> {}:{}",
            interner.resolve(self.span.path),
            self.span.line
        );
        for label in &self.labels {
            let _ = write!(
                out,
                "\n  = {} ({}:{})",
                label.message,
                interner.resolve(label.span.path),
                label.span.line
            );
        }
        out
    }
}
