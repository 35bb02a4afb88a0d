//! [`Diagnostic`]: one reported problem with its location.

use natint_ir::Span;

use crate::ErrorCode;

/// Whether a diagnostic fails the check.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    /// Reported but does not fail the check (hiding an inherited member).
    Warning,
}

impl Severity {
    /// Severity implied by an error code.
    pub fn of(code: ErrorCode) -> Self {
        if code.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

/// A second location that explains the primary one, such as the first
/// declaration of a duplicated member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Related {
    pub span: Span,
    pub message: String,
}

/// A rendered type checking problem.
///
/// Equality covers every field; the queue drops a diagnostic equal to one
/// it already holds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// Where the problem is.
    pub span: Span,
    pub related: Option<Related>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// A diagnostic at `span` whose severity follows from `code`.
    #[cold]
    pub fn new(code: ErrorCode, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            severity: Severity::of(code),
            message: message.into(),
            span,
            related: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related = Some(Related {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
