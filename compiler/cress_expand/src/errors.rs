//! Error types for the expansion pass.
//!
//! Expansion has exactly one locally recovered failure mode: a construct it
//! does not handle degrades to an in-tree `Warning` node. Everything else is
//! fatal: the error aborts the in-progress call chain, the partially built
//! tree is discarded, and the message carries the offending node's source
//! path and line so the failure is actionable.

use cress_diagnostic::{Diagnostic, ErrorCode};
use cress_ir::{Name, Span, StringInterner};
use thiserror::Error;

/// Failure reported by the evaluator collaborator.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    /// Create a new evaluator error.
    pub fn new(message: impl Into<String>) -> Self {
        EvalError {
            message: message.into(),
        }
    }
}

/// Failure reported by the argument binder collaborator.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{message}")]
pub struct BindError {
    pub message: String,
}

impl BindError {
    /// Create a new binder error.
    pub fn new(message: impl Into<String>) -> Self {
        BindError {
            message: message.into(),
        }
    }
}

/// Fatal expansion error.
///
/// Expansion is a pure function of its inputs, so a fatal error recurs
/// identically on re-run; there is no retry policy.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ExpandError {
    /// Invocation names a mixin not visible in the current scope chain.
    #[error("undefined mixin `{name}` at {path}:{line}")]
    UndefinedMixin {
        name: String,
        path: String,
        line: u32,
    },

    /// A resolved `@import` target is missing from the import registry.
    #[error("unknown import target `{file}` at {path}:{line}")]
    UndefinedImport {
        file: String,
        path: String,
        line: u32,
    },

    /// `@content` reached with no enclosing mixin invocation supplying a
    /// content block.
    #[error("@content used outside of a mixin at {path}:{line}")]
    ContentOutsideMixin { path: String, line: u32 },

    /// Argument binding failed; the binder's message is surfaced verbatim.
    #[error("{source} at {path}:{line}")]
    Bind {
        #[source]
        source: BindError,
        path: String,
        line: u32,
    },

    /// Expression evaluation failed.
    #[error("{source} at {path}:{line}")]
    Eval {
        #[source]
        source: EvalError,
        path: String,
        line: u32,
    },
}

impl ExpandError {
    /// The stable diagnostic code for this error kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExpandError::UndefinedMixin { .. } => ErrorCode::E0401,
            ExpandError::UndefinedImport { .. } => ErrorCode::E0402,
            ExpandError::ContentOutsideMixin { .. } => ErrorCode::E0403,
            ExpandError::Bind { .. } => ErrorCode::E0404,
            ExpandError::Eval { .. } => ErrorCode::E0405,
        }
    }

    /// The source path and line of the offending node.
    pub fn location(&self) -> (&str, u32) {
        match self {
            ExpandError::UndefinedMixin { path, line, .. }
            | ExpandError::UndefinedImport { path, line, .. }
            | ExpandError::ContentOutsideMixin { path, line }
            | ExpandError::Bind { path, line, .. }
            | ExpandError::Eval { path, line, .. } => (path, *line),
        }
    }

    /// Convert into a diagnostic for uniform rendering with other phases.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let (path, line) = self.location();
        let span = Span::new(interner.intern(path), line);
        let message = match self {
            ExpandError::UndefinedMixin { name, .. } => {
                format!("undefined mixin `{name}`")
            }
            ExpandError::UndefinedImport { file, .. } => {
                format!("unknown import target `{file}`")
            }
            ExpandError::ContentOutsideMixin { .. } => {
                "@content used outside of a mixin".to_owned()
            }
            ExpandError::Bind { source, .. } => source.message.clone(),
            ExpandError::Eval { source, .. } => source.message.clone(),
        };
        Diagnostic::error(self.code(), message, span)
    }
}

/// Diagnostic for an in-tree `Warning` node.
///
/// Expansion embeds a warning where it meets a construct it does not
/// handle instead of failing the compile; the driver walks the expanded
/// tree and reports each one through this conversion.
pub fn warning_diagnostic(message: Name, span: Span, interner: &StringInterner) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E0406, interner.resolve(message), span)
}

/// Result alias for expansion operations.
pub type ExpandResult<T> = Result<T, ExpandError>;
