//! Formal parameters and call arguments.

use crate::{ExprId, Name, Span};

/// Formal parameter of a mixin or function definition.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    /// Parameter name (without the `$` sigil).
    pub name: Name,
    /// Default value expression, if the parameter is optional.
    pub default: Option<ExprId>,
    /// Source location of the parameter.
    pub span: Span,
}

impl Param {
    /// Create a required parameter.
    pub fn required(name: Name, span: Span) -> Self {
        Param {
            name,
            default: None,
            span,
        }
    }

    /// Create an optional parameter with a default value.
    pub fn with_default(name: Name, default: ExprId, span: Span) -> Self {
        Param {
            name,
            default: Some(default),
            span,
        }
    }
}

/// Argument at a mixin or function call site.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallArg {
    /// Argument name for named arguments; `Name::EMPTY` for positional.
    pub name: Name,
    /// Argument value expression.
    pub value: ExprId,
    /// Source location of the argument.
    pub span: Span,
}

impl CallArg {
    /// Create a positional argument.
    pub fn positional(value: ExprId, span: Span) -> Self {
        CallArg {
            name: Name::EMPTY,
            value,
            span,
        }
    }

    /// Create a named argument.
    pub fn named(name: Name, value: ExprId, span: Span) -> Self {
        CallArg { name, value, span }
    }

    /// Returns `true` if this argument was passed by name.
    #[inline]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}
