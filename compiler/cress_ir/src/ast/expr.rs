//! Expression nodes.
//!
//! Expansion treats expressions as opaque: it hands them to the evaluator
//! collaborator and receives reduced literal nodes back. The variants here
//! are the minimum the pipeline needs to represent parsed values, variable
//! references, and the interpolation schemas the flattener builds.

use std::fmt;

use crate::{ExprRange, Name, Span, Spanned};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression variants.
///
/// All children are arena indices, not boxes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// String or identifier literal (interned): `"Helvetica"`, `bold`.
    Str(Name),

    /// Numeric literal with optional unit (float stored as bits for `Hash`):
    /// `10px`, `1.5em`, `42`.
    Number { bits: u64, unit: Name },

    /// Variable reference: `$width`.
    Variable(Name),

    /// Interpolation schema: an ordered concatenation of parts that the
    /// evaluator reduces to a single string.
    Interp(ExprRange),

    /// Comma- or space-separated value list.
    List(ExprRange),

    /// Unparsed source text passed through verbatim (selectors, media
    /// queries, at-rule preludes).
    Raw(Name),
}

impl ExprKind {
    /// Returns the interned string content if this is a `Str` literal.
    #[inline]
    pub fn as_str(self) -> Option<Name> {
        match self {
            ExprKind::Str(name) => Some(name),
            _ => None,
        }
    }
}
