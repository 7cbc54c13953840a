//! Source locations.
//!
//! Every node in the tree carries a [`Span`] so diagnostics can name the
//! originating file and line. Spans survive rewriting: a node produced by
//! expansion carries the span of the source construct it came from.

use std::fmt;

use crate::Name;

/// Source location: interned file path plus 1-based line number.
///
/// Layout: 8 bytes total. Rendering the path requires the interner, so
/// `Debug` prints the raw name index; use
/// [`StringInterner::resolve`](crate::StringInterner::resolve) for display.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    /// Interned source file path.
    pub path: Name,
    /// 1-based line number (0 for generated nodes with no source line).
    pub line: u32,
}

impl Span {
    /// Dummy span for generated nodes.
    pub const DUMMY: Span = Span {
        path: Name::EMPTY,
        line: 0,
    };

    /// Create a new span.
    #[inline]
    pub const fn new(path: Name, line: u32) -> Self {
        Span { path, line }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.path, self.line)
    }
}

/// Types that carry a source location.
pub trait Spanned {
    /// The source location of this node.
    fn span(&self) -> Span;
}
