//! Flat AST types for parsed style sheets.
//!
//! All child references are arena indices (`ExprId`, `StmtId`, `BlockId`),
//! never boxes. Statement and expression kind enums are `Copy`, so compiler
//! passes copy a kind out of the arena and match on it without holding a
//! borrow across recursion.
//!
//! # Module Structure
//!
//! - `expr`: Expression nodes (opaque to expansion; reduced by the evaluator)
//! - `stmt`: Statement nodes (the kinds expansion dispatches on)
//! - `params`: Formal parameters and call arguments

mod expr;
mod params;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use params::{CallArg, Param};
pub use stmt::{DefinitionKind, Stmt, StmtKind};

use crate::{Span, Spanned, StmtId};

/// An ordered sequence of statements.
///
/// Blocks are built incrementally: expansion allocates an empty block and
/// appends rewritten children as they are produced. Once the producing pass
/// returns, the block is treated as immutable.
#[derive(Clone, Debug)]
pub struct Block {
    /// Source location of the block's opening.
    pub span: Span,
    /// Whether this is the top-level block of a style sheet.
    pub is_root: bool,
    stmts: Vec<StmtId>,
}

impl Block {
    /// Create an empty block.
    pub fn new(span: Span, is_root: bool) -> Self {
        Block {
            span,
            is_root,
            stmts: Vec::new(),
        }
    }

    /// Append a statement.
    #[inline]
    pub fn push(&mut self, stmt: StmtId) {
        self.stmts.push(stmt);
    }

    /// The statements in order.
    #[inline]
    pub fn stmts(&self) -> &[StmtId] {
        &self.stmts
    }

    /// Number of statements.
    #[inline]
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    /// Returns `true` if the block has no statements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl Spanned for Block {
    fn span(&self) -> Span {
        self.span
    }
}
