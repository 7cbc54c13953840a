//! Compile-wide node arena.
//!
//! One [`StyleArena`] owns every AST node of a compile unit: the parsed
//! input, every pre-parsed import, and everything expansion produces. Nodes
//! are never individually freed; the whole graph drops with the arena at the
//! end of the compile. Children are referenced by index, so a stored id can
//! outlive any borrow without dangling.
//!
//! # Index Spaces
//!
//! - `exprs` indexed by [`ExprId`]
//! - `stmts` indexed by [`StmtId`]
//! - `blocks` indexed by [`BlockId`]
//! - `expr_lists` flat side table indexed by [`ExprRange`]
//! - `params` indexed by [`ParamRange`]
//! - `args` indexed by [`ArgRange`]

use crate::ast::{Block, CallArg, Expr, ExprKind, Param, Stmt, StmtKind};
use crate::{ArgRange, BlockId, ExprId, ExprRange, ParamRange, Span, StmtId};

/// Convert an arena length to `u32`, panicking with context on overflow.
fn to_u32(value: usize, what: &str) -> u32 {
    match u32::try_from(value) {
        Ok(v) => v,
        Err(_) => panic!("arena overflow: more than u32::MAX {what}"),
    }
}

/// Arena owning all AST nodes of one compile unit.
#[derive(Default)]
pub struct StyleArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    blocks: Vec<Block>,
    expr_lists: Vec<ExprId>,
    params: Vec<Param>,
    args: Vec<CallArg>,
}

impl StyleArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression node.
    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(Expr::new(kind, span));
        id
    }

    /// Get an expression node.
    #[inline]
    pub fn expr(&self, id: ExprId) -> Expr {
        self.exprs[id.index()]
    }

    /// Allocate a statement node.
    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(Stmt::new(kind, span));
        id
    }

    /// Get a statement node.
    #[inline]
    pub fn stmt(&self, id: StmtId) -> Stmt {
        self.stmts[id.index()]
    }

    /// Allocate an empty block.
    pub fn alloc_block(&mut self, span: Span, is_root: bool) -> BlockId {
        let id = BlockId::new(to_u32(self.blocks.len(), "blocks"));
        self.blocks.push(Block::new(span, is_root));
        id
    }

    /// Get a block.
    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Append a statement to a block under construction.
    #[inline]
    pub fn push_to_block(&mut self, block: BlockId, stmt: StmtId) {
        self.blocks[block.index()].push(stmt);
    }

    /// Allocate a list of expression ids, returning its range.
    pub fn alloc_expr_list<I>(&mut self, ids: I) -> ExprRange
    where
        I: IntoIterator<Item = ExprId>,
    {
        let start = to_u32(self.expr_lists.len(), "expression list entries");
        self.expr_lists.extend(ids);
        let len = to_u32(self.expr_lists.len(), "expression list entries") - start;
        ExprRange::new(start, len)
    }

    /// Get the expression ids in a range.
    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.start as usize..range.start as usize + range.len()]
    }

    /// Allocate a formal parameter list, returning its range.
    pub fn alloc_params<I>(&mut self, params: I) -> ParamRange
    where
        I: IntoIterator<Item = Param>,
    {
        let start = to_u32(self.params.len(), "parameters");
        self.params.extend(params);
        let len = to_u32(self.params.len(), "parameters") - start;
        ParamRange::new(start, len)
    }

    /// Get the parameters in a range.
    #[inline]
    pub fn params(&self, range: ParamRange) -> &[Param] {
        &self.params[range.start as usize..range.start as usize + range.len()]
    }

    /// Allocate a call argument list, returning its range.
    pub fn alloc_args<I>(&mut self, args: I) -> ArgRange
    where
        I: IntoIterator<Item = CallArg>,
    {
        let start = to_u32(self.args.len(), "call arguments");
        self.args.extend(args);
        let len = to_u32(self.args.len(), "call arguments") - start;
        ArgRange::new(start, len)
    }

    /// Get the call arguments in a range.
    #[inline]
    pub fn args(&self, range: ArgRange) -> &[CallArg] {
        &self.args[range.start as usize..range.start as usize + range.len()]
    }
}
