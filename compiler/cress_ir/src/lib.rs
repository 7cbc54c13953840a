//! Cress IR - Intermediate representation types for the Cress compiler.
//!
//! This crate contains the core data structures shared by all phases:
//! - [`Span`] for source locations (file path + line)
//! - [`Name`] for interned identifiers
//! - Flat AST nodes ([`Stmt`], [`Expr`], [`Block`])
//! - [`StyleArena`], the compile-wide index arena
//!
//! # Design Philosophy
//!
//! - **Intern everything**: strings become `Name(u32)`
//! - **Flatten everything**: no `Box<Stmt>`, children are arena indices
//! - **Immutable after construction**: passes rewrite by allocating new
//!   nodes, never by mutating nodes already handed downstream

mod arena;
pub mod ast;
mod ids;
mod interner;
mod name;
mod span;

pub use arena::StyleArena;
pub use ast::{Block, CallArg, DefinitionKind, Expr, ExprKind, Param, Stmt, StmtKind};
pub use ids::{ArgRange, BlockId, ExprId, ExprRange, ParamRange, StmtId};
pub use interner::StringInterner;
pub use name::Name;
pub use span::{Span, Spanned};
