//! Cress Expand - the tree-rewriting expansion pass of the Cress compiler.
//!
//! Expansion walks a parsed style sheet and produces a new tree in which:
//! - mixin invocations are inlined flat at the call site,
//! - resolved `@import` fragments are spliced in place,
//! - nested property groups are flattened into prefixed declarations,
//! - variable and definition bindings are resolved against a chain of
//!   lexical scopes.
//!
//! # Architecture
//!
//! - [`Environment`]: lexical scoping with a scope stack; mixin definitions
//!   capture their definition-site frame
//! - [`Expander`]: the single-dispatch rewriter, one per compile unit
//! - [`Evaluate`] / [`Bind`]: collaborator traits for expression reduction
//!   and parameter binding; expansion owns no value semantics of its own
//! - [`ImportRegistry`]: read-only map from resolved import target to its
//!   pre-parsed block
//!
//! The parser, emitter, and import-resolution machinery are separate
//! collaborators; this crate's boundary is purely in-process.

mod bind;
mod environment;
mod errors;
mod eval;
mod expander;
mod registry;

pub use bind::{Bind, EvaluatedArg};
pub use environment::{Binding, BindingRole, DefRecord, Environment, LocalScope, Scope, ScopeKey};
pub use errors::{warning_diagnostic, BindError, EvalError, ExpandError, ExpandResult};
pub use eval::Evaluate;
pub use expander::Expander;
pub use registry::ImportRegistry;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test code: relaxed style for readability")]
mod tests;
