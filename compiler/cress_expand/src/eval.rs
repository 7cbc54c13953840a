//! Evaluator collaborator interface.

use cress_ir::{ExprId, StyleArena};

use crate::{Environment, EvalError};

/// Reduces expression nodes to literal nodes.
///
/// The expander owns no expression semantics of its own. Arithmetic,
/// string interpolation, color math, and variable substitution all live
/// behind this trait.
///
/// # Contract
///
/// - `evaluate` must not mutate existing nodes; new literal nodes are
///   allocated in `arena` and referenced by the returned id.
/// - Lookups against `env` are permitted (and expected, for variable
///   references).
/// - Returning the input id unchanged is the correct reduction for nodes
///   that are already literal.
pub trait Evaluate {
    /// Reduce `expr` to a literal expression node against `env`.
    fn evaluate(
        &mut self,
        arena: &mut StyleArena,
        env: &Environment,
        expr: ExprId,
    ) -> Result<ExprId, EvalError>;
}
