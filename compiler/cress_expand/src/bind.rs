//! Argument binder collaborator interface.

use cress_ir::{ExprId, Name, ParamRange, Span, StyleArena};

use crate::{BindError, Environment};

/// A call argument whose value has already been reduced by the evaluator.
///
/// Arguments are evaluated in the *caller's* scope before binding begins;
/// the binder only sees finished values.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EvaluatedArg {
    /// Argument name for named arguments; `Name::EMPTY` for positional.
    pub name: Name,
    /// Evaluated value expression.
    pub value: ExprId,
    /// Source location of the argument.
    pub span: Span,
}

impl EvaluatedArg {
    /// Returns `true` if this argument was passed by name.
    #[inline]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Binds evaluated call arguments to formal parameters.
///
/// Arity and default-value resolution live behind this trait; the expander
/// only supplies the parameter list, the evaluated arguments, and the fresh
/// frame to populate.
///
/// # Contract
///
/// - Bindings are written into `env`'s *current* frame via
///   [`Environment::define`].
/// - Arity mismatch, an unknown named argument, or a missing required
///   argument are reported as a [`BindError`], fatal to the invocation.
pub trait Bind {
    /// Bind `args` against `params`, populating `env`'s current frame.
    fn bind(
        &mut self,
        arena: &mut StyleArena,
        params: ParamRange,
        args: &[EvaluatedArg],
        env: &mut Environment,
    ) -> Result<(), BindError>;
}
