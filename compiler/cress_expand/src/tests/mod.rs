//! Crate-level behavior tests for the expansion pass.
//!
//! `support` provides a fixture with a literal evaluator and a positional
//! binder, stand-ins for the real evaluator and binder collaborators that
//! are just rich enough to exercise expansion's contracts.

mod support;
