//! RAII scope guard for the expander's environment frames.
//!
//! The guard holds `&mut Expander` and implements `Deref`/`DerefMut`, so
//! guarded code calls expander methods transparently. When the guard drops,
//! whether on success, on `?` propagation, or during unwinding, the frame
//! pushed at construction is popped, keeping the frame chain matched to
//! recursive call entry/exit.

use std::ops::{Deref, DerefMut};

use super::Expander;
use crate::environment::{LocalScope, Scope};
use crate::{Bind, Evaluate};

/// Guard that pops one environment frame on drop.
pub(crate) struct ScopedExpander<'guard, 'a, E, B> {
    expander: &'guard mut Expander<'a, E, B>,
}

impl<E, B> Drop for ScopedExpander<'_, '_, E, B> {
    fn drop(&mut self) {
        self.expander.env.pop_scope();
    }
}

impl<'a, E, B> Deref for ScopedExpander<'_, 'a, E, B> {
    type Target = Expander<'a, E, B>;

    fn deref(&self) -> &Self::Target {
        self.expander
    }
}

impl<E, B> DerefMut for ScopedExpander<'_, '_, E, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.expander
    }
}

impl<'a, E: Evaluate, B: Bind> Expander<'a, E, B> {
    /// Push a child frame of the current frame; popped when the returned
    /// guard drops.
    pub(crate) fn scoped(&mut self) -> ScopedExpander<'_, 'a, E, B> {
        self.env.push_scope();
        ScopedExpander { expander: self }
    }

    /// Push a frame chained to an explicit parent (the mixin
    /// definition-site frame); popped when the returned guard drops.
    pub(crate) fn scoped_with_parent(
        &mut self,
        parent: LocalScope<Scope>,
    ) -> ScopedExpander<'_, 'a, E, B> {
        self.env.push_scope_with_parent(parent);
        ScopedExpander { expander: self }
    }
}
