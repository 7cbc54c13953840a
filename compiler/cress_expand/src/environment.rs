//! Environment for lexical scoping during expansion.
//!
//! Uses a scope stack (not cloning) for efficient scope management. Frames
//! chain through parent references: a child frame holds the reference to its
//! parent, never the reverse, matching the lifetimes: a frame never
//! outlives the recursive call that created it, while its parent may outlive
//! many children.
//!
//! Mixin and function definitions capture the frame that was current at the
//! definition site. Invoking a mixin pushes a frame whose parent is that
//! captured frame, so free names in the body resolve where the mixin was
//! defined, not where it was invoked.

// Rc is the intentional implementation detail of LocalScope<T>.
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use cress_ir::{BlockId, ExprId, Name, ParamRange};
use rustc_hash::FxHashMap;

/// The role a name is bound under.
///
/// Variables, mixins, and functions share one source-level namespace but
/// never collide: bindings are keyed by name *and* role. This is the typed
/// rendition of suffix-tagging names with `[m]` / `[f]` markers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingRole {
    /// `$name` value binding.
    Variable,
    /// `@mixin name` definition.
    Mixin,
    /// `@function name` definition.
    Function,
}

/// Key for one binding in a scope frame.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeKey {
    pub name: Name,
    pub role: BindingRole,
}

impl ScopeKey {
    /// Key for a variable binding.
    #[inline]
    pub const fn variable(name: Name) -> Self {
        ScopeKey {
            name,
            role: BindingRole::Variable,
        }
    }

    /// Key for a mixin definition.
    #[inline]
    pub const fn mixin(name: Name) -> Self {
        ScopeKey {
            name,
            role: BindingRole::Mixin,
        }
    }

    /// Key for a function definition.
    #[inline]
    pub const fn function(name: Name) -> Self {
        ScopeKey {
            name,
            role: BindingRole::Function,
        }
    }
}

/// A mixin or function definition registered in a scope.
#[derive(Clone)]
pub struct DefRecord {
    /// Formal parameter list.
    pub params: ParamRange,
    /// Body block, inlined at each invocation.
    pub body: BlockId,
    /// The frame that was current where the definition appeared.
    pub captured: LocalScope<Scope>,
}

impl fmt::Debug for DefRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured frame can reference this record through its own
        // bindings; printing it would recurse forever.
        f.debug_struct("DefRecord")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// A value bound in a scope frame.
#[derive(Clone, Debug)]
pub enum Binding {
    /// Evaluated expression node (variables).
    Value(ExprId),
    /// Mixin or function definition.
    Definition(DefRecord),
}

impl Binding {
    /// Returns the bound expression if this is a value binding.
    #[inline]
    pub fn as_value(&self) -> Option<ExprId> {
        match self {
            Binding::Value(id) => Some(*id),
            Binding::Definition(_) => None,
        }
    }

    /// Returns the definition record if this is a definition binding.
    #[inline]
    pub fn as_definition(&self) -> Option<&DefRecord> {
        match self {
            Binding::Definition(def) => Some(def),
            Binding::Value(_) => None,
        }
    }
}

/// A single-threaded scope handle with reference-counted interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so all frame allocations go through the
/// `LocalScope::new()` factory. Expansion is single-threaded within one
/// compile unit, so `Rc` (not `Arc`) is intentional.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    /// Create a new `LocalScope` wrapping the given value.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

/// A single scope frame containing bindings.
#[derive(Debug, Default)]
pub struct Scope {
    /// Bindings in this frame (`FxHashMap` for fast hashing on small keys).
    bindings: FxHashMap<ScopeKey, Binding>,
    /// Parent frame (lexical chain).
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty frame with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Create a new frame chained to a parent.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define a binding in this frame, shadowing any ancestor binding and
    /// silently overwriting a previous binding of the same key here.
    #[inline]
    pub fn define(&mut self, key: ScopeKey, binding: Binding) {
        self.bindings.insert(key, binding);
    }

    /// Look up a binding, walking the frame chain from here to the root.
    pub fn lookup(&self, key: ScopeKey) -> Option<Binding> {
        if let Some(binding) = self.bindings.get(&key) {
            return Some(binding.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(key);
        }
        None
    }

    /// Overwrite an existing binding in this frame or the closest enclosing
    /// frame that has one. Returns `false` if the key is bound nowhere in
    /// the chain.
    pub fn assign(&mut self, key: ScopeKey, binding: &Binding) -> bool {
        if let Some(slot) = self.bindings.get_mut(&key) {
            *slot = binding.clone();
            return true;
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(key, binding);
        }
        false
    }
}

/// Environment for expansion using a scope stack.
///
/// The root frame is created at construction and never popped; it is where
/// the driver pre-defines global variables before expansion starts.
pub struct Environment {
    /// Stack of frames, current frame at the top.
    scopes: Vec<LocalScope<Scope>>,
}

impl Environment {
    /// Create a new environment with an empty root frame.
    pub fn new() -> Self {
        Environment {
            scopes: vec![LocalScope::new(Scope::new())],
        }
    }

    /// Current frame depth (1 = root only).
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The current frame, as a shareable handle.
    ///
    /// Used to capture the definition-site frame when registering a mixin
    /// or function.
    #[inline]
    pub fn current(&self) -> LocalScope<Scope> {
        self.current_ref().clone()
    }

    /// Push a new frame whose parent is the current frame.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Push a new frame chained to an explicit parent frame.
    ///
    /// This is the mixin-invocation path: the parent is the frame captured
    /// at the definition site, not the invocation site.
    #[inline]
    pub fn push_scope_with_parent(&mut self, parent: LocalScope<Scope>) {
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current frame. The root frame is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Define a binding in the current frame only.
    #[inline]
    pub fn define(&mut self, key: ScopeKey, binding: Binding) {
        self.current_ref().borrow_mut().define(key, binding);
    }

    /// Look up a binding, walking the frame chain to the root.
    #[inline]
    pub fn lookup(&self, key: ScopeKey) -> Option<Binding> {
        self.current_ref().borrow().lookup(key)
    }

    /// Assign to a binding: overwrite in the closest enclosing frame that
    /// has it, or define in the current frame if it is bound nowhere
    /// (implicit declaration on first assignment).
    pub fn assign(&mut self, key: ScopeKey, binding: Binding) {
        let assigned = self.current_ref().borrow_mut().assign(key, &binding);
        if !assigned {
            self.define(key, binding);
        }
    }

    #[inline]
    fn current_ref(&self) -> &LocalScope<Scope> {
        match self.scopes.last() {
            Some(scope) => scope,
            // The root frame is created in `new` and `pop_scope` keeps it.
            None => unreachable!("environment root frame was popped"),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
