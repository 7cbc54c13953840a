//! The expansion pass: a single-dispatch tree rewriter.
//!
//! Consumes a parsed root block plus a root environment and an import
//! registry, and produces a new root block in which mixin invocations are
//! inlined, resolved imports are spliced in place, nested property groups
//! are flattened, and variable bindings are resolved against the lexical
//! scope chain.
//!
//! # Working State
//!
//! Four stacks thread through the recursion and must unwind in strict LIFO
//! discipline on every exit path:
//!
//! - the environment frame chain (restored by [`ScopedExpander`] on drop)
//! - the block-target stack: the top is the block newly produced statements
//!   are appended to
//! - the content stack: bodies passed to enclosing mixin invocations,
//!   consulted by `@content`
//! - the property-prefix stack: partial property names accumulated while
//!   flattening nested property groups
//!
//! The target, content, and prefix stacks are only ever pushed through the
//! `with_*` helpers, which pop before propagating any error; the expander
//! cannot leave a stack dirty short of a panic mid-closure, and the
//! environment guard survives even that.

mod scope_guard;

pub(crate) use scope_guard::ScopedExpander;

use cress_ir::{
    ArgRange, BlockId, DefinitionKind, ExprId, ExprKind, Name, ParamRange, Span, StmtId, StmtKind,
    StringInterner, StyleArena,
};
use tracing::trace;

use crate::environment::{Binding, DefRecord, Environment, ScopeKey};
use crate::errors::{EvalError, ExpandError, ExpandResult};
use crate::{Bind, Evaluate, EvaluatedArg, ImportRegistry};

/// Tree rewriter for one compile unit.
///
/// One `Expander` owns one expansion: the working-state stacks are private
/// to it and fully unwound by the time [`expand`](Expander::expand) returns.
/// Independent compiles may run concurrently as long as each owns its own
/// arena, environment, and expander.
pub struct Expander<'a, E, B> {
    arena: &'a mut StyleArena,
    interner: &'a StringInterner,
    registry: &'a ImportRegistry,
    evaluator: &'a mut E,
    binder: &'a mut B,
    env: Environment,
    block_stack: Vec<BlockId>,
    content_stack: Vec<BlockId>,
    property_stack: Vec<Name>,
}

impl<'a, E: Evaluate, B: Bind> Expander<'a, E, B> {
    /// Create an expander over a compile unit's arena.
    ///
    /// `env` is the root environment; the driver may have pre-defined
    /// global variables in it. `registry` maps every resolved import target
    /// to its pre-parsed block.
    pub fn new(
        arena: &'a mut StyleArena,
        interner: &'a StringInterner,
        registry: &'a ImportRegistry,
        evaluator: &'a mut E,
        binder: &'a mut B,
        env: Environment,
    ) -> Self {
        Expander {
            arena,
            interner,
            registry,
            evaluator,
            binder,
            env,
            block_stack: Vec::new(),
            content_stack: Vec::new(),
            property_stack: Vec::new(),
        }
    }

    /// Expand a root block, returning the rewritten root.
    ///
    /// On error the partially built tree is abandoned in the arena and
    /// never handed to the emitter; the arena frees it with everything else
    /// at the end of the compile.
    pub fn expand(&mut self, root: BlockId) -> ExpandResult<BlockId> {
        let result = self.expand_block(root)?;
        debug_assert!(self.block_stack.is_empty(), "block-target stack not unwound");
        debug_assert!(self.content_stack.is_empty(), "content stack not unwound");
        debug_assert!(self.property_stack.is_empty(), "property-prefix stack not unwound");
        debug_assert_eq!(self.env.depth(), 1, "environment frames not unwound");
        Ok(result)
    }

    /// Expand a block into a fresh output block: new child frame, new
    /// target, children expanded in order.
    fn expand_block(&mut self, block: BlockId) -> ExpandResult<BlockId> {
        let (span, is_root) = {
            let b = self.arena.block(block);
            (b.span, b.is_root)
        };
        let target = self.arena.alloc_block(span, is_root);
        let mut scoped = self.scoped();
        let result = scoped.with_target(target, |this| this.append_block(block));
        drop(scoped);
        result?;
        Ok(target)
    }

    /// Expand every child of `block` in order, appending each non-absent
    /// result to the current target.
    ///
    /// This is the shared splice mechanism: block bodies, resolved imports,
    /// and inlined mixin bodies all come through here; only the scope and
    /// target set up around the call differ.
    fn append_block(&mut self, block: BlockId) -> ExpandResult<()> {
        for i in 0..self.arena.block(block).len() {
            let stmt = self.arena.block(block).stmts()[i];
            if let Some(expanded) = self.expand_stmt(stmt)? {
                self.append_to_target(expanded);
            }
        }
        Ok(())
    }

    /// Expand one statement.
    ///
    /// Returns the rewritten node, or `None` for statements whose whole
    /// effect is scope mutation or direct appends to the current target.
    fn expand_stmt(&mut self, id: StmtId) -> ExpandResult<Option<StmtId>> {
        let stmt = self.arena.stmt(id);
        match stmt.kind {
            StmtKind::Ruleset { selector, body } => {
                // Selector expansion is deferred; it passes through as
                // written.
                let body = self.expand_block(body)?;
                Ok(Some(
                    self.arena
                        .alloc_stmt(StmtKind::Ruleset { selector, body }, stmt.span),
                ))
            }

            StmtKind::PropGroup { fragment, body } => {
                self.expand_prop_group(fragment, body)?;
                Ok(None)
            }

            StmtKind::MediaBlock { queries, body } => {
                // Media queries pass through unevaluated.
                let body = self.expand_block(body)?;
                Ok(Some(
                    self.arena
                        .alloc_stmt(StmtKind::MediaBlock { queries, body }, stmt.span),
                ))
            }

            StmtKind::AtRule {
                keyword,
                prelude,
                body,
            } => match body {
                Some(body) => {
                    let body = self.expand_block(body)?;
                    Ok(Some(self.arena.alloc_stmt(
                        StmtKind::AtRule {
                            keyword,
                            prelude,
                            body: Some(body),
                        },
                        stmt.span,
                    )))
                }
                // Bodyless at-rules are terminal: they pass through
                // unchanged and are fixed points of re-expansion.
                None => Ok(Some(id)),
            },

            StmtKind::Declaration { property, value } => {
                let property = self.eval(property)?;
                let value = self.eval(value)?;
                Ok(Some(
                    self.arena
                        .alloc_stmt(StmtKind::Declaration { property, value }, stmt.span),
                ))
            }

            StmtKind::Assignment {
                name,
                value,
                guarded,
            } => {
                self.expand_assignment(name, value, guarded)?;
                Ok(None)
            }

            // Import target evaluation (URL interpolation) is deferred;
            // unresolved imports pass through for the emitter.
            StmtKind::Import { .. } => Ok(Some(id)),

            StmtKind::ResolvedImport { file } => {
                self.splice_import(file, stmt.span)?;
                Ok(None)
            }

            // Comment text interpolation is deferred.
            StmtKind::Comment { .. } => Ok(Some(id)),

            StmtKind::Definition {
                name,
                kind,
                params,
                body,
            } => {
                self.register_definition(name, kind, params, body);
                Ok(None)
            }

            StmtKind::MixinCall {
                name,
                args,
                content,
            } => {
                self.expand_mixin_call(name, args, content, stmt.span)?;
                Ok(None)
            }

            StmtKind::Content => {
                self.splice_content(stmt.span)?;
                Ok(None)
            }

            StmtKind::Warning { .. } => Ok(Some(id)),

            // Constructs expansion does not understand degrade to an
            // embedded Warning instead of failing the compile. This arm is
            // deliberate: a new StmtKind variant will not compile until it
            // is either handled above or routed here.
            StmtKind::Extend { .. } => Ok(Some(self.unhandled(stmt.kind, stmt.span))),
        }
    }

    /// Flatten a nested property group into individually prefixed
    /// declarations appended to the current target.
    ///
    /// Prefix concatenation is left-associative with a fixed `-` separator:
    /// `font: { size: ... }` yields `font-size`, and doubly nested groups
    /// keep concatenating left-to-right.
    ///
    /// Emission runs in two phases: every direct declaration of the group
    /// first, then every nested group. A declaration written after a nested
    /// group still emits before the group's contents.
    fn expand_prop_group(&mut self, fragment: ExprId, body: BlockId) -> ExpandResult<()> {
        let fragment = self.eval_to_name(fragment)?;
        let combined = match self.property_stack.last() {
            Some(&prefix) => self.join_names(prefix, fragment),
            None => fragment,
        };
        for i in 0..self.arena.block(body).len() {
            let child_id = self.arena.block(body).stmts()[i];
            let child = self.arena.stmt(child_id);
            match child.kind {
                StmtKind::Declaration { property, value } => {
                    let own = self.eval_to_name(property)?;
                    let value = self.eval(value)?;
                    let full = self.join_names(combined, own);
                    let property = self.arena.alloc_expr(ExprKind::Str(full), child.span);
                    let decl = self
                        .arena
                        .alloc_stmt(StmtKind::Declaration { property, value }, child.span);
                    self.append_to_target(decl);
                }
                StmtKind::PropGroup { .. } => {}
                _ => {
                    // Anything else nested in a property group expands
                    // normally, without the prefix.
                    if let Some(expanded) = self.expand_stmt(child_id)? {
                        self.append_to_target(expanded);
                    }
                }
            }
        }
        for i in 0..self.arena.block(body).len() {
            let child_id = self.arena.block(body).stmts()[i];
            if let StmtKind::PropGroup { .. } = self.arena.stmt(child_id).kind {
                self.with_prefix(combined, |this| {
                    this.expand_stmt(child_id).map(|_| ())
                })?;
            }
        }
        Ok(())
    }

    /// Resolve visibility, then overwrite, skip, or create the binding.
    ///
    /// The right-hand side is evaluated before storing, and only when the
    /// store will actually happen; a guarded assignment over a live
    /// binding evaluates nothing.
    fn expand_assignment(&mut self, name: Name, value: ExprId, guarded: bool) -> ExpandResult<()> {
        let key = ScopeKey::variable(name);
        if self.env.lookup(key).is_some() {
            if !guarded {
                let value = self.eval(value)?;
                self.env.assign(key, Binding::Value(value));
            }
        } else {
            let value = self.eval(value)?;
            self.env.define(key, Binding::Value(value));
        }
        Ok(())
    }

    /// Splice a pre-parsed import target into the current block.
    ///
    /// Imports do not introduce a new lexical scope: the imported
    /// statements are expanded against the *current* frame and appended to
    /// the *current* target, exactly as if written inline.
    fn splice_import(&mut self, file: Name, span: Span) -> ExpandResult<()> {
        let Some(sheet) = self.registry.lookup(file) else {
            let (path, line) = self.location(span);
            return Err(ExpandError::UndefinedImport {
                file: self.interner.resolve(file).to_owned(),
                path,
                line,
            });
        };
        trace!(file = self.interner.resolve(file), "splicing resolved import");
        self.append_block(sheet)
    }

    /// Register a mixin or function definition in the current frame.
    ///
    /// The current frame is captured so later invocations resolve free
    /// names at the definition site. Redefinition silently overwrites:
    /// last definition wins.
    fn register_definition(
        &mut self,
        name: Name,
        kind: DefinitionKind,
        params: ParamRange,
        body: BlockId,
    ) {
        let key = match kind {
            DefinitionKind::Mixin => ScopeKey::mixin(name),
            DefinitionKind::Function => ScopeKey::function(name),
        };
        let record = DefRecord {
            params,
            body,
            captured: self.env.current(),
        };
        self.env.define(key, Binding::Definition(record));
    }

    /// Inline a mixin invocation.
    ///
    /// 1. Resolve the name under the mixin role; absence is fatal.
    /// 2. Evaluate arguments in the caller's scope.
    /// 3. Expand a passed content block in the caller's lexical context and
    ///    push it on the content stack.
    /// 4. Push a frame whose parent is the definition-site frame.
    /// 5. Bind parameters via the binder.
    /// 6. Append the body flat into the caller's current target.
    /// 7. Restore frame and content stack on every path.
    #[tracing::instrument(level = "debug", skip_all)]
    fn expand_mixin_call(
        &mut self,
        name: Name,
        args: ArgRange,
        content: Option<BlockId>,
        span: Span,
    ) -> ExpandResult<()> {
        let def = match self.env.lookup(ScopeKey::mixin(name)) {
            Some(Binding::Definition(def)) => def,
            _ => return Err(self.undefined_mixin(name, span)),
        };

        let mut evaluated = Vec::with_capacity(args.len());
        for i in 0..self.arena.args(args).len() {
            let arg = self.arena.args(args)[i];
            let value = self.eval(arg.value)?;
            evaluated.push(EvaluatedArg {
                name: arg.name,
                value,
                span: arg.span,
            });
        }

        match content {
            Some(body) => {
                // The caller's body is expanded before the mixin frame
                // exists, so names inside it resolve in the caller's
                // lexical context.
                let expanded = self.expand_block(body)?;
                self.with_content(expanded, |this| this.inline_body(&def, &evaluated, span))
            }
            None => self.inline_body(&def, &evaluated, span),
        }
    }

    /// Steps 4-6 of mixin inlining: definition-site frame, parameter
    /// binding, flat body append.
    fn inline_body(
        &mut self,
        def: &DefRecord,
        args: &[EvaluatedArg],
        span: Span,
    ) -> ExpandResult<()> {
        let mut scoped = self.scoped_with_parent(def.captured.clone());
        scoped.bind_args(def.params, args, span)?;
        // No nested output block: the body's statements land directly in
        // the caller's surrounding block.
        scoped.append_block(def.body)
    }

    /// Bind evaluated arguments into the current (freshly pushed) frame.
    fn bind_args(
        &mut self,
        params: ParamRange,
        args: &[EvaluatedArg],
        span: Span,
    ) -> ExpandResult<()> {
        self.binder
            .bind(self.arena, params, args, &mut self.env)
            .map_err(|source| {
                let (path, line) = self.location(span);
                ExpandError::Bind { source, path, line }
            })
    }

    /// Splice the nearest enclosing invocation's content block into the
    /// current target, preserving statement order.
    fn splice_content(&mut self, span: Span) -> ExpandResult<()> {
        let Some(&content) = self.content_stack.last() else {
            let (path, line) = self.location(span);
            return Err(ExpandError::ContentOutsideMixin { path, line });
        };
        // Content statements were fully expanded when the invocation
        // pushed them; they are appended as-is.
        for i in 0..self.arena.block(content).len() {
            let stmt = self.arena.block(content).stmts()[i];
            self.append_to_target(stmt);
        }
        Ok(())
    }

    /// Produce an embedded warning for a construct expansion does not
    /// handle.
    fn unhandled(&mut self, kind: StmtKind, span: Span) -> StmtId {
        let message = self
            .interner
            .intern(&format!("expansion does not handle {}", kind.name()));
        self.arena.alloc_stmt(StmtKind::Warning { message }, span)
    }

    // Evaluation helpers

    /// Reduce an expression via the evaluator, attaching the node's source
    /// location to any failure.
    fn eval(&mut self, expr: ExprId) -> ExpandResult<ExprId> {
        let span = self.arena.expr(expr).span;
        self.evaluator
            .evaluate(self.arena, &self.env, expr)
            .map_err(|source| self.eval_error(source, span))
    }

    /// Reduce an expression that must come out as a string literal
    /// (property names and property-group fragments).
    fn eval_to_name(&mut self, expr: ExprId) -> ExpandResult<Name> {
        let evaluated = self.eval(expr)?;
        let node = self.arena.expr(evaluated);
        match node.kind.as_str() {
            Some(name) => Ok(name),
            None => Err(self.eval_error(
                EvalError::new("property name did not reduce to a string"),
                node.span,
            )),
        }
    }

    /// Concatenate two interned names with the fixed `-` separator.
    fn join_names(&self, prefix: Name, suffix: Name) -> Name {
        let joined = format!(
            "{}-{}",
            self.interner.resolve(prefix),
            self.interner.resolve(suffix)
        );
        self.interner.intern(&joined)
    }

    // Working-state helpers

    /// Run `f` with `target` as the current append target.
    fn with_target<T>(
        &mut self,
        target: BlockId,
        f: impl FnOnce(&mut Self) -> ExpandResult<T>,
    ) -> ExpandResult<T> {
        self.block_stack.push(target);
        let result = f(self);
        self.block_stack.pop();
        result
    }

    /// Run `f` with `content` as the nearest content block.
    fn with_content<T>(
        &mut self,
        content: BlockId,
        f: impl FnOnce(&mut Self) -> ExpandResult<T>,
    ) -> ExpandResult<T> {
        self.content_stack.push(content);
        let result = f(self);
        self.content_stack.pop();
        result
    }

    /// Run `f` with `prefix` as the enclosing property-name prefix.
    fn with_prefix<T>(
        &mut self,
        prefix: Name,
        f: impl FnOnce(&mut Self) -> ExpandResult<T>,
    ) -> ExpandResult<T> {
        self.property_stack.push(prefix);
        let result = f(self);
        self.property_stack.pop();
        result
    }

    /// Append a finished statement to the current target block.
    fn append_to_target(&mut self, stmt: StmtId) {
        let target = self.current_target();
        self.arena.push_to_block(target, stmt);
    }

    fn current_target(&self) -> BlockId {
        match self.block_stack.last() {
            Some(&target) => target,
            // expand_stmt only runs inside append_block, which only runs
            // under with_target.
            None => unreachable!("statement produced outside any block target"),
        }
    }

    // Error helpers

    fn undefined_mixin(&self, name: Name, span: Span) -> ExpandError {
        let (path, line) = self.location(span);
        ExpandError::UndefinedMixin {
            name: self.interner.resolve(name).to_owned(),
            path,
            line,
        }
    }

    fn eval_error(&self, source: EvalError, span: Span) -> ExpandError {
        let (path, line) = self.location(span);
        ExpandError::Eval { source, path, line }
    }

    fn location(&self, span: Span) -> (String, u32) {
        (self.interner.resolve(span.path).to_owned(), span.line)
    }
}
