//! Test fixture and collaborator stubs.

use std::fmt::Write as _;

use cress_ir::{
    ArgRange, BlockId, CallArg, DefinitionKind, ExprId, ExprKind, Name, Param, ParamRange, Span,
    Stmt, StmtId, StmtKind, StringInterner, StyleArena,
};

use crate::environment::{Binding, Environment, ScopeKey};
use crate::{Bind, BindError, EvalError, Evaluate, EvaluatedArg, Expander, ExpandResult, ImportRegistry};

/// Minimal literal evaluator: substitutes variables from the environment
/// and reduces interpolation schemas to string literals.
pub struct LiteralEvaluator<'a> {
    pub interner: &'a StringInterner,
}

impl Evaluate for LiteralEvaluator<'_> {
    fn evaluate(
        &mut self,
        arena: &mut StyleArena,
        env: &Environment,
        expr: ExprId,
    ) -> Result<ExprId, EvalError> {
        let node = arena.expr(expr);
        match node.kind {
            ExprKind::Str(_) | ExprKind::Number { .. } | ExprKind::Raw(_) => Ok(expr),
            ExprKind::Variable(name) => match env.lookup(ScopeKey::variable(name)) {
                Some(binding) => match binding.as_value() {
                    Some(value) => Ok(value),
                    None => Err(EvalError::new(format!(
                        "`${}` is not a value binding",
                        self.interner.resolve(name)
                    ))),
                },
                None => Err(EvalError::new(format!(
                    "undefined variable `${}`",
                    self.interner.resolve(name)
                ))),
            },
            ExprKind::Interp(range) => {
                let parts = arena.expr_list(range).to_vec();
                let mut out = String::new();
                for part in parts {
                    let reduced = self.evaluate(arena, env, part)?;
                    match arena.expr(reduced).kind {
                        ExprKind::Str(name) | ExprKind::Raw(name) => {
                            out.push_str(self.interner.resolve(name));
                        }
                        ExprKind::Number { bits, unit } => {
                            push_number(&mut out, bits, self.interner.resolve(unit));
                        }
                        other => {
                            return Err(EvalError::new(format!(
                                "cannot interpolate {other:?}"
                            )))
                        }
                    }
                }
                let name = self.interner.intern(&out);
                Ok(arena.alloc_expr(ExprKind::Str(name), node.span))
            }
            ExprKind::List(range) => {
                let parts = arena.expr_list(range).to_vec();
                let mut reduced = Vec::with_capacity(parts.len());
                for part in parts {
                    reduced.push(self.evaluate(arena, env, part)?);
                }
                let range = arena.alloc_expr_list(reduced);
                Ok(arena.alloc_expr(ExprKind::List(range), node.span))
            }
        }
    }
}

fn push_number(out: &mut String, bits: u64, unit: &str) {
    let value = f64::from_bits(bits);
    if value.fract() == 0.0 {
        let _ = write!(out, "{}{unit}", value as i64);
    } else {
        let _ = write!(out, "{value}{unit}");
    }
}

/// Minimal binder: named arguments match by name, the rest bind
/// positionally, defaults fill the gaps.
pub struct PositionalBinder<'a> {
    pub interner: &'a StringInterner,
}

impl Bind for PositionalBinder<'_> {
    fn bind(
        &mut self,
        arena: &mut StyleArena,
        params: ParamRange,
        args: &[EvaluatedArg],
        env: &mut Environment,
    ) -> Result<(), BindError> {
        let params: Vec<Param> = arena.params(params).to_vec();
        let mut used = vec![false; args.len()];
        let mut next_positional = 0;

        for param in &params {
            let named = args
                .iter()
                .position(|arg| arg.is_named() && arg.name == param.name);
            let value = if let Some(i) = named {
                used[i] = true;
                args[i].value
            } else {
                let mut positional = None;
                while next_positional < args.len() {
                    let i = next_positional;
                    next_positional += 1;
                    if !args[i].is_named() {
                        used[i] = true;
                        positional = Some(args[i].value);
                        break;
                    }
                }
                match positional.or(param.default) {
                    Some(value) => value,
                    None => {
                        return Err(BindError::new(format!(
                            "missing required argument `${}`",
                            self.interner.resolve(param.name)
                        )))
                    }
                }
            };
            env.define(ScopeKey::variable(param.name), Binding::Value(value));
        }

        for (i, arg) in args.iter().enumerate() {
            if !used[i] {
                if arg.is_named() {
                    return Err(BindError::new(format!(
                        "unknown named argument `${}`",
                        self.interner.resolve(arg.name)
                    )));
                }
                return Err(BindError::new(format!(
                    "too many arguments: expected {}",
                    params.len()
                )));
            }
        }
        Ok(())
    }
}

/// Builds sheets, runs expansion, and inspects results.
pub struct Fixture {
    pub arena: StyleArena,
    pub interner: StringInterner,
    pub registry: ImportRegistry,
    pub path: Name,
}

impl Fixture {
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let path = interner.intern("test.cress");
        Fixture {
            arena: StyleArena::new(),
            interner,
            registry: ImportRegistry::new(),
            path,
        }
    }

    pub fn span(&self, line: u32) -> Span {
        Span::new(self.path, line)
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    // Expression builders

    pub fn str_expr(&mut self, s: &str, line: u32) -> ExprId {
        let name = self.name(s);
        let span = self.span(line);
        self.arena.alloc_expr(ExprKind::Str(name), span)
    }

    pub fn var_expr(&mut self, name: &str, line: u32) -> ExprId {
        let name = self.name(name);
        let span = self.span(line);
        self.arena.alloc_expr(ExprKind::Variable(name), span)
    }

    pub fn raw_expr(&mut self, s: &str, line: u32) -> ExprId {
        let name = self.name(s);
        let span = self.span(line);
        self.arena.alloc_expr(ExprKind::Raw(name), span)
    }

    pub fn interp_expr(&mut self, parts: &[ExprId], line: u32) -> ExprId {
        let range = self.arena.alloc_expr_list(parts.iter().copied());
        let span = self.span(line);
        self.arena.alloc_expr(ExprKind::Interp(range), span)
    }

    // Statement builders

    pub fn decl(&mut self, property: &str, value: ExprId, line: u32) -> StmtId {
        let property = self.str_expr(property, line);
        self.decl_expr(property, value, line)
    }

    pub fn decl_expr(&mut self, property: ExprId, value: ExprId, line: u32) -> StmtId {
        let span = self.span(line);
        self.arena
            .alloc_stmt(StmtKind::Declaration { property, value }, span)
    }

    pub fn decl_str(&mut self, property: &str, value: &str, line: u32) -> StmtId {
        let value = self.str_expr(value, line);
        self.decl(property, value, line)
    }

    pub fn decl_var(&mut self, property: &str, variable: &str, line: u32) -> StmtId {
        let value = self.var_expr(variable, line);
        self.decl(property, value, line)
    }

    pub fn assign(&mut self, name: &str, value: &str, line: u32) -> StmtId {
        self.assignment(name, value, false, line)
    }

    pub fn assign_guarded(&mut self, name: &str, value: &str, line: u32) -> StmtId {
        self.assignment(name, value, true, line)
    }

    fn assignment(&mut self, name: &str, value: &str, guarded: bool, line: u32) -> StmtId {
        let value = self.str_expr(value, line);
        self.assign_expr(name, value, guarded, line)
    }

    pub fn assign_expr(&mut self, name: &str, value: ExprId, guarded: bool, line: u32) -> StmtId {
        let name = self.name(name);
        let span = self.span(line);
        self.arena.alloc_stmt(
            StmtKind::Assignment {
                name,
                value,
                guarded,
            },
            span,
        )
    }

    pub fn block(&mut self, stmts: &[StmtId], is_root: bool, line: u32) -> BlockId {
        let span = self.span(line);
        let block = self.arena.alloc_block(span, is_root);
        for &stmt in stmts {
            self.arena.push_to_block(block, stmt);
        }
        block
    }

    pub fn ruleset(&mut self, selector: &str, body: BlockId, line: u32) -> StmtId {
        let selector = self.raw_expr(selector, line);
        let span = self.span(line);
        self.arena
            .alloc_stmt(StmtKind::Ruleset { selector, body }, span)
    }

    pub fn prop_group(&mut self, fragment: &str, body: BlockId, line: u32) -> StmtId {
        let fragment = self.str_expr(fragment, line);
        self.prop_group_expr(fragment, body, line)
    }

    pub fn prop_group_expr(&mut self, fragment: ExprId, body: BlockId, line: u32) -> StmtId {
        let span = self.span(line);
        self.arena
            .alloc_stmt(StmtKind::PropGroup { fragment, body }, span)
    }

    pub fn mixin_def(&mut self, name: &str, params: ParamRange, body: BlockId, line: u32) -> StmtId {
        let name = self.name(name);
        let span = self.span(line);
        self.arena.alloc_stmt(
            StmtKind::Definition {
                name,
                kind: DefinitionKind::Mixin,
                params,
                body,
            },
            span,
        )
    }

    pub fn no_params(&mut self) -> ParamRange {
        self.arena.alloc_params([])
    }

    pub fn param(&mut self, name: &str, line: u32) -> Param {
        let span = self.span(line);
        Param::required(self.name(name), span)
    }

    pub fn param_default(&mut self, name: &str, default: &str, line: u32) -> Param {
        let default = self.str_expr(default, line);
        let span = self.span(line);
        Param::with_default(self.name(name), default, span)
    }

    pub fn no_args(&mut self) -> ArgRange {
        self.arena.alloc_args([])
    }

    pub fn args(&mut self, values: &[ExprId], line: u32) -> ArgRange {
        let span = self.span(line);
        let args: Vec<CallArg> = values
            .iter()
            .map(|&value| CallArg::positional(value, span))
            .collect();
        self.arena.alloc_args(args)
    }

    pub fn named_arg(&mut self, name: &str, value: ExprId, line: u32) -> CallArg {
        let span = self.span(line);
        CallArg::named(self.name(name), value, span)
    }

    pub fn call_args(&mut self, args: &[CallArg]) -> ArgRange {
        self.arena.alloc_args(args.iter().copied())
    }

    pub fn include(
        &mut self,
        name: &str,
        args: ArgRange,
        content: Option<BlockId>,
        line: u32,
    ) -> StmtId {
        let name = self.name(name);
        let span = self.span(line);
        self.arena.alloc_stmt(
            StmtKind::MixinCall {
                name,
                args,
                content,
            },
            span,
        )
    }

    pub fn content_stmt(&mut self, line: u32) -> StmtId {
        let span = self.span(line);
        self.arena.alloc_stmt(StmtKind::Content, span)
    }

    pub fn comment(&mut self, text: &str, line: u32) -> StmtId {
        let text = self.name(text);
        let span = self.span(line);
        self.arena.alloc_stmt(StmtKind::Comment { text }, span)
    }

    pub fn media_block(&mut self, queries: &[ExprId], body: BlockId, line: u32) -> StmtId {
        let queries = self.arena.alloc_expr_list(queries.iter().copied());
        let span = self.span(line);
        self.arena
            .alloc_stmt(StmtKind::MediaBlock { queries, body }, span)
    }

    pub fn at_rule(&mut self, keyword: &str, body: Option<BlockId>, line: u32) -> StmtId {
        let keyword = self.name(keyword);
        let span = self.span(line);
        self.arena.alloc_stmt(
            StmtKind::AtRule {
                keyword,
                prelude: None,
                body,
            },
            span,
        )
    }

    pub fn bodyless_at_rule(&mut self, keyword: &str, line: u32) -> StmtId {
        self.at_rule(keyword, None, line)
    }

    pub fn plain_import(&mut self, targets: &[ExprId], line: u32) -> StmtId {
        let targets = self.arena.alloc_expr_list(targets.iter().copied());
        let span = self.span(line);
        self.arena.alloc_stmt(StmtKind::Import { targets }, span)
    }

    pub fn resolved_import(&mut self, file: &str, line: u32) -> StmtId {
        let file = self.name(file);
        let span = self.span(line);
        self.arena
            .alloc_stmt(StmtKind::ResolvedImport { file }, span)
    }

    pub fn extend(&mut self, selector: &str, line: u32) -> StmtId {
        let selector = self.raw_expr(selector, line);
        let span = self.span(line);
        self.arena.alloc_stmt(StmtKind::Extend { selector }, span)
    }

    // Running and inspecting

    pub fn expand_sheet(&mut self, root: BlockId) -> ExpandResult<BlockId> {
        let mut evaluator = LiteralEvaluator {
            interner: &self.interner,
        };
        let mut binder = PositionalBinder {
            interner: &self.interner,
        };
        let mut expander = Expander::new(
            &mut self.arena,
            &self.interner,
            &self.registry,
            &mut evaluator,
            &mut binder,
            Environment::new(),
        );
        expander.expand(root)
    }

    pub fn stmts(&self, block: BlockId) -> Vec<Stmt> {
        self.arena
            .block(block)
            .stmts()
            .iter()
            .map(|&id| self.arena.stmt(id))
            .collect()
    }

    pub fn stmt_ids(&self, block: BlockId) -> Vec<StmtId> {
        self.arena.block(block).stmts().to_vec()
    }

    /// Property and value of a declaration, as resolved strings.
    pub fn decl_strings(&self, id: StmtId) -> (String, String) {
        let stmt = self.arena.stmt(id);
        let StmtKind::Declaration { property, value } = stmt.kind else {
            panic!("expected a declaration, got {stmt:?}");
        };
        (self.expr_string(property), self.expr_string(value))
    }

    pub fn expr_string(&self, id: ExprId) -> String {
        match self.arena.expr(id).kind {
            ExprKind::Str(name) | ExprKind::Raw(name) => self.interner.resolve(name).to_owned(),
            ExprKind::Variable(name) => format!("${}", self.interner.resolve(name)),
            other => format!("{other:?}"),
        }
    }

    /// The declarations of a block, as (property, value) string pairs.
    pub fn decls(&self, block: BlockId) -> Vec<(String, String)> {
        self.stmt_ids(block)
            .iter()
            .map(|&id| self.decl_strings(id))
            .collect()
    }
}

/// Owned (property, value) pairs for comparison against [`Fixture::decls`].
pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|&(p, v)| (p.to_owned(), v.to_owned()))
        .collect()
}
