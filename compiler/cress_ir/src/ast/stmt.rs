//! Statement nodes.
//!
//! `StmtKind` is the closed set expansion dispatches on. Adding a variant is
//! a compile error in every pass until that pass gives it an arm, so no
//! construct can be silently skipped.

use std::fmt;

use crate::{ArgRange, BlockId, ExprId, ExprRange, Name, ParamRange, Span, Spanned};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// Whether a definition introduces a mixin or a function.
///
/// Mixins, functions, and variables share one namespace but are keyed
/// disjointly in scopes, so a mixin never collides with a variable of the
/// same source name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DefinitionKind {
    /// `@mixin name(params) { body }`, inlined at each `@include`.
    Mixin,
    /// `@function name(params) { body }`, called from value position.
    Function,
}

/// Statement variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Style rule: selector plus a body block.
    Ruleset { selector: ExprId, body: BlockId },

    /// Nested property shorthand: `font: { size: 10px; }`. Flattened into
    /// prefixed declarations during expansion.
    PropGroup { fragment: ExprId, body: BlockId },

    /// `@media` rule: query list plus a body block.
    MediaBlock { queries: ExprRange, body: BlockId },

    /// Generic at-rule, with or without a body: `@font-face { ... }`,
    /// `@charset "utf-8";`.
    AtRule {
        keyword: Name,
        prelude: Option<ExprId>,
        body: Option<BlockId>,
    },

    /// Property declaration: `color: $fg;`.
    Declaration { property: ExprId, value: ExprId },

    /// Variable assignment: `$x: 1;` or guarded `$x: 1 !default;`.
    /// Mutates scope state and contributes nothing to the output tree.
    Assignment {
        name: Name,
        value: ExprId,
        guarded: bool,
    },

    /// `@import` whose targets have not been resolved to files (plain CSS
    /// imports); passed through to the emitter.
    Import { targets: ExprRange },

    /// `@import` resolved to an already-parsed style sheet, ready to be
    /// spliced inline.
    ResolvedImport { file: Name },

    /// Comment preserved in output.
    Comment { text: Name },

    /// Mixin or function definition. Registers a binding; no output.
    Definition {
        name: Name,
        kind: DefinitionKind,
        params: ParamRange,
        body: BlockId,
    },

    /// Mixin invocation: `@include name(args) { optional content }`.
    MixinCall {
        name: Name,
        args: ArgRange,
        content: Option<BlockId>,
    },

    /// `@content` placeholder inside a mixin body.
    Content,

    /// `@extend selector;`. Selector resolution is not part of expansion,
    /// so this degrades to a `Warning` node.
    Extend { selector: ExprId },

    /// Diagnostic node embedded where expansion met a construct it does not
    /// handle.
    Warning { message: Name },
}

impl StmtKind {
    /// Human-readable kind name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Ruleset { .. } => "ruleset",
            StmtKind::PropGroup { .. } => "property group",
            StmtKind::MediaBlock { .. } => "@media block",
            StmtKind::AtRule { .. } => "at-rule",
            StmtKind::Declaration { .. } => "declaration",
            StmtKind::Assignment { .. } => "variable assignment",
            StmtKind::Import { .. } => "@import",
            StmtKind::ResolvedImport { .. } => "resolved @import",
            StmtKind::Comment { .. } => "comment",
            StmtKind::Definition { .. } => "definition",
            StmtKind::MixinCall { .. } => "@include",
            StmtKind::Content => "@content",
            StmtKind::Extend { .. } => "@extend",
            StmtKind::Warning { .. } => "warning",
        }
    }
}
