// rb_ir/types - the typed AST produced by desugaring. A deliberately small
// node set: every surface construct is expressed through these primitives.
use rb_ast::Span;
use rb_core::{NameRef, SymbolRef};
use serde::{Deserialize, Serialize};

/// Which namespace an unresolved identifier lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentKind {
    Local,
    Instance,
    Class,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Integer(i64),
    Float(f64),
    Str(NameRef),
    Sym(NameRef),
    True,
    False,
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Module,
}

/// Call-site flags carried on a `Send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SendFlags {
    /// Set when the receiver was absent in the source and rewritten to
    /// `self`; such calls may reach private methods.
    pub private_ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodFlags {
    /// `def self.m` definitions.
    pub self_method: bool,
}

/// A literal block. Only reachable through [`IrNode::Send::block`], which is
/// what keeps "no free-standing blocks" true by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrBlock {
    pub args: Vec<IrNode>,
    pub body: Box<IrNode>,
    pub span: Span,
}

/// One handler of a `Rescue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrRescueCase {
    pub exceptions: Vec<IrNode>,
    pub var: Box<IrNode>,
    pub body: Box<IrNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrNode {
    /// Placeholder for an absent child or an unrecoverable construct.
    EmptyTree {
        span: Span,
    },
    Literal {
        value: LiteralValue,
        span: Span,
    },
    Local {
        name: NameRef,
        span: Span,
    },
    UnresolvedIdent {
        kind: IdentKind,
        name: NameRef,
        span: Span,
    },
    UnresolvedConstant {
        scope: Box<IrNode>,
        name: NameRef,
        span: Span,
    },
    /// A constant already known to the symbol table.
    Constant {
        symbol: SymbolRef,
        span: Span,
    },
    SelfRef {
        span: Span,
    },
    Assign {
        lhs: Box<IrNode>,
        rhs: Box<IrNode>,
        span: Span,
    },
    /// Evaluate `stats` in order; the value is `expr`.
    InsSeq {
        stats: Vec<IrNode>,
        expr: Box<IrNode>,
        span: Span,
    },
    If {
        cond: Box<IrNode>,
        then_branch: Box<IrNode>,
        else_branch: Box<IrNode>,
        span: Span,
    },
    While {
        cond: Box<IrNode>,
        body: Box<IrNode>,
        span: Span,
    },
    Send {
        recv: Box<IrNode>,
        method: NameRef,
        args: Vec<IrNode>,
        flags: SendFlags,
        block: Option<Box<IrBlock>>,
        span: Span,
    },
    Array {
        elements: Vec<IrNode>,
        span: Span,
    },
    Hash {
        keys: Vec<IrNode>,
        values: Vec<IrNode>,
        span: Span,
    },
    Return {
        expr: Box<IrNode>,
        span: Span,
    },
    Break {
        expr: Box<IrNode>,
        span: Span,
    },
    Next {
        expr: Box<IrNode>,
        span: Span,
    },
    Yield {
        args: Vec<IrNode>,
        span: Span,
    },
    Retry {
        span: Span,
    },
    ClassDef {
        symbol: SymbolRef,
        kind: ClassKind,
        name: Box<IrNode>,
        ancestors: Vec<IrNode>,
        body: Vec<IrNode>,
        decl_span: Span,
        span: Span,
    },
    MethodDef {
        name: NameRef,
        args: Vec<IrNode>,
        body: Box<IrNode>,
        flags: MethodFlags,
        decl_span: Span,
        span: Span,
    },
    Rescue {
        body: Box<IrNode>,
        cases: Vec<IrRescueCase>,
        else_branch: Box<IrNode>,
        ensure: Box<IrNode>,
        span: Span,
    },

    // Parameter shapes
    RestArg {
        inner: Box<IrNode>,
        span: Span,
    },
    KeywordArg {
        inner: Box<IrNode>,
        span: Span,
    },
    OptionalArg {
        inner: Box<IrNode>,
        default: Box<IrNode>,
        span: Span,
    },
    BlockArg {
        inner: Box<IrNode>,
        span: Span,
    },
    ShadowArg {
        inner: Box<IrNode>,
        span: Span,
    },
    /// Sentinel argument of `self.super(...)`: forward the caller's arguments.
    ZSuperArgs {
        span: Span,
    },
}

impl IrNode {
    pub fn span(&self) -> &Span {
        match self {
            IrNode::EmptyTree { span }
            | IrNode::Literal { span, .. }
            | IrNode::Local { span, .. }
            | IrNode::UnresolvedIdent { span, .. }
            | IrNode::UnresolvedConstant { span, .. }
            | IrNode::Constant { span, .. }
            | IrNode::SelfRef { span }
            | IrNode::Assign { span, .. }
            | IrNode::InsSeq { span, .. }
            | IrNode::If { span, .. }
            | IrNode::While { span, .. }
            | IrNode::Send { span, .. }
            | IrNode::Array { span, .. }
            | IrNode::Hash { span, .. }
            | IrNode::Return { span, .. }
            | IrNode::Break { span, .. }
            | IrNode::Next { span, .. }
            | IrNode::Yield { span, .. }
            | IrNode::Retry { span }
            | IrNode::ClassDef { span, .. }
            | IrNode::MethodDef { span, .. }
            | IrNode::Rescue { span, .. }
            | IrNode::RestArg { span, .. }
            | IrNode::KeywordArg { span, .. }
            | IrNode::OptionalArg { span, .. }
            | IrNode::BlockArg { span, .. }
            | IrNode::ShadowArg { span, .. }
            | IrNode::ZSuperArgs { span } => span,
        }
    }

    pub fn is_empty_tree(&self) -> bool {
        matches!(self, IrNode::EmptyTree { .. })
    }

    /// A bare reference: safe to duplicate without re-evaluating effects.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            IrNode::Local { .. } | IrNode::UnresolvedIdent { .. }
        )
    }

    pub fn is_string_lit(&self) -> bool {
        matches!(
            self,
            IrNode::Literal {
                value: LiteralValue::Str(_),
                ..
            }
        )
    }

    pub fn as_symbol_lit(&self) -> Option<NameRef> {
        match self {
            IrNode::Literal {
                value: LiteralValue::Sym(name),
                ..
            } => Some(*name),
            _ => None,
        }
    }
}
