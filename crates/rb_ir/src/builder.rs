// rb_ir/builder - constructors for typed-AST nodes. Thin by contract: each
// returns a node with exactly the given span, kind and children. Imported as
// `use crate::builder as mk` throughout the pass.
use rb_ast::Span;
use rb_core::{names, symbols, NameRef, SymbolRef};

use crate::types::{
    ClassKind, IdentKind, IrBlock, IrNode, IrRescueCase, LiteralValue, MethodFlags, SendFlags,
};

pub fn empty(span: Span) -> IrNode {
    IrNode::EmptyTree { span }
}

pub fn int(span: Span, value: i64) -> IrNode {
    IrNode::Literal {
        value: LiteralValue::Integer(value),
        span,
    }
}

pub fn float(span: Span, value: f64) -> IrNode {
    IrNode::Literal {
        value: LiteralValue::Float(value),
        span,
    }
}

pub fn str_(span: Span, value: NameRef) -> IrNode {
    IrNode::Literal {
        value: LiteralValue::Str(value),
        span,
    }
}

pub fn sym(span: Span, value: NameRef) -> IrNode {
    IrNode::Literal {
        value: LiteralValue::Sym(value),
        span,
    }
}

pub fn true_(span: Span) -> IrNode {
    IrNode::Literal {
        value: LiteralValue::True,
        span,
    }
}

pub fn false_(span: Span) -> IrNode {
    IrNode::Literal {
        value: LiteralValue::False,
        span,
    }
}

pub fn nil(span: Span) -> IrNode {
    IrNode::Literal {
        value: LiteralValue::Nil,
        span,
    }
}

pub fn local(span: Span, name: NameRef) -> IrNode {
    IrNode::Local { name, span }
}

pub fn ident(span: Span, kind: IdentKind, name: NameRef) -> IrNode {
    IrNode::UnresolvedIdent { kind, name, span }
}

pub fn unresolved_constant(span: Span, scope: IrNode, name: NameRef) -> IrNode {
    IrNode::UnresolvedConstant {
        scope: Box::new(scope),
        name,
        span,
    }
}

pub fn constant(span: Span, symbol: SymbolRef) -> IrNode {
    IrNode::Constant { symbol, span }
}

pub fn self_(span: Span) -> IrNode {
    IrNode::SelfRef { span }
}

pub fn assign(span: Span, lhs: IrNode, rhs: IrNode) -> IrNode {
    IrNode::Assign {
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        span,
    }
}

pub fn assign_local(span: Span, name: NameRef, rhs: IrNode) -> IrNode {
    let lhs = local(span.clone(), name);
    assign(span, lhs, rhs)
}

/// Statement sequence. Collapses to `expr` when there are no statements, so
/// a one-statement `begin` lowers to the statement itself.
pub fn ins_seq(span: Span, stats: Vec<IrNode>, expr: IrNode) -> IrNode {
    if stats.is_empty() {
        return expr;
    }
    IrNode::InsSeq {
        stats,
        expr: Box::new(expr),
        span,
    }
}

pub fn ins_seq1(span: Span, stat: IrNode, expr: IrNode) -> IrNode {
    ins_seq(span, vec![stat], expr)
}

pub fn if_(span: Span, cond: IrNode, then_branch: IrNode, else_branch: IrNode) -> IrNode {
    IrNode::If {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
        span,
    }
}

pub fn while_(span: Span, cond: IrNode, body: IrNode) -> IrNode {
    IrNode::While {
        cond: Box::new(cond),
        body: Box::new(body),
        span,
    }
}

pub fn send_with_block(
    span: Span,
    recv: IrNode,
    method: NameRef,
    args: Vec<IrNode>,
    flags: SendFlags,
    block: Option<IrBlock>,
) -> IrNode {
    IrNode::Send {
        recv: Box::new(recv),
        method,
        args,
        flags,
        block: block.map(Box::new),
        span,
    }
}

pub fn send(span: Span, recv: IrNode, method: NameRef, args: Vec<IrNode>) -> IrNode {
    send_with_block(span, recv, method, args, SendFlags::default(), None)
}

pub fn send0(span: Span, recv: IrNode, method: NameRef) -> IrNode {
    send(span, recv, method, Vec::new())
}

pub fn send1(span: Span, recv: IrNode, method: NameRef, arg: IrNode) -> IrNode {
    send(span, recv, method, vec![arg])
}

pub fn send2(span: Span, recv: IrNode, method: NameRef, arg0: IrNode, arg1: IrNode) -> IrNode {
    send(span, recv, method, vec![arg0, arg1])
}

pub fn send3(
    span: Span,
    recv: IrNode,
    method: NameRef,
    arg0: IrNode,
    arg1: IrNode,
    arg2: IrNode,
) -> IrNode {
    send(span, recv, method, vec![arg0, arg1, arg2])
}

pub fn array(span: Span, elements: Vec<IrNode>) -> IrNode {
    IrNode::Array { elements, span }
}

pub fn hash(span: Span, keys: Vec<IrNode>, values: Vec<IrNode>) -> IrNode {
    IrNode::Hash { keys, values, span }
}

pub fn return_(span: Span, expr: IrNode) -> IrNode {
    IrNode::Return {
        expr: Box::new(expr),
        span,
    }
}

pub fn break_(span: Span, expr: IrNode) -> IrNode {
    IrNode::Break {
        expr: Box::new(expr),
        span,
    }
}

pub fn next_(span: Span, expr: IrNode) -> IrNode {
    IrNode::Next {
        expr: Box::new(expr),
        span,
    }
}

pub fn yield_(span: Span, args: Vec<IrNode>) -> IrNode {
    IrNode::Yield { args, span }
}

pub fn retry(span: Span) -> IrNode {
    IrNode::Retry { span }
}

/// Splat in expression position: `Magic.<splat>(expr.to_a)`, a send shape
/// later passes recognize and unpack.
pub fn splat(span: Span, expr: IrNode) -> IrNode {
    let to_a = send0(span.clone(), expr, names::TO_A);
    send1(
        span.clone(),
        constant(span, symbols::MAGIC),
        names::SPLAT,
        to_a,
    )
}

pub fn rest_arg(span: Span, inner: IrNode) -> IrNode {
    IrNode::RestArg {
        inner: Box::new(inner),
        span,
    }
}

pub fn keyword_arg(span: Span, inner: IrNode) -> IrNode {
    IrNode::KeywordArg {
        inner: Box::new(inner),
        span,
    }
}

pub fn optional_arg(span: Span, inner: IrNode, default: IrNode) -> IrNode {
    IrNode::OptionalArg {
        inner: Box::new(inner),
        default: Box::new(default),
        span,
    }
}

pub fn block_arg(span: Span, inner: IrNode) -> IrNode {
    IrNode::BlockArg {
        inner: Box::new(inner),
        span,
    }
}

pub fn shadow_arg(span: Span, inner: IrNode) -> IrNode {
    IrNode::ShadowArg {
        inner: Box::new(inner),
        span,
    }
}

pub fn zsuper_args(span: Span) -> IrNode {
    IrNode::ZSuperArgs { span }
}

pub fn method_def(
    span: Span,
    decl_span: Span,
    name: NameRef,
    args: Vec<IrNode>,
    body: IrNode,
    flags: MethodFlags,
) -> IrNode {
    IrNode::MethodDef {
        name,
        args,
        body: Box::new(body),
        flags,
        decl_span,
        span,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn class_def(
    span: Span,
    decl_span: Span,
    symbol: SymbolRef,
    kind: ClassKind,
    name: IrNode,
    ancestors: Vec<IrNode>,
    body: Vec<IrNode>,
) -> IrNode {
    IrNode::ClassDef {
        symbol,
        kind,
        name: Box::new(name),
        ancestors,
        body,
        decl_span,
        span,
    }
}

pub fn rescue(
    span: Span,
    body: IrNode,
    cases: Vec<IrRescueCase>,
    else_branch: IrNode,
    ensure: IrNode,
) -> IrNode {
    IrNode::Rescue {
        body: Box::new(body),
        cases,
        else_branch: Box::new(else_branch),
        ensure: Box::new(ensure),
        span,
    }
}

pub fn rescue_case(span: Span, exceptions: Vec<IrNode>, var: IrNode, body: IrNode) -> IrRescueCase {
    IrRescueCase {
        exceptions,
        var: Box::new(var),
        body: Box::new(body),
        span,
    }
}

pub fn block(span: Span, args: Vec<IrNode>, body: IrNode) -> IrBlock {
    IrBlock {
        args,
        body: Box::new(body),
        span,
    }
}
