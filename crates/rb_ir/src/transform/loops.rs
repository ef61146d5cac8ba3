// rb_ir/transform/loops - while/until in both positions plus `for`. Only
// `While` survives into the typed AST; everything else is negation, break
// rewrites and an `each` call.
use rb_ast::{Node, Span};
use rb_core::names;

use super::{lower_opt, transform_node};
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::IrNode;

pub fn desugar_while(
    cond: Node,
    body: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let cond = transform_node(cond, context)?;
    let body = lower_opt(body, &span, context)?;
    Ok(mk::while_(span, cond, body))
}

/// `until c` is `while !c`.
pub fn desugar_until(
    cond: Node,
    body: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let cond = transform_node(cond, context)?;
    let cond = mk::send0(span.clone(), cond, names::BANG);
    let body = lower_opt(body, &span, context)?;
    Ok(mk::while_(span, cond, body))
}

/// `body while cond` runs the body first only when the body is an explicit
/// `begin ... end`; that form becomes
///
///   while true
///     <temp> = <body>
///     break <temp> if !<cond>
///   end
///
/// Anything else is an ordinary while.
pub fn desugar_while_post(
    cond: Node,
    body: Node,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let is_do_while = matches!(body, Node::Kwbegin { .. });
    let body = transform_node(body, context)?;

    if is_do_while {
        let cond = transform_node(cond, context)?;
        let stop = mk::send0(span.clone(), cond, names::BANG);
        Ok(build_post_loop(stop, body, span, context))
    } else {
        let cond = transform_node(cond, context)?;
        Ok(mk::while_(span, cond, body))
    }
}

/// The `until` counterpart of [`desugar_while_post`]: the stop condition is
/// the condition itself, the plain form negates.
pub fn desugar_until_post(
    cond: Node,
    body: Node,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let is_do_until = matches!(body, Node::Kwbegin { .. });
    let body = transform_node(body, context)?;

    let cond = transform_node(cond, context)?;
    if is_do_until {
        Ok(build_post_loop(cond, body, span, context))
    } else {
        let cond = mk::send0(span.clone(), cond, names::BANG);
        Ok(mk::while_(span, cond, body))
    }
}

fn build_post_loop(
    stop: IrNode,
    body: IrNode,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> IrNode {
    let temp = context.fresh_name(names::FOR_TEMP);
    let with_result = mk::assign_local(span.clone(), temp, body);
    let breaker = mk::if_(
        span.clone(),
        stop,
        mk::break_(span.clone(), mk::local(span.clone(), temp)),
        mk::empty(span.clone()),
    );
    let looped = mk::ins_seq1(span.clone(), with_result, breaker);
    mk::while_(span.clone(), mk::true_(span), looped)
}

/// `for vars in expr; body; end` becomes `expr.each { |*t| vars = t; body }`.
/// A single loop variable is wrapped into a one-element target list first so
/// the multiple-assignment expansion applies uniformly.
pub fn desugar_for(
    vars: Node,
    expr: Node,
    body: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let (temp, temp_str) = context.fresh_name_str(names::FOR_TEMP);

    let mlhs = if matches!(vars, Node::Mlhs { .. }) {
        vars
    } else {
        Node::Mlhs {
            items: vec![vars],
            span: span.clone(),
        }
    };
    let masgn = Node::Masgn {
        lhs: Box::new(mlhs),
        rhs: Box::new(Node::LVar {
            name: temp_str,
            span: span.clone(),
        }),
        span: span.clone(),
    };

    let destructure = transform_node(masgn, context)?;
    let body = lower_opt(body, &span, context)?;
    let block_body = mk::ins_seq1(span.clone(), destructure, body);

    let block_args = vec![mk::rest_arg(span.clone(), mk::local(span.clone(), temp))];
    let block = mk::block(span.clone(), block_args, block_body);

    let recv = transform_node(expr, context)?;
    Ok(mk::send_with_block(
        span,
        recv,
        names::EACH,
        Vec::new(),
        Default::default(),
        Some(block),
    ))
}
