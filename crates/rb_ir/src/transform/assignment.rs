// rb_ir/transform/assignment - short-circuit operators, compound assignment
// and multiple assignment. Everything here follows one discipline: a
// subexpression the rewrite mentions twice is bound to a temporary first.
use rb_ast::{Node, Span};
use rb_core::{names, symbols, ErrorCode, NameRef};

use super::{lower_opt, transform_node};
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::IrNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    /// `&&=`
    And,
    /// `||=`
    Or,
    /// `op=` for the given operator method
    Op(NameRef),
}

/// `a && b`: a bare reference on the left is duplicated, anything else is
/// bound to a fresh `&&` temporary so it evaluates once.
pub fn desugar_and(
    left: Node,
    right: Node,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let lhs = transform_node(left, context)?;
    if lhs.is_reference() {
        let cond = lhs.clone();
        let right = transform_node(right, context)?;
        return Ok(mk::if_(span, cond, right, lhs));
    }
    let temp = context.fresh_name(names::AND_AND);
    let assign = mk::assign_local(span.clone(), temp, lhs);
    let right = transform_node(right, context)?;
    let iff = mk::if_(
        span.clone(),
        mk::local(span.clone(), temp),
        right,
        mk::local(span.clone(), temp),
    );
    Ok(mk::ins_seq1(span, assign, iff))
}

/// `a || b`, the mirror image of [`desugar_and`].
pub fn desugar_or(
    left: Node,
    right: Node,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let lhs = transform_node(left, context)?;
    if lhs.is_reference() {
        let cond = lhs.clone();
        let right = transform_node(right, context)?;
        return Ok(mk::if_(span, cond, lhs, right));
    }
    let temp = context.fresh_name(names::OR_OR);
    let assign = mk::assign_local(span.clone(), temp, lhs);
    let right = transform_node(right, context)?;
    let iff = mk::if_(
        span.clone(),
        mk::local(span.clone(), temp),
        mk::local(span.clone(), temp),
        right,
    );
    Ok(mk::ins_seq1(span, assign, iff))
}

/// `lhs &&= v`, `lhs ||= v` and `lhs op= v` over the three target shapes:
/// a send, a bare reference, or a constant (rejected).
pub fn desugar_compound_assign(
    kind: CompoundKind,
    lhs: Node,
    rhs: Node,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let recv = transform_node(lhs, context)?;
    let arg = transform_node(rhs, context)?;
    match recv {
        IrNode::Send {
            recv,
            method,
            args,
            flags,
            block: _,
            span: send_span,
        } => {
            // Bind the receiver and every argument to temporaries so the
            // read and the writeback see the same values.
            let mut stats = Vec::with_capacity(args.len() + 2);
            let temp_recv = context.fresh_name(method);
            stats.push(mk::assign_local(send_span.clone(), temp_recv, *recv));

            let mut read_args = Vec::with_capacity(args.len());
            let mut assign_args = Vec::with_capacity(args.len() + 1);
            for arg in args {
                let arg_span = arg.span().clone();
                let name = context.fresh_name(method);
                stats.push(mk::assign_local(arg_span.clone(), name, arg));
                read_args.push(mk::local(arg_span.clone(), name));
                assign_args.push(mk::local(arg_span, name));
            }

            let read = mk::send_with_block(
                send_span.clone(),
                mk::local(send_span.clone(), temp_recv),
                method,
                read_args,
                flags,
                None,
            );
            let setter = context.setter_name(method);

            match kind {
                CompoundKind::And | CompoundKind::Or => {
                    let temp_result = context.fresh_name(method);
                    stats.push(mk::assign_local(send_span.clone(), temp_result, read));
                    assign_args.push(arg);
                    let write = mk::send_with_block(
                        send_span.clone(),
                        mk::local(send_span.clone(), temp_recv),
                        setter,
                        assign_args,
                        flags,
                        None,
                    );
                    let keep = mk::local(send_span.clone(), temp_result);
                    let iff = if kind == CompoundKind::And {
                        mk::if_(
                            send_span.clone(),
                            mk::local(send_span.clone(), temp_result),
                            write,
                            keep,
                        )
                    } else {
                        mk::if_(
                            send_span.clone(),
                            mk::local(send_span.clone(), temp_result),
                            keep,
                            write,
                        )
                    };
                    Ok(mk::ins_seq(span, stats, iff))
                }
                CompoundKind::Op(op) => {
                    let new_value = mk::send1(send_span.clone(), read, op, arg);
                    assign_args.push(new_value);
                    let write = mk::send_with_block(
                        send_span.clone(),
                        mk::local(send_span, temp_recv),
                        setter,
                        assign_args,
                        flags,
                        None,
                    );
                    Ok(mk::ins_seq(span, stats, write))
                }
            }
        }
        recv if recv.is_reference() => match kind {
            CompoundKind::And => {
                let cond = recv.clone();
                let keep = recv.clone();
                let body = mk::assign(span.clone(), recv, arg);
                Ok(mk::if_(span, cond, body, keep))
            }
            CompoundKind::Or => {
                let cond = recv.clone();
                let keep = recv.clone();
                let body = mk::assign(span.clone(), recv, arg);
                Ok(mk::if_(span, cond, keep, body))
            }
            CompoundKind::Op(op) => {
                let lhs = recv.clone();
                let computed = mk::send1(span.clone(), recv, op, arg);
                Ok(mk::assign(span, lhs, computed))
            }
        },
        IrNode::UnresolvedConstant { .. } => {
            if let Some(e) = context
                .gs
                .begin_error(span.clone(), ErrorCode::NoConstantReassignment)
            {
                e.set_header("Constant reassignment is not supported".to_string());
            }
            Ok(mk::empty(span))
        }
        other => Err(TransformError::internal(
            "unexpected compound assignment target",
            other.span(),
        )),
    }
}

/// `a, b, *rest = rhs`: the left-hand side is always an `Mlhs`.
pub fn desugar_masgn(
    lhs: Node,
    rhs: Node,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let items = match lhs {
        Node::Mlhs { items, .. } => items,
        other => {
            return Err(TransformError::internal(
                "multiple assignment without an Mlhs target",
                other.span(),
            ));
        }
    };
    let rhs = transform_node(rhs, context)?;
    desugar_mlhs(items, rhs, span, context)
}

/// Expands one assignment-target list against an already-lowered right-hand
/// side. The rhs is normalized through `Magic.<expand-splat>` and bound to a
/// temporary; targets before a splat index from the front, the splat target
/// takes a slice, targets after it index from the back. Nested `Mlhs`
/// targets recurse with the extracted element as their rhs.
pub fn desugar_mlhs(
    items: Vec<Node>,
    rhs: IrNode,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let temp = context.fresh_name(names::ASSIGN_TEMP);
    let total = items.len() as i64;

    let mut stats = Vec::new();
    let mut index: i64 = 0;
    let mut before: i64 = 0;
    let mut after: i64 = 0;
    let mut seen_splat = false;

    for item in items {
        match item {
            Node::SplatLhs {
                var,
                span: splat_span,
            } => {
                if seen_splat {
                    return Err(TransformError::internal(
                        "multiple splats in one assignment target",
                        &splat_span,
                    ));
                }
                seen_splat = true;

                let target = lower_opt(var, &splat_span, context)?;
                let left = index;
                let mut right = total - left - 1;
                if !target.is_empty_tree() {
                    // A trailing splat takes everything to the end, so the
                    // slice becomes inclusive down to -1.
                    let mut exclusive = true;
                    if right == 0 {
                        right = 1;
                        exclusive = false;
                    }
                    let target_span = target.span().clone();
                    let range = mk::send3(
                        target_span.clone(),
                        mk::constant(target_span.clone(), symbols::RANGE),
                        names::NEW,
                        mk::int(target_span.clone(), left),
                        mk::int(target_span.clone(), -right),
                        if exclusive {
                            mk::true_(target_span.clone())
                        } else {
                            mk::false_(target_span.clone())
                        },
                    );
                    let slice = mk::send1(
                        span.clone(),
                        mk::local(span.clone(), temp),
                        names::SLICE,
                        range,
                    );
                    stats.push(mk::assign(target_span, target, slice));
                }
                index = -right;
            }
            item => {
                if seen_splat {
                    after += 1;
                } else {
                    before += 1;
                }
                let value = mk::send1(
                    span.clone(),
                    mk::local(span.clone(), temp),
                    names::SQUARE_BRACKETS,
                    mk::int(span.clone(), index),
                );
                match item {
                    Node::Mlhs {
                        items: nested,
                        span: nested_span,
                    } => stats.push(desugar_mlhs(nested, value, nested_span, context)?),
                    other => {
                        let target = transform_node(other, context)?;
                        let target_span = target.span().clone();
                        stats.push(mk::assign(target_span, target, value));
                    }
                }
                index += 1;
            }
        }
    }

    let expanded = mk::send3(
        span.clone(),
        mk::constant(span.clone(), symbols::MAGIC),
        names::EXPAND_SPLAT,
        rhs,
        mk::int(span.clone(), before),
        mk::int(span.clone(), after),
    );
    stats.insert(0, mk::assign_local(span.clone(), temp, expanded));

    let result = mk::local(span.clone(), temp);
    Ok(mk::ins_seq(span, stats, result))
}
