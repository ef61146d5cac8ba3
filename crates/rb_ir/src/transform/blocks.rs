// rb_ir/transform/blocks - attaching literal blocks to their call and
// converting block-pass arguments into synthesized blocks.
use rb_ast::{Node, Span};
use rb_core::{names, symbols};

use super::{arguments, transform_node};
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::{IrBlock, IrNode};

/// A call with a literal block: desugar the call first, then hang the block
/// off the resulting `Send`. A safe-navigation call has already been
/// rewritten into `InsSeq(.., If(nil?, nil, send))`, so the send to attach
/// to sits in the else branch.
pub fn desugar_block(
    send: Node,
    args: Option<Box<Node>>,
    body: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let mut recv = transform_node(send, context)?;
    let (block_args, block_body) = arguments::desugar_args_and_body(args, body, &span, context)?;
    let block = mk::block(span.clone(), block_args, block_body);

    let slot = match &mut recv {
        IrNode::Send { block, .. } => block,
        IrNode::InsSeq { expr, .. } => match expr.as_mut() {
            IrNode::If { else_branch, .. } => match else_branch.as_mut() {
                IrNode::Send { block, .. } => block,
                _ => {
                    return Err(TransformError::internal(
                        "block target is not a Send",
                        &span,
                    ));
                }
            },
            _ => {
                return Err(TransformError::internal(
                    "block target sequence does not end in an If",
                    &span,
                ));
            }
        },
        _ => {
            return Err(TransformError::internal(
                "block attached to something that is not a call",
                &span,
            ));
        }
    };
    *slot = Some(Box::new(block));
    Ok(recv)
}

/// Converts a block-pass argument into a block:
///
/// - `&:m` becomes `{ |t| t.m }`
/// - `&f` becomes `{ |*t| Magic.<call-with-splat>(f.to_proc, :call, t) }`
pub fn node_to_proc(
    node: Option<Box<Node>>,
    context: &mut DesugarContext<'_>,
) -> Result<Option<IrBlock>, TransformError> {
    let Some(node) = node else {
        return Ok(None);
    };

    let expr = transform_node(*node, context)?;
    let span = expr.span().clone();
    let temp = context.fresh_name(names::BLOCK_PASS_TEMP);

    if let Some(method) = expr.as_symbol_lit() {
        let args = vec![mk::local(span.clone(), temp)];
        let body = mk::send0(span.clone(), mk::local(span.clone(), temp), method);
        return Ok(Some(mk::block(span, args, body)));
    }

    let proc = mk::send0(span.clone(), expr, names::TO_PROC);
    let args = vec![mk::rest_arg(span.clone(), mk::local(span.clone(), temp))];
    let body = mk::send3(
        span.clone(),
        mk::constant(span.clone(), symbols::MAGIC),
        names::CALL_WITH_SPLAT,
        proc,
        mk::sym(span.clone(), names::CALL),
        mk::local(span.clone(), temp),
    );
    Ok(Some(mk::block(span, args, body)))
}
