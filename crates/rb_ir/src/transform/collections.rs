// rb_ir/transform/collections - array and hash literals with splats, and
// range literals.
use rb_ast::{Node, Span};
use rb_core::{names, symbols};

use super::transform_node;
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::IrNode;

/// Array literals. A splat element interrupts the run of plain elements:
/// `[a, *x, b]` folds to `[a].concat(x.to_a).concat([b])`.
pub fn desugar_array(
    elements: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let mut elems: Vec<IrNode> = Vec::with_capacity(elements.len());
    let mut merged: Option<IrNode> = None;

    for element in elements {
        if let Node::Splat { var, .. } = element {
            let spread = mk::send0(span.clone(), transform_node(*var, context)?, names::TO_A);
            if elems.is_empty() {
                merged = Some(match merged {
                    Some(acc) => mk::send1(span.clone(), acc, names::CONCAT, spread),
                    None => spread,
                });
            } else {
                let run = mk::array(span.clone(), std::mem::take(&mut elems));
                let acc = match merged {
                    Some(acc) => mk::send1(span.clone(), acc, names::CONCAT, run),
                    None => run,
                };
                merged = Some(mk::send1(span.clone(), acc, names::CONCAT, spread));
            }
        } else {
            elems.push(transform_node(element, context)?);
        }
    }

    Ok(match (elems.is_empty(), merged) {
        (true, Some(acc)) => acc,
        (true, None) => mk::array(span, elems),
        (false, Some(acc)) => {
            let tail = mk::array(span.clone(), elems);
            mk::send1(span, acc, names::CONCAT, tail)
        }
        (false, None) => mk::array(span, elems),
    })
}

/// Hash literals, the same shape as arrays with `.merge(e.to_hash)` for a
/// double splat.
pub fn desugar_hash(
    pairs: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let mut keys: Vec<IrNode> = Vec::with_capacity(pairs.len());
    let mut values: Vec<IrNode> = Vec::with_capacity(pairs.len());
    let mut merged: Option<IrNode> = None;

    for pair in pairs {
        match pair {
            Node::Pair { key, value, .. } => {
                keys.push(transform_node(*key, context)?);
                values.push(transform_node(*value, context)?);
            }
            Node::Kwsplat { expr, .. } => {
                let spread =
                    mk::send0(span.clone(), transform_node(*expr, context)?, names::TO_HASH);
                if keys.is_empty() {
                    merged = Some(match merged {
                        Some(acc) => mk::send1(span.clone(), acc, names::MERGE, spread),
                        None => spread,
                    });
                } else {
                    let run = mk::hash(
                        span.clone(),
                        std::mem::take(&mut keys),
                        std::mem::take(&mut values),
                    );
                    let acc = match merged {
                        Some(acc) => mk::send1(span.clone(), acc, names::MERGE, run),
                        None => run,
                    };
                    merged = Some(mk::send1(span.clone(), acc, names::MERGE, spread));
                }
            }
            other => {
                return Err(TransformError::internal(
                    "hash entry is neither a Pair nor a Kwsplat",
                    other.span(),
                ));
            }
        }
    }

    Ok(match (keys.is_empty(), merged) {
        (true, Some(acc)) => acc,
        (true, None) => mk::hash(span, keys, values),
        (false, Some(acc)) => {
            let tail = mk::hash(span.clone(), keys, values);
            mk::send1(span, acc, names::MERGE, tail)
        }
        (false, None) => mk::hash(span, keys, values),
    })
}

/// `from..to` and `from...to` are `Range.new` calls; the exclusive form
/// passes a trailing `true`.
pub fn desugar_range(
    from: Node,
    to: Node,
    exclusive: bool,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let range = mk::constant(span.clone(), symbols::RANGE);
    let from = transform_node(from, context)?;
    let to = transform_node(to, context)?;
    Ok(if exclusive {
        mk::send3(span.clone(), range, names::NEW, from, to, mk::true_(span))
    } else {
        mk::send2(span, range, names::NEW, from, to)
    })
}
