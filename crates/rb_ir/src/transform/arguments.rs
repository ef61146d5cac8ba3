// rb_ir/transform/arguments - formal parameter lists. Plain formals map to
// their parameter nodes; a destructuring formal is replaced by a fresh
// temporary whose expansion is prepended to the body.
use rb_ast::{Node, Span};
use rb_core::names;

use super::{lower_opt, transform_node};
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::IrNode;

pub fn desugar_args_and_body(
    args: Option<Box<Node>>,
    body: Option<Box<Node>>,
    span: &Span,
    context: &mut DesugarContext<'_>,
) -> Result<(Vec<IrNode>, IrNode), TransformError> {
    let mut params = Vec::new();
    let mut destructures = Vec::new();

    match args.map(|a| *a) {
        Some(Node::Args { args, .. }) => {
            params.reserve(args.len());
            for arg in args {
                match arg {
                    Node::Mlhs {
                        items,
                        span: pattern_span,
                    } => {
                        let (temp, temp_str) = context.fresh_name_str(names::DESTRUCTURE_ARG);
                        params.push(mk::local(pattern_span.clone(), temp));
                        let destructure = Node::Masgn {
                            lhs: Box::new(Node::Mlhs {
                                items,
                                span: pattern_span.clone(),
                            }),
                            rhs: Box::new(Node::LVar {
                                name: temp_str,
                                span: pattern_span.clone(),
                            }),
                            span: pattern_span,
                        };
                        destructures.push(transform_node(destructure, context)?);
                    }
                    other => params.push(transform_node(other, context)?),
                }
            }
        }
        None => {}
        Some(other) => {
            return Err(TransformError::internal(
                format!("unexpected parameter list node: {}", other.kind_name()),
                other.span(),
            ));
        }
    }

    let mut body = lower_opt(body, span, context)?;
    if !destructures.is_empty() {
        body = mk::ins_seq(span.clone(), destructures, body);
    }

    Ok((params, body))
}
