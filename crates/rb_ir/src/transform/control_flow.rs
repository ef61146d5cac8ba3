// rb_ir/transform/control_flow - case dispatch, exception handling and the
// jump statements.
use rb_ast::{Node, Span};
use rb_core::{names, ErrorCode};

use super::{lower_opt, transform_node};
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::{IrNode, IrRescueCase};

#[derive(Debug, Clone, Copy)]
pub enum JumpKind {
    Return,
    Break,
    Next,
}

/// `return`/`break`/`next`: no value becomes an empty tree, one value is
/// passed through, several values become an array.
pub fn desugar_jump(
    kind: JumpKind,
    exprs: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let value = match exprs.len() {
        0 => mk::empty(span.clone()),
        1 => {
            let mut exprs = exprs;
            transform_node(exprs.pop().expect("len checked"), context)?
        }
        _ => {
            let mut elements = Vec::with_capacity(exprs.len());
            for expr in exprs {
                elements.push(transform_node(expr, context)?);
            }
            mk::array(span.clone(), elements)
        }
    };
    Ok(match kind {
        JumpKind::Return => mk::return_(span, value),
        JumpKind::Break => mk::break_(span, value),
        JumpKind::Next => mk::next_(span, value),
    })
}

/// `case` dispatch. With a scrutinee, each pattern `p` tests `p === t` for a
/// temporary `t`; without one the patterns are boolean tests themselves.
/// Patterns of one `when` OR-fold into nested `If`s that keep left-to-right
/// short-circuit order; whens fold from the last around the else branch.
pub fn desugar_case(
    scrutinee: Option<Box<Node>>,
    whens: Vec<Node>,
    else_branch: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let mut temp = None;
    let mut assign = None;
    let mut scrutinee_span = span.clone();
    if let Some(scrutinee) = scrutinee {
        scrutinee_span = scrutinee.span().clone();
        let name = context.fresh_name(names::ASSIGN_TEMP);
        let value = transform_node(*scrutinee, context)?;
        assign = Some(mk::assign_local(scrutinee_span.clone(), name, value));
        temp = Some(name);
    }

    let mut result = lower_opt(else_branch, &span, context)?;
    for when in whens.into_iter().rev() {
        let (patterns, body, when_span) = match when {
            Node::When {
                patterns,
                body,
                span,
            } => (patterns, body, span),
            other => {
                return Err(TransformError::internal(
                    "case clause is not a When",
                    other.span(),
                ));
            }
        };
        if patterns.is_empty() {
            return Err(TransformError::internal(
                "when clause without patterns",
                &when_span,
            ));
        }

        // Lower the patterns in source order, then fold from the right so
        // the first pattern's test ends up outermost.
        let mut tests = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern_ir = transform_node(pattern, context)?;
            tests.push(match temp {
                Some(name) => {
                    let pattern_span = pattern_ir.span().clone();
                    mk::send1(
                        pattern_span,
                        pattern_ir,
                        names::TRIPLE_EQ,
                        mk::local(scrutinee_span.clone(), name),
                    )
                }
                None => pattern_ir,
            });
        }
        let mut cond: Option<IrNode> = None;
        for test in tests.into_iter().rev() {
            cond = Some(match cond {
                None => test,
                Some(rest) => {
                    let test_span = test.span().clone();
                    mk::if_(test_span.clone(), test, mk::true_(test_span), rest)
                }
            });
        }

        let body = lower_opt(body, &when_span, context)?;
        result = mk::if_(
            when_span,
            cond.expect("when has at least one pattern"),
            body,
            result,
        );
    }

    Ok(match assign {
        Some(assign) => mk::ins_seq1(span, assign, result),
        None => result,
    })
}

/// `begin ... rescue ... else ... end`. The ensure slot stays empty; an
/// enclosing `Ensure` node fills it in.
pub fn desugar_rescue(
    body: Option<Box<Node>>,
    cases: Vec<Node>,
    else_branch: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let mut ir_cases = Vec::with_capacity(cases.len());
    for case in cases {
        let (exceptions, var, body, case_span) = match case {
            Node::Resbody {
                exceptions,
                var,
                body,
                span,
            } => (exceptions, var, body, span),
            other => {
                return Err(TransformError::internal(
                    "rescue clause is not a Resbody",
                    other.span(),
                ));
            }
        };
        ir_cases.push(desugar_resbody(exceptions, var, body, case_span, context)?);
    }
    let body = lower_opt(body, &span, context)?;
    let else_branch = lower_opt(else_branch, &span, context)?;
    let ensure = mk::empty(span.clone());
    Ok(mk::rescue(span, body, ir_cases, else_branch, ensure))
}

fn desugar_resbody(
    exceptions: Option<Box<Node>>,
    var: Option<Box<Node>>,
    body: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrRescueCase, TransformError> {
    let mut exception_list = Vec::new();
    let exceptions_ir = lower_opt(exceptions, &span, context)?;
    match exceptions_ir {
        IrNode::EmptyTree { .. } => {}
        IrNode::Array { elements, .. } => exception_list = elements,
        send @ IrNode::Send { .. } => {
            let recognized = matches!(
                &send,
                IrNode::Send { method, .. }
                    if *method == names::SPLAT
                        || *method == names::TO_A
                        || *method == names::CONCAT
            );
            if !recognized {
                // Keep the handler usable: take the send as the one
                // exception source and tell the user about it.
                if let Some(e) = context
                    .gs
                    .begin_error(send.span().clone(), ErrorCode::UnsupportedNode)
                {
                    e.set_header("Unsupported exception list".to_string());
                }
            }
            exception_list.push(send);
        }
        other => {
            return Err(TransformError::internal(
                "malformed exception list",
                other.span(),
            ));
        }
    }

    let var_ir = lower_opt(var, &span, context)?;
    let mut body_ir = lower_opt(body, &span, context)?;
    let mut var_span = var_ir.span().clone();

    let name = match var_ir {
        // `rescue E => e` with a plain local captures that name directly.
        IrNode::Local { name, .. } => name,
        IrNode::EmptyTree { .. } => {
            var_span = span.clone();
            context.fresh_name(names::RESCUE_TEMP)
        }
        // Any other target (ivar, gvar, indexed send, ...) gets the bound
        // value copied over at the top of the handler.
        other => {
            let name = context.fresh_name(names::RESCUE_TEMP);
            let target_span = other.span().clone();
            let copy = mk::assign(
                target_span.clone(),
                other,
                mk::local(target_span.clone(), name),
            );
            body_ir = mk::ins_seq1(target_span, copy, body_ir);
            name
        }
    };

    let var = mk::local(var_span, name);
    Ok(mk::rescue_case(span, exception_list, var, body_ir))
}

/// `ensure`: if the protected body already lowered to a `Rescue`, the ensure
/// expression moves into its slot; otherwise a clause-less `Rescue` is built
/// around the body.
pub fn desugar_ensure(
    body: Option<Box<Node>>,
    ensure: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let body_ir = lower_opt(body, &span, context)?;
    let ensure_ir = lower_opt(ensure, &span, context)?;
    match body_ir {
        IrNode::Rescue {
            body,
            cases,
            else_branch,
            ensure: _,
            span: rescue_span,
        } => Ok(IrNode::Rescue {
            body,
            cases,
            else_branch,
            ensure: Box::new(ensure_ir),
            span: rescue_span,
        }),
        other => Ok(mk::rescue(
            span.clone(),
            other,
            Vec::new(),
            mk::empty(span),
            ensure_ir,
        )),
    }
}
