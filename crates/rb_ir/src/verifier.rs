// rb_ir/verifier - structural post-conditions of the lowering. Receiver
// population and block attachment hold by construction; what is left to
// check is spans, sequence shape, ancestor placeholders and parameter
// wrapper placement.
use rb_core::symbols;

use crate::error::TransformError;
use crate::types::{IrBlock, IrNode, IrRescueCase};

pub fn verify(tree: IrNode) -> Result<IrNode, TransformError> {
    check_node(&tree, false)?;
    Ok(tree)
}

fn check_node(node: &IrNode, in_params: bool) -> Result<(), TransformError> {
    if !node.span().exists() {
        return Err(TransformError::Verify {
            message: "node without a source location".to_string(),
            span: node.span().clone(),
        });
    }

    match node {
        IrNode::EmptyTree { .. }
        | IrNode::Literal { .. }
        | IrNode::Local { .. }
        | IrNode::UnresolvedIdent { .. }
        | IrNode::Constant { .. }
        | IrNode::SelfRef { .. }
        | IrNode::Retry { .. }
        | IrNode::ZSuperArgs { .. } => Ok(()),
        IrNode::UnresolvedConstant { scope, .. } => check_node(scope, false),
        IrNode::Assign { lhs, rhs, .. } => {
            check_node(lhs, false)?;
            check_node(rhs, false)
        }
        IrNode::InsSeq { stats, expr, span } => {
            if stats.is_empty() {
                return Err(TransformError::Verify {
                    message: "instruction sequence without statements".to_string(),
                    span: span.clone(),
                });
            }
            for stat in stats {
                check_node(stat, false)?;
            }
            check_node(expr, false)
        }
        IrNode::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            check_node(cond, false)?;
            check_node(then_branch, false)?;
            check_node(else_branch, false)
        }
        IrNode::While { cond, body, .. } => {
            check_node(cond, false)?;
            check_node(body, false)
        }
        IrNode::Send {
            recv, args, block, ..
        } => {
            check_node(recv, false)?;
            for arg in args {
                check_node(arg, false)?;
            }
            match block {
                Some(block) => check_block(block),
                None => Ok(()),
            }
        }
        IrNode::Array { elements, .. } => {
            for element in elements {
                check_node(element, false)?;
            }
            Ok(())
        }
        IrNode::Hash { keys, values, .. } => {
            for key in keys {
                check_node(key, false)?;
            }
            for value in values {
                check_node(value, false)?;
            }
            Ok(())
        }
        IrNode::Return { expr, .. } | IrNode::Break { expr, .. } | IrNode::Next { expr, .. } => {
            check_node(expr, false)
        }
        IrNode::Yield { args, .. } => {
            for arg in args {
                check_node(arg, false)?;
            }
            Ok(())
        }
        IrNode::ClassDef {
            symbol,
            name,
            ancestors,
            body,
            span,
            ..
        } => {
            // Source-level definitions always carry at least the placeholder
            // ancestor; only the synthetic root goes without.
            if *symbol != symbols::ROOT && ancestors.is_empty() {
                return Err(TransformError::Verify {
                    message: "class definition without ancestors".to_string(),
                    span: span.clone(),
                });
            }
            check_node(name, false)?;
            for ancestor in ancestors {
                check_node(ancestor, false)?;
            }
            for stmt in body {
                check_node(stmt, false)?;
            }
            Ok(())
        }
        IrNode::MethodDef { args, body, .. } => {
            for arg in args {
                check_node(arg, true)?;
            }
            check_node(body, false)
        }
        IrNode::Rescue {
            body,
            cases,
            else_branch,
            ensure,
            ..
        } => {
            check_node(body, false)?;
            for case in cases {
                check_rescue_case(case)?;
            }
            check_node(else_branch, false)?;
            check_node(ensure, false)
        }
        IrNode::RestArg { inner, span }
        | IrNode::KeywordArg { inner, span }
        | IrNode::BlockArg { inner, span }
        | IrNode::ShadowArg { inner, span } => {
            if !in_params {
                return Err(TransformError::Verify {
                    message: "parameter wrapper outside a parameter list".to_string(),
                    span: span.clone(),
                });
            }
            // Keyword rest parameters nest one wrapper inside another.
            check_node(inner, true)
        }
        IrNode::OptionalArg {
            inner,
            default,
            span,
        } => {
            if !in_params {
                return Err(TransformError::Verify {
                    message: "parameter wrapper outside a parameter list".to_string(),
                    span: span.clone(),
                });
            }
            check_node(inner, true)?;
            check_node(default, false)
        }
    }
}

fn check_block(block: &IrBlock) -> Result<(), TransformError> {
    for arg in &block.args {
        check_node(arg, true)?;
    }
    check_node(&block.body, false)
}

fn check_rescue_case(case: &IrRescueCase) -> Result<(), TransformError> {
    for exception in &case.exceptions {
        check_node(exception, false)?;
    }
    check_node(&case.var, false)?;
    check_node(&case.body, false)
}
