// rb_ir/transform/classes - class-like definitions, method definitions and
// the synthetic root wrapper.
use rb_ast::{Node, Span};
use rb_core::{names, symbols, ErrorCode};

use super::{arguments, lower_opt, transform_node};
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::{ClassKind, IdentKind, IrNode, MethodFlags};

/// Class and module bodies are statement lists, not expressions.
fn scope_node_to_body(
    body: Option<Box<Node>>,
    span: &Span,
    context: &mut DesugarContext<'_>,
) -> Result<Vec<IrNode>, TransformError> {
    match body.map(|b| *b) {
        Some(Node::Begin { stmts, .. }) => {
            let mut rhs = Vec::with_capacity(stmts.len());
            for stmt in stmts {
                rhs.push(transform_node(stmt, context)?);
            }
            Ok(rhs)
        }
        Some(node) => Ok(vec![transform_node(node, context)?]),
        None => Ok(vec![mk::empty(span.clone())]),
    }
}

pub fn desugar_module(
    name: Node,
    body: Option<Box<Node>>,
    decl_span: Span,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let rhs = scope_node_to_body(body, &span, context)?;
    let name = transform_node(name, context)?;
    let ancestors = vec![mk::constant(span.clone(), symbols::TODO)];
    Ok(mk::class_def(
        span,
        decl_span,
        symbols::TODO,
        ClassKind::Module,
        name,
        ancestors,
        rhs,
    ))
}

pub fn desugar_class(
    name: Node,
    superclass: Option<Box<Node>>,
    body: Option<Box<Node>>,
    decl_span: Span,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let rhs = scope_node_to_body(body, &span, context)?;
    let ancestors = vec![match superclass {
        Some(superclass) => transform_node(*superclass, context)?,
        None => mk::constant(span.clone(), symbols::TODO),
    }];
    let name = transform_node(name, context)?;
    Ok(mk::class_def(
        span,
        decl_span,
        symbols::TODO,
        ClassKind::Class,
        name,
        ancestors,
        rhs,
    ))
}

/// `class << expr` is only modeled for `expr` = `self`; the result is a
/// nested class definition named by the singleton-class marker.
pub fn desugar_sclass(
    expr: Node,
    body: Option<Box<Node>>,
    decl_span: Span,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    if !matches!(expr, Node::Self_ { .. }) {
        if let Some(e) = context
            .gs
            .begin_error(expr.span().clone(), ErrorCode::InvalidSingletonDef)
        {
            e.set_header(
                "`class << EXPRESSION` is only supported for `class << self`".to_string(),
            );
        }
        return Ok(mk::empty(span));
    }
    let expr_span = expr.span().clone();

    let rhs = scope_node_to_body(body, &span, context)?;
    let name = mk::ident(expr_span, IdentKind::Class, names::SINGLETON);
    let ancestors = vec![mk::constant(span.clone(), symbols::TODO)];
    Ok(mk::class_def(
        span,
        decl_span,
        symbols::TODO,
        ClassKind::Class,
        name,
        ancestors,
        rhs,
    ))
}

fn build_method(
    name: String,
    args: Option<Box<Node>>,
    body: Option<Box<Node>>,
    decl_span: Span,
    span: Span,
    flags: MethodFlags,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let (params, body) = arguments::desugar_args_and_body(args, body, &span, context)?;
    let name = context.enter_name(&name);
    Ok(mk::method_def(span, decl_span, name, params, body, flags))
}

pub fn desugar_def_method(
    name: String,
    args: Option<Box<Node>>,
    body: Option<Box<Node>>,
    decl_span: Span,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    build_method(
        name,
        args,
        body,
        decl_span,
        span,
        MethodFlags::default(),
        context,
    )
}

/// `def expr.name` is only modeled for `expr` = `self`.
pub fn desugar_defs(
    definee: Node,
    name: String,
    args: Option<Box<Node>>,
    body: Option<Box<Node>>,
    decl_span: Span,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    if !matches!(definee, Node::Self_ { .. }) {
        if let Some(e) = context
            .gs
            .begin_error(definee.span().clone(), ErrorCode::InvalidSingletonDef)
        {
            e.set_header(
                "`def EXPRESSION.method` is only supported for `def self.method`".to_string(),
            );
        }
        return Ok(mk::empty(span));
    }
    build_method(
        name,
        args,
        body,
        decl_span,
        span,
        MethodFlags { self_method: true },
        context,
    )
}

/// Wraps a lowered program into the synthetic root class so later passes see
/// a uniform shape. A program that is already a class definition passes
/// through untouched.
pub fn lift_top_level(tree: IrNode, span: Span) -> IrNode {
    if matches!(tree, IrNode::ClassDef { .. }) {
        return tree;
    }

    let rhs = match tree {
        IrNode::InsSeq { stats, expr, .. } => {
            let mut rhs = stats;
            rhs.push(*expr);
            rhs
        }
        other => vec![other],
    };
    mk::class_def(
        span.clone(),
        span.clone(),
        symbols::ROOT,
        ClassKind::Class,
        mk::empty(span),
        Vec::new(),
        rhs,
    )
}
