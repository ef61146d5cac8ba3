// rb_ir/transform - the desugaring pass. Parse tree in, typed AST out, one
// match arm per surface construct; the heavy rewrites live in the submodules.
use rb_ast::{Node, Span};
use rb_core::{names, symbols, ErrorCode, GlobalState, SymbolRef};
use tracing::debug;

use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::{IdentKind, IrNode, SendFlags};
use crate::verifier;

mod arguments;
mod assignment;
mod blocks;
mod classes;
mod collections;
mod control_flow;
mod loops;
mod strings;

pub use arguments::desugar_args_and_body;
pub use assignment::{desugar_compound_assign, desugar_masgn, CompoundKind};
pub use blocks::{desugar_block, node_to_proc};
pub use classes::lift_top_level;
pub use collections::{desugar_array, desugar_hash};
pub use control_flow::{desugar_case, desugar_rescue};
pub use loops::desugar_for;
pub use strings::desugar_string_parts;

/// Desugars one parse tree: lower, lift the top level, verify.
pub fn transform_tree(root: Node, gs: &mut GlobalState) -> Result<IrNode, TransformError> {
    let mut context = DesugarContext::new(gs);
    transform_tree_with_context(root, &mut context)
}

pub fn transform_tree_with_context(
    root: Node,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let span = root.span().clone();
    debug!(node = root.kind_name(), "desugaring parse tree");
    let lowered = match transform_node(root, context) {
        Ok(tree) => tree,
        Err(err) => {
            context.report_internal_error_once(&err);
            return Err(err);
        }
    };
    let lifted = classes::lift_top_level(lowered, span);
    match verifier::verify(lifted) {
        Ok(tree) => Ok(tree),
        Err(err) => {
            context.report_internal_error_once(&err);
            Err(err)
        }
    }
}

/// Lowers an optional child; an absent child becomes an empty tree carrying
/// the enclosing node's span.
pub(crate) fn lower_opt(
    node: Option<Box<Node>>,
    fallback: &Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    match node {
        Some(n) => transform_node(*n, context),
        None => Ok(mk::empty(fallback.clone())),
    }
}

pub fn transform_node(
    node: Node,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    match node {
        // The clauses up to Begin are ordered by observed node frequency on
        // large codebases; keep them first.
        Node::Send {
            recv,
            method,
            args,
            span,
        } => desugar_send(recv, method, args, span, context),
        Node::Const { scope, name, span } => {
            let scope_ir = lower_opt(scope, &span, context)?;
            let name = context.enter_name(&name);
            Ok(mk::unresolved_constant(span, scope_ir, name))
        }
        Node::Str { value, span } => {
            let value = context.enter_name(&value);
            Ok(mk::str_(span, value))
        }
        Node::Sym { value, span } => {
            let value = context.enter_name(&value);
            Ok(mk::sym(span, value))
        }
        Node::LVar { name, span } | Node::LVarLhs { name, span } => {
            let name = context.enter_name(&name);
            Ok(mk::local(span, name))
        }
        Node::DString { parts, span } => strings::desugar_string_parts(parts, span, context),
        Node::Begin { stmts, span } | Node::Kwbegin { stmts, span } => {
            lower_stmt_seq(stmts, span, context)
        }
        // End frequency-ordered clauses.
        Node::And { left, right, span } => assignment::desugar_and(*left, *right, span, context),
        Node::Or { left, right, span } => assignment::desugar_or(*left, *right, span, context),
        Node::AndAsgn { lhs, rhs, span } => {
            assignment::desugar_compound_assign(CompoundKind::And, *lhs, *rhs, span, context)
        }
        Node::OrAsgn { lhs, rhs, span } => {
            assignment::desugar_compound_assign(CompoundKind::Or, *lhs, *rhs, span, context)
        }
        Node::OpAsgn { lhs, op, rhs, span } => {
            let op = context.enter_name(&op);
            assignment::desugar_compound_assign(CompoundKind::Op(op), *lhs, *rhs, span, context)
        }
        Node::CSend {
            recv,
            method,
            args,
            span,
        } => desugar_csend(*recv, method, args, span, context),
        Node::Self_ { span } => Ok(mk::self_(span)),
        Node::DSymbol { parts, span } => strings::desugar_dsymbol(parts, span, context),
        Node::FileLiteral { span } => Ok(mk::str_(span, names::CURRENT_FILE)),
        Node::ConstLhs { scope, name, span } => {
            let scope_ir = lower_opt(scope, &span, context)?;
            let name = context.enter_name(&name);
            Ok(mk::unresolved_constant(span, scope_ir, name))
        }
        Node::Cbase { span } => Ok(mk::constant(span, symbols::ROOT)),
        Node::Module {
            name,
            body,
            decl_span,
            span,
        } => classes::desugar_module(*name, body, decl_span, span, context),
        Node::Class {
            name,
            superclass,
            body,
            decl_span,
            span,
        } => classes::desugar_class(*name, superclass, body, decl_span, span, context),
        Node::Arg { name, span } => {
            let name = context.enter_name(&name);
            Ok(mk::local(span, name))
        }
        Node::Restarg { name, span } => {
            let name = context.enter_name(&name);
            let inner = mk::local(span.clone(), name);
            Ok(mk::rest_arg(span, inner))
        }
        Node::Kwrestarg { name, span } => {
            let name = context.enter_name(&name);
            let inner = mk::keyword_arg(span.clone(), mk::local(span.clone(), name));
            Ok(mk::rest_arg(span, inner))
        }
        Node::Kwarg { name, span } => {
            let name = context.enter_name(&name);
            let inner = mk::local(span.clone(), name);
            Ok(mk::keyword_arg(span, inner))
        }
        Node::Blockarg { name, span } => {
            let name = context.enter_name(&name);
            let inner = mk::local(span.clone(), name);
            Ok(mk::block_arg(span, inner))
        }
        Node::Kwoptarg {
            name,
            default,
            span,
        } => {
            let name = context.enter_name(&name);
            let inner = mk::keyword_arg(span.clone(), mk::local(span.clone(), name));
            let default = transform_node(*default, context)?;
            Ok(mk::optional_arg(span, inner, default))
        }
        Node::Optarg {
            name,
            default,
            span,
        } => {
            let name = context.enter_name(&name);
            let inner = mk::local(span.clone(), name);
            let default = transform_node(*default, context)?;
            Ok(mk::optional_arg(span, inner, default))
        }
        Node::Shadowarg { name, span } => {
            let name = context.enter_name(&name);
            let inner = mk::local(span.clone(), name);
            Ok(mk::shadow_arg(span, inner))
        }
        Node::DefMethod {
            name,
            args,
            body,
            decl_span,
            span,
        } => classes::desugar_def_method(name, args, body, decl_span, span, context),
        Node::DefS {
            definee,
            name,
            args,
            body,
            decl_span,
            span,
        } => classes::desugar_defs(*definee, name, args, body, decl_span, span, context),
        Node::SClass {
            expr,
            body,
            decl_span,
            span,
        } => classes::desugar_sclass(*expr, body, decl_span, span, context),
        Node::Block {
            send,
            args,
            body,
            span,
        } => blocks::desugar_block(*send, args, body, span, context),
        Node::While { cond, body, span } => loops::desugar_while(*cond, body, span, context),
        Node::WhilePost { cond, body, span } => {
            loops::desugar_while_post(*cond, *body, span, context)
        }
        Node::Until { cond, body, span } => loops::desugar_until(*cond, body, span, context),
        Node::UntilPost { cond, body, span } => {
            loops::desugar_until_post(*cond, *body, span, context)
        }
        Node::Nil { span } => Ok(mk::nil(span)),
        Node::True { span } => Ok(mk::true_(span)),
        Node::False { span } => Ok(mk::false_(span)),
        Node::IVar { name, span } | Node::IVarLhs { name, span } => {
            let name = context.enter_name(&name);
            Ok(mk::ident(span, IdentKind::Instance, name))
        }
        Node::GVar { name, span } | Node::GVarLhs { name, span } => {
            let name = context.enter_name(&name);
            Ok(mk::ident(span, IdentKind::Global, name))
        }
        Node::CVar { name, span } | Node::CVarLhs { name, span } => {
            let name = context.enter_name(&name);
            Ok(mk::ident(span, IdentKind::Class, name))
        }
        Node::NthRef { index, span } => {
            let name = context.enter_name(&index.to_string());
            Ok(mk::ident(span, IdentKind::Global, name))
        }
        Node::Assign { lhs, rhs, span } => {
            let lhs = transform_node(*lhs, context)?;
            let rhs = transform_node(*rhs, context)?;
            Ok(mk::assign(span, lhs, rhs))
        }
        Node::Super { args, span } => {
            // A `super` call is an ordinary call to a method named `super`;
            // synthesize the Send and let its clause do the work.
            let send = Node::Send {
                recv: None,
                method: "super".to_string(),
                args,
                span,
            };
            transform_node(send, context)
        }
        Node::ZSuper { span } => Ok(mk::send1(
            span.clone(),
            mk::self_(span.clone()),
            names::SUPER,
            mk::zsuper_args(span),
        )),
        Node::For {
            vars,
            expr,
            body,
            span,
        } => loops::desugar_for(*vars, *expr, body, span, context),
        Node::Integer { value, span } => Ok(lower_integer(&value, span, context)),
        Node::Float { value, span } => Ok(lower_float(&value, span, context)),
        Node::Complex { value, span } => {
            Ok(lower_kernel_number(symbols::COMPLEX, &value, span, context))
        }
        Node::Rational { value, span } => {
            Ok(lower_kernel_number(symbols::RATIONAL, &value, span, context))
        }
        Node::Array { elements, span } => collections::desugar_array(elements, span, context),
        Node::Hash { pairs, span } => collections::desugar_hash(pairs, span, context),
        Node::IRange { from, to, span } => {
            collections::desugar_range(*from, *to, false, span, context)
        }
        Node::ERange { from, to, span } => {
            collections::desugar_range(*from, *to, true, span, context)
        }
        Node::Regexp { parts, opts, span } => strings::desugar_regexp(parts, opts, span, context),
        Node::Regopt { options, span } => Ok(strings::desugar_regopt(&options, span)),
        Node::Return { exprs, span } => {
            control_flow::desugar_jump(control_flow::JumpKind::Return, exprs, span, context)
        }
        Node::Break { exprs, span } => {
            control_flow::desugar_jump(control_flow::JumpKind::Break, exprs, span, context)
        }
        Node::Next { exprs, span } => {
            control_flow::desugar_jump(control_flow::JumpKind::Next, exprs, span, context)
        }
        Node::Retry { span } => Ok(mk::retry(span)),
        Node::Yield { exprs, span } => {
            let mut args = Vec::with_capacity(exprs.len());
            for expr in exprs {
                args.push(transform_node(expr, context)?);
            }
            Ok(mk::yield_(span, args))
        }
        Node::Rescue {
            body,
            cases,
            else_branch,
            span,
        } => control_flow::desugar_rescue(body, cases, else_branch, span, context),
        Node::Ensure { body, ensure, span } => {
            control_flow::desugar_ensure(body, ensure, span, context)
        }
        Node::If {
            cond,
            then_branch,
            else_branch,
            span,
        } => {
            let cond = transform_node(*cond, context)?;
            let then_branch = lower_opt(then_branch, &span, context)?;
            let else_branch = lower_opt(else_branch, &span, context)?;
            Ok(mk::if_(span, cond, then_branch, else_branch))
        }
        Node::Masgn { lhs, rhs, span } => assignment::desugar_masgn(*lhs, *rhs, span, context),
        Node::Case {
            scrutinee,
            whens,
            else_branch,
            span,
        } => control_flow::desugar_case(scrutinee, whens, else_branch, span, context),
        Node::Splat { var, span } => {
            let expr = transform_node(*var, context)?;
            Ok(mk::splat(span, expr))
        }
        Node::Alias { from, to, span } => {
            let from = transform_node(*from, context)?;
            let to = transform_node(*to, context)?;
            Ok(mk::send2(
                span.clone(),
                mk::self_(span),
                names::ALIAS_METHOD,
                from,
                to,
            ))
        }
        Node::Defined { value, span } => {
            let value = transform_node(*value, context)?;
            Ok(mk::send1(
                span.clone(),
                mk::constant(span, symbols::MAGIC),
                names::DEFINED_P,
                value,
            ))
        }
        Node::LineLiteral { span } => {
            let line = span.start_line as i64;
            Ok(mk::int(span, line))
        }
        Node::XString { parts, span } => strings::desugar_xstring(parts, span, context),
        node @ (Node::Preexe { .. }
        | Node::Postexe { .. }
        | Node::Undef { .. }
        | Node::Backref { .. }
        | Node::IFlipflop { .. }
        | Node::EFlipflop { .. }
        | Node::MatchCurLine { .. }
        | Node::Redo { .. }) => Ok(unsupported_node(&node, context)),
        Node::BlockPass { span, .. } => Err(TransformError::internal(
            "Send should have already handled the BlockPass",
            &span,
        )),
        // Consumed by their enclosing construct; reaching the dispatch means
        // the parser handed over a malformed tree.
        node @ (Node::Args { .. }
        | Node::Mlhs { .. }
        | Node::SplatLhs { .. }
        | Node::Pair { .. }
        | Node::Kwsplat { .. }
        | Node::When { .. }
        | Node::Resbody { .. }) => {
            let span = node.span().clone();
            Err(TransformError::internal(
                format!("Unimplemented parse node: {}", node.kind_name()),
                &span,
            ))
        }
    }
}

/// `begin ... end` and statement sequences: all but the last statement are
/// effects, the last is the value.
fn lower_stmt_seq(
    mut stmts: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let Some(last) = stmts.pop() else {
        return Ok(mk::empty(span));
    };
    let mut stats = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        stats.push(transform_node(stmt, context)?);
    }
    let expr = transform_node(last, context)?;
    Ok(mk::ins_seq(span, stats, expr))
}

fn desugar_send(
    recv: Option<Box<Node>>,
    method: String,
    args: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let mut flags = SendFlags::default();
    let mut rec = lower_opt(recv, &span, context)?;
    if rec.is_empty_tree() {
        rec = mk::self_(span.clone());
        flags.private_ok = true;
    }

    if args.iter().any(|arg| matches!(arg, Node::Splat { .. })) {
        // With a splat anywhere in the argument list, lower the whole list as
        // one Array (whose clause already folds splats) and emit
        // `Magic.<call-with-splat>(recv, :method, argArray) [&blk]`.
        let mut argnodes = args;
        let mut block_node = None;
        if let Some(at) = argnodes
            .iter()
            .position(|arg| matches!(arg, Node::BlockPass { .. }))
        {
            if let Node::BlockPass { value, .. } = argnodes.remove(at) {
                block_node = Some(value);
            }
        }
        let array = Node::Array {
            elements: argnodes,
            span: span.clone(),
        };
        let arg_array = transform_node(array, context)?;
        let method = context.enter_name(&method);
        let method_lit = mk::sym(span.clone(), method);
        let block = blocks::node_to_proc(block_node, context)?;
        return Ok(mk::send_with_block(
            span.clone(),
            mk::constant(span, symbols::MAGIC),
            names::CALL_WITH_SPLAT,
            vec![rec, method_lit, arg_array],
            SendFlags::default(),
            block,
        ));
    }

    let mut ir_args = Vec::with_capacity(args.len());
    let mut block_node = None;
    for arg in args {
        match arg {
            Node::BlockPass { value, span } => {
                if block_node.is_some() {
                    return Err(TransformError::internal(
                        "passing a block where a block has already been passed",
                        &span,
                    ));
                }
                block_node = Some(value);
            }
            other => ir_args.push(transform_node(other, context)?),
        }
    }
    let method = context.enter_name(&method);
    let block = blocks::node_to_proc(block_node, context)?;
    Ok(mk::send_with_block(span, rec, method, ir_args, flags, block))
}

/// `recv&.m(args)` evaluates `recv` once, then skips the call when it is nil.
fn desugar_csend(
    recv: Node,
    method: String,
    args: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let (temp, temp_str) = context.fresh_name_str(names::ASSIGN_TEMP);
    let recv_span = recv.span().clone();

    // The guard is a `nil?` call; an overridden `nil?` diverges from the
    // runtime here.
    let assgn = mk::assign_local(recv_span.clone(), temp, transform_node(recv, context)?);
    let cond = mk::send0(
        span.clone(),
        mk::local(recv_span.clone(), temp),
        names::NIL_P,
    );

    let send_node = Node::Send {
        recv: Some(Box::new(Node::LVar {
            name: temp_str,
            span: recv_span,
        })),
        method,
        args,
        span: span.clone(),
    };
    let send = transform_node(send_node, context)?;

    let iff = mk::if_(span.clone(), cond, mk::nil(span.clone()), send);
    Ok(mk::ins_seq1(span, assgn, iff))
}

fn lower_integer(value: &str, span: Span, context: &mut DesugarContext<'_>) -> IrNode {
    use std::num::IntErrorKind;

    let parsed = match value.parse::<i64>() {
        Ok(parsed) => parsed,
        Err(err) => {
            let header = match err.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    format!("Unsupported large integer literal: `{value}`")
                }
                _ => format!("Unsupported integer literal: `{value}`"),
            };
            if let Some(e) = context
                .gs
                .begin_error(span.clone(), ErrorCode::IntegerOutOfRange)
            {
                e.set_header(header);
            }
            0
        }
    };
    mk::int(span, parsed)
}

fn lower_float(value: &str, span: Span, context: &mut DesugarContext<'_>) -> IrNode {
    let parsed = match value.parse::<f64>() {
        Ok(parsed) if parsed.is_infinite() => {
            if let Some(e) = context
                .gs
                .begin_error(span.clone(), ErrorCode::FloatOutOfRange)
            {
                e.set_header(format!("Unsupported large float literal: `{value}`"));
            }
            f64::NAN
        }
        Ok(parsed) => parsed,
        Err(_) => {
            if let Some(e) = context
                .gs
                .begin_error(span.clone(), ErrorCode::FloatOutOfRange)
            {
                e.set_header(format!("Unsupported float literal: `{value}`"));
            }
            f64::NAN
        }
    };
    mk::float(span, parsed)
}

/// Exact numeric literals stay symbolic: `Kernel.Complex("s")` and
/// `Kernel.Rational("s")`.
fn lower_kernel_number(
    class: SymbolRef,
    value: &str,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> IrNode {
    let method = context.gs.symbol_name(class);
    let value = context.enter_name(value);
    mk::send1(
        span.clone(),
        mk::constant(span.clone(), symbols::KERNEL),
        method,
        mk::str_(span, value),
    )
}

fn unsupported_node(node: &Node, context: &mut DesugarContext<'_>) -> IrNode {
    let span = node.span().clone();
    if let Some(e) = context
        .gs
        .begin_error(span.clone(), ErrorCode::UnsupportedNode)
    {
        e.set_header(format!("Unsupported node type `{}`", node.kind_name()));
    }
    mk::empty(span)
}
