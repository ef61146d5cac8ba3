use rb_ast::{Node, Span};
use rb_core::{names, symbols, ErrorCode, GlobalState};

use crate::builder as mk;
use crate::context::DesugarContext;
use crate::transform::{lift_top_level, transform_node};
use crate::types::{ClassKind, IdentKind, IrNode, LiteralValue, SendFlags};
use crate::verifier::verify;

fn sp(line: usize) -> Span {
    Span::new(line, 1, line, 20)
}

fn lvar(name: &str) -> Node {
    Node::LVar {
        name: name.to_string(),
        span: sp(1),
    }
}

#[test]
fn ins_seq_collapses_without_statements() {
    let expr = mk::int(sp(1), 42);
    let seq = mk::ins_seq(sp(1), Vec::new(), expr.clone());
    assert_eq!(seq, expr);

    let seq = mk::ins_seq1(sp(1), mk::nil(sp(1)), expr.clone());
    assert!(matches!(seq, IrNode::InsSeq { ref stats, .. } if stats.len() == 1));
}

#[test]
fn fresh_names_are_pairwise_distinct() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let a = context.fresh_name(names::ASSIGN_TEMP);
    let b = context.fresh_name(names::ASSIGN_TEMP);
    let c = context.fresh_name(names::AND_AND);
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn fresh_name_str_round_trips_through_the_interner() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let (name, rendered) = context.fresh_name_str(names::FOR_TEMP);
    assert_eq!(context.enter_name(&rendered), name);
}

#[test]
fn setter_name_appends_eq() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let reader = context.enter_name("value");
    let setter = context.setter_name(reader);
    assert_eq!(context.gs.show_name(setter), "value=");
}

#[test]
fn and_with_reference_lhs_duplicates_the_reference() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::And {
        left: Box::new(lvar("a")),
        right: Box::new(lvar("b")),
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    let IrNode::If {
        cond, else_branch, ..
    } = result
    else {
        panic!("expected an If");
    };
    assert_eq!(*cond, *else_branch);
    assert!(matches!(*cond, IrNode::Local { .. }));
}

#[test]
fn bare_send_gets_self_receiver_and_private_ok() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::Send {
        recv: None,
        method: "puts".to_string(),
        args: vec![lvar("x")],
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    let IrNode::Send { recv, flags, .. } = result else {
        panic!("expected a Send");
    };
    assert!(matches!(*recv, IrNode::SelfRef { .. }));
    assert_eq!(flags, SendFlags { private_ok: true });
}

#[test]
fn explicit_receiver_keeps_flags_clear() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::Send {
        recv: Some(Box::new(lvar("o"))),
        method: "m".to_string(),
        args: Vec::new(),
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    assert!(matches!(
        result,
        IrNode::Send {
            flags: SendFlags { private_ok: false },
            ..
        }
    ));
}

#[test]
fn interpolation_wraps_non_string_pieces_in_to_s() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::DString {
        parts: vec![
            Node::Str {
                value: "a".to_string(),
                span: sp(1),
            },
            lvar("x"),
            Node::Str {
                value: "b".to_string(),
                span: sp(1),
            },
        ],
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    // "a".concat(x.to_s).concat("b")
    let IrNode::Send {
        recv: outer_recv,
        method,
        args,
        ..
    } = result
    else {
        panic!("expected a concat chain");
    };
    assert_eq!(method, names::CONCAT);
    assert!(args[0].is_string_lit(), "string piece stays bare");
    let IrNode::Send { method, args, .. } = *outer_recv else {
        panic!("expected the inner concat");
    };
    assert_eq!(method, names::CONCAT);
    assert!(
        matches!(&args[0], IrNode::Send { method, .. } if *method == names::TO_S),
        "interpolated piece goes through to_s"
    );
}

#[test]
fn empty_dstring_is_the_empty_string_literal() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::DString {
        parts: Vec::new(),
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    assert_eq!(
        result,
        IrNode::Literal {
            value: LiteralValue::Str(names::EMPTY),
            span: sp(1),
        }
    );
}

#[test]
fn regopt_folds_known_flags_into_a_mask() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::Regopt {
        options: "imn".to_string(),
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    // ((0 | 1) | 4); the encoding flag n is dropped.
    let IrNode::Send { recv, method, args, .. } = result else {
        panic!("expected an or chain");
    };
    assert_eq!(method, names::OR_OP);
    assert_eq!(
        args[0],
        IrNode::Literal {
            value: LiteralValue::Integer(4),
            span: sp(1),
        }
    );
    let IrNode::Send { args, .. } = *recv else {
        panic!("expected the inner or");
    };
    assert_eq!(
        args[0],
        IrNode::Literal {
            value: LiteralValue::Integer(1),
            span: sp(1),
        }
    );
}

#[test]
fn unsupported_nodes_degrade_to_empty_tree() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::Redo { span: sp(3) };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    assert!(result.is_empty_tree());
    let diags = gs.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::UnsupportedNode);
    assert!(diags[0].header.contains("Redo"));
}

#[test]
fn constant_compound_assignment_is_rejected() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::OpAsgn {
        lhs: Box::new(Node::ConstLhs {
            scope: None,
            name: "LIMIT".to_string(),
            span: sp(1),
        }),
        op: "+".to_string(),
        rhs: Box::new(Node::Integer {
            value: "1".to_string(),
            span: sp(1),
        }),
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    assert!(result.is_empty_tree());
    assert_eq!(
        gs.diagnostics()[0].code,
        ErrorCode::NoConstantReassignment
    );
}

#[test]
fn lift_wraps_a_plain_expression() {
    let tree = mk::int(sp(1), 1);
    let lifted = lift_top_level(tree, sp(1));
    let IrNode::ClassDef {
        symbol, kind, body, ..
    } = lifted
    else {
        panic!("expected the synthetic root");
    };
    assert_eq!(symbol, symbols::ROOT);
    assert_eq!(kind, ClassKind::Class);
    assert_eq!(body.len(), 1);
}

#[test]
fn lift_flattens_a_top_level_sequence() {
    let seq = mk::ins_seq(
        sp(1),
        vec![mk::int(sp(1), 1), mk::int(sp(1), 2)],
        mk::int(sp(1), 3),
    );
    let lifted = lift_top_level(seq, sp(1));
    let IrNode::ClassDef { body, .. } = lifted else {
        panic!("expected the synthetic root");
    };
    assert_eq!(body.len(), 3);
}

#[test]
fn lift_passes_class_definitions_through() {
    let class = mk::class_def(
        sp(1),
        sp(1),
        symbols::TODO,
        ClassKind::Class,
        mk::empty(sp(1)),
        vec![mk::constant(sp(1), symbols::TODO)],
        vec![mk::empty(sp(1))],
    );
    let lifted = lift_top_level(class.clone(), sp(1));
    assert_eq!(lifted, class);
}

#[test]
fn verifier_rejects_missing_locations() {
    let tree = mk::int(Span::dummy(), 7);
    assert!(verify(tree).is_err());
}

#[test]
fn verifier_rejects_classdef_without_ancestors() {
    let class = mk::class_def(
        sp(1),
        sp(1),
        symbols::TODO,
        ClassKind::Class,
        mk::empty(sp(1)),
        Vec::new(),
        vec![mk::empty(sp(1))],
    );
    assert!(verify(class).is_err());
}

#[test]
fn verifier_rejects_stray_parameter_wrappers() {
    let stray = mk::rest_arg(sp(1), mk::local(sp(1), names::FOR_TEMP));
    assert!(verify(stray).is_err());
}

#[test]
fn verifier_accepts_method_parameters() {
    let mut gs = GlobalState::new();
    let name = gs.enter_name_utf8("m");
    let arg_name = gs.enter_name_utf8("rest");
    let method = mk::method_def(
        sp(1),
        sp(1),
        name,
        vec![mk::rest_arg(sp(1), mk::local(sp(1), arg_name))],
        mk::empty(sp(1)),
        Default::default(),
    );
    assert!(verify(method).is_ok());
}

#[test]
fn ivar_lowering_tags_the_namespace() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::IVar {
        name: "@x".to_string(),
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    assert!(matches!(
        result,
        IrNode::UnresolvedIdent {
            kind: IdentKind::Instance,
            ..
        }
    ));
}

#[test]
fn nth_ref_becomes_a_numeric_global() {
    let mut gs = GlobalState::new();
    let mut context = DesugarContext::new(&mut gs);
    let node = Node::NthRef {
        index: 3,
        span: sp(1),
    };
    let result = transform_node(node, &mut context).expect("lowering succeeds");
    let IrNode::UnresolvedIdent { kind, name, .. } = result else {
        panic!("expected an unresolved ident");
    };
    assert_eq!(kind, IdentKind::Global);
    assert_eq!(gs.show_name(name), "3");
}
