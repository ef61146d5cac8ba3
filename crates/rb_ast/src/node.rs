// rb_ast/node - the parse tree handed over by the parser frontend
use crate::Span;
use serde::{Deserialize, Serialize};

/// A node of the surface parse tree. One variant per syntactic construct;
/// identifier payloads are plain strings, interning happens during lowering.
///
/// Children that the grammar allows to be absent are `Option`s; list-shaped
/// children are `Vec`s. Nodes are owned and consumed by the lowering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    // Method calls
    Send {
        recv: Option<Box<Node>>,
        method: String,
        args: Vec<Node>,
        span: Span,
    },
    /// Safe navigation: `recv&.m(args)`
    CSend {
        recv: Box<Node>,
        method: String,
        args: Vec<Node>,
        span: Span,
    },
    /// `&blk` in argument position
    BlockPass {
        value: Box<Node>,
        span: Span,
    },
    /// A method call with an attached literal block
    Block {
        send: Box<Node>,
        args: Option<Box<Node>>,
        body: Option<Box<Node>>,
        span: Span,
    },
    Super {
        args: Vec<Node>,
        span: Span,
    },
    /// `super` with no argument list: forwards the enclosing method's arguments
    ZSuper {
        span: Span,
    },
    Yield {
        exprs: Vec<Node>,
        span: Span,
    },

    // Constants and variables
    Const {
        scope: Option<Box<Node>>,
        name: String,
        span: Span,
    },
    ConstLhs {
        scope: Option<Box<Node>>,
        name: String,
        span: Span,
    },
    /// `::` root scope marker
    Cbase {
        span: Span,
    },
    LVar {
        name: String,
        span: Span,
    },
    IVar {
        name: String,
        span: Span,
    },
    GVar {
        name: String,
        span: Span,
    },
    CVar {
        name: String,
        span: Span,
    },
    LVarLhs {
        name: String,
        span: Span,
    },
    IVarLhs {
        name: String,
        span: Span,
    },
    GVarLhs {
        name: String,
        span: Span,
    },
    CVarLhs {
        name: String,
        span: Span,
    },
    /// Regexp capture group reference `$1`, `$2`, ...
    NthRef {
        index: u32,
        span: Span,
    },

    // Assignments
    Assign {
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    AndAsgn {
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    OrAsgn {
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    /// Compound assignment `lhs op= rhs`; `op` is the bare operator method name
    OpAsgn {
        lhs: Box<Node>,
        op: String,
        rhs: Box<Node>,
        span: Span,
    },
    /// Multiple assignment `a, b = rhs`; `lhs` is always an `Mlhs`
    Masgn {
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    Mlhs {
        items: Vec<Node>,
        span: Span,
    },
    /// Splat target on the left of an assignment; `var` is absent for a bare `*`
    SplatLhs {
        var: Option<Box<Node>>,
        span: Span,
    },
    /// Splat in expression position
    Splat {
        var: Box<Node>,
        span: Span,
    },

    // Literals
    True {
        span: Span,
    },
    False {
        span: Span,
    },
    Nil {
        span: Span,
    },
    Self_ {
        span: Span,
    },
    Integer {
        value: String,
        span: Span,
    },
    Float {
        value: String,
        span: Span,
    },
    Complex {
        value: String,
        span: Span,
    },
    Rational {
        value: String,
        span: Span,
    },
    Str {
        value: String,
        span: Span,
    },
    Sym {
        value: String,
        span: Span,
    },
    /// String with interpolation
    DString {
        parts: Vec<Node>,
        span: Span,
    },
    /// Symbol with interpolation
    DSymbol {
        parts: Vec<Node>,
        span: Span,
    },
    /// Backtick string
    XString {
        parts: Vec<Node>,
        span: Span,
    },
    Regexp {
        parts: Vec<Node>,
        opts: Option<Box<Node>>,
        span: Span,
    },
    /// Regexp option flags, e.g. the `im` of `/x/im`
    Regopt {
        options: String,
        span: Span,
    },
    /// `__LINE__`
    LineLiteral {
        span: Span,
    },
    /// `__FILE__`
    FileLiteral {
        span: Span,
    },

    // Collections
    Array {
        elements: Vec<Node>,
        span: Span,
    },
    Hash {
        pairs: Vec<Node>,
        span: Span,
    },
    Pair {
        key: Box<Node>,
        value: Box<Node>,
        span: Span,
    },
    /// `**h` inside a hash literal or keyword arguments
    Kwsplat {
        expr: Box<Node>,
        span: Span,
    },
    IRange {
        from: Box<Node>,
        to: Box<Node>,
        span: Span,
    },
    ERange {
        from: Box<Node>,
        to: Box<Node>,
        span: Span,
    },

    // Control flow
    Begin {
        stmts: Vec<Node>,
        span: Span,
    },
    /// `begin ... end` written explicitly in the source
    Kwbegin {
        stmts: Vec<Node>,
        span: Span,
    },
    If {
        cond: Box<Node>,
        then_branch: Option<Box<Node>>,
        else_branch: Option<Box<Node>>,
        span: Span,
    },
    And {
        left: Box<Node>,
        right: Box<Node>,
        span: Span,
    },
    Or {
        left: Box<Node>,
        right: Box<Node>,
        span: Span,
    },
    While {
        cond: Box<Node>,
        body: Option<Box<Node>>,
        span: Span,
    },
    /// `body while cond` modifier form; a `Kwbegin` body makes it a do-while
    WhilePost {
        cond: Box<Node>,
        body: Box<Node>,
        span: Span,
    },
    Until {
        cond: Box<Node>,
        body: Option<Box<Node>>,
        span: Span,
    },
    UntilPost {
        cond: Box<Node>,
        body: Box<Node>,
        span: Span,
    },
    For {
        vars: Box<Node>,
        expr: Box<Node>,
        body: Option<Box<Node>>,
        span: Span,
    },
    Case {
        scrutinee: Option<Box<Node>>,
        whens: Vec<Node>,
        else_branch: Option<Box<Node>>,
        span: Span,
    },
    When {
        patterns: Vec<Node>,
        body: Option<Box<Node>>,
        span: Span,
    },
    Return {
        exprs: Vec<Node>,
        span: Span,
    },
    Break {
        exprs: Vec<Node>,
        span: Span,
    },
    Next {
        exprs: Vec<Node>,
        span: Span,
    },
    Retry {
        span: Span,
    },

    // Exception handling
    Rescue {
        body: Option<Box<Node>>,
        cases: Vec<Node>,
        else_branch: Option<Box<Node>>,
        span: Span,
    },
    Resbody {
        exceptions: Option<Box<Node>>,
        var: Option<Box<Node>>,
        body: Option<Box<Node>>,
        span: Span,
    },
    Ensure {
        body: Option<Box<Node>>,
        ensure: Option<Box<Node>>,
        span: Span,
    },

    // Definitions
    Module {
        name: Box<Node>,
        body: Option<Box<Node>>,
        decl_span: Span,
        span: Span,
    },
    Class {
        name: Box<Node>,
        superclass: Option<Box<Node>>,
        body: Option<Box<Node>>,
        decl_span: Span,
        span: Span,
    },
    /// Singleton class reopening: `class << expr`
    SClass {
        expr: Box<Node>,
        body: Option<Box<Node>>,
        decl_span: Span,
        span: Span,
    },
    DefMethod {
        name: String,
        args: Option<Box<Node>>,
        body: Option<Box<Node>>,
        decl_span: Span,
        span: Span,
    },
    /// Singleton method definition: `def expr.name`
    DefS {
        definee: Box<Node>,
        name: String,
        args: Option<Box<Node>>,
        body: Option<Box<Node>>,
        decl_span: Span,
        span: Span,
    },
    Alias {
        from: Box<Node>,
        to: Box<Node>,
        span: Span,
    },

    // Formal parameters
    Args {
        args: Vec<Node>,
        span: Span,
    },
    Arg {
        name: String,
        span: Span,
    },
    Optarg {
        name: String,
        default: Box<Node>,
        span: Span,
    },
    Restarg {
        name: String,
        span: Span,
    },
    Kwarg {
        name: String,
        span: Span,
    },
    Kwoptarg {
        name: String,
        default: Box<Node>,
        span: Span,
    },
    Kwrestarg {
        name: String,
        span: Span,
    },
    Blockarg {
        name: String,
        span: Span,
    },
    Shadowarg {
        name: String,
        span: Span,
    },

    Defined {
        value: Box<Node>,
        span: Span,
    },

    // Constructs the analyzer does not model
    Preexe {
        body: Option<Box<Node>>,
        span: Span,
    },
    Postexe {
        body: Option<Box<Node>>,
        span: Span,
    },
    Undef {
        names: Vec<Node>,
        span: Span,
    },
    Backref {
        name: String,
        span: Span,
    },
    IFlipflop {
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
        span: Span,
    },
    EFlipflop {
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
        span: Span,
    },
    MatchCurLine {
        regex: Box<Node>,
        span: Span,
    },
    Redo {
        span: Span,
    },
}

impl Node {
    pub fn span(&self) -> &Span {
        match self {
            Node::Send { span, .. }
            | Node::CSend { span, .. }
            | Node::BlockPass { span, .. }
            | Node::Block { span, .. }
            | Node::Super { span, .. }
            | Node::ZSuper { span, .. }
            | Node::Yield { span, .. }
            | Node::Const { span, .. }
            | Node::ConstLhs { span, .. }
            | Node::Cbase { span, .. }
            | Node::LVar { span, .. }
            | Node::IVar { span, .. }
            | Node::GVar { span, .. }
            | Node::CVar { span, .. }
            | Node::LVarLhs { span, .. }
            | Node::IVarLhs { span, .. }
            | Node::GVarLhs { span, .. }
            | Node::CVarLhs { span, .. }
            | Node::NthRef { span, .. }
            | Node::Assign { span, .. }
            | Node::AndAsgn { span, .. }
            | Node::OrAsgn { span, .. }
            | Node::OpAsgn { span, .. }
            | Node::Masgn { span, .. }
            | Node::Mlhs { span, .. }
            | Node::SplatLhs { span, .. }
            | Node::Splat { span, .. }
            | Node::True { span }
            | Node::False { span }
            | Node::Nil { span }
            | Node::Self_ { span }
            | Node::Integer { span, .. }
            | Node::Float { span, .. }
            | Node::Complex { span, .. }
            | Node::Rational { span, .. }
            | Node::Str { span, .. }
            | Node::Sym { span, .. }
            | Node::DString { span, .. }
            | Node::DSymbol { span, .. }
            | Node::XString { span, .. }
            | Node::Regexp { span, .. }
            | Node::Regopt { span, .. }
            | Node::LineLiteral { span }
            | Node::FileLiteral { span }
            | Node::Array { span, .. }
            | Node::Hash { span, .. }
            | Node::Pair { span, .. }
            | Node::Kwsplat { span, .. }
            | Node::IRange { span, .. }
            | Node::ERange { span, .. }
            | Node::Begin { span, .. }
            | Node::Kwbegin { span, .. }
            | Node::If { span, .. }
            | Node::And { span, .. }
            | Node::Or { span, .. }
            | Node::While { span, .. }
            | Node::WhilePost { span, .. }
            | Node::Until { span, .. }
            | Node::UntilPost { span, .. }
            | Node::For { span, .. }
            | Node::Case { span, .. }
            | Node::When { span, .. }
            | Node::Return { span, .. }
            | Node::Break { span, .. }
            | Node::Next { span, .. }
            | Node::Retry { span }
            | Node::Rescue { span, .. }
            | Node::Resbody { span, .. }
            | Node::Ensure { span, .. }
            | Node::Module { span, .. }
            | Node::Class { span, .. }
            | Node::SClass { span, .. }
            | Node::DefMethod { span, .. }
            | Node::DefS { span, .. }
            | Node::Alias { span, .. }
            | Node::Args { span, .. }
            | Node::Arg { span, .. }
            | Node::Optarg { span, .. }
            | Node::Restarg { span, .. }
            | Node::Kwarg { span, .. }
            | Node::Kwoptarg { span, .. }
            | Node::Kwrestarg { span, .. }
            | Node::Blockarg { span, .. }
            | Node::Shadowarg { span, .. }
            | Node::Defined { span, .. }
            | Node::Preexe { span, .. }
            | Node::Postexe { span, .. }
            | Node::Undef { span, .. }
            | Node::Backref { span, .. }
            | Node::IFlipflop { span, .. }
            | Node::EFlipflop { span, .. }
            | Node::MatchCurLine { span, .. }
            | Node::Redo { span } => span,
        }
    }

    /// Name of the construct, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Send { .. } => "Send",
            Node::CSend { .. } => "CSend",
            Node::BlockPass { .. } => "BlockPass",
            Node::Block { .. } => "Block",
            Node::Super { .. } => "Super",
            Node::ZSuper { .. } => "ZSuper",
            Node::Yield { .. } => "Yield",
            Node::Const { .. } => "Const",
            Node::ConstLhs { .. } => "ConstLhs",
            Node::Cbase { .. } => "Cbase",
            Node::LVar { .. } => "LVar",
            Node::IVar { .. } => "IVar",
            Node::GVar { .. } => "GVar",
            Node::CVar { .. } => "CVar",
            Node::LVarLhs { .. } => "LVarLhs",
            Node::IVarLhs { .. } => "IVarLhs",
            Node::GVarLhs { .. } => "GVarLhs",
            Node::CVarLhs { .. } => "CVarLhs",
            Node::NthRef { .. } => "NthRef",
            Node::Assign { .. } => "Assign",
            Node::AndAsgn { .. } => "AndAsgn",
            Node::OrAsgn { .. } => "OrAsgn",
            Node::OpAsgn { .. } => "OpAsgn",
            Node::Masgn { .. } => "Masgn",
            Node::Mlhs { .. } => "Mlhs",
            Node::SplatLhs { .. } => "SplatLhs",
            Node::Splat { .. } => "Splat",
            Node::True { .. } => "True",
            Node::False { .. } => "False",
            Node::Nil { .. } => "Nil",
            Node::Self_ { .. } => "Self",
            Node::Integer { .. } => "Integer",
            Node::Float { .. } => "Float",
            Node::Complex { .. } => "Complex",
            Node::Rational { .. } => "Rational",
            Node::Str { .. } => "String",
            Node::Sym { .. } => "Symbol",
            Node::DString { .. } => "DString",
            Node::DSymbol { .. } => "DSymbol",
            Node::XString { .. } => "XString",
            Node::Regexp { .. } => "Regexp",
            Node::Regopt { .. } => "Regopt",
            Node::LineLiteral { .. } => "LineLiteral",
            Node::FileLiteral { .. } => "FileLiteral",
            Node::Array { .. } => "Array",
            Node::Hash { .. } => "Hash",
            Node::Pair { .. } => "Pair",
            Node::Kwsplat { .. } => "Kwsplat",
            Node::IRange { .. } => "IRange",
            Node::ERange { .. } => "ERange",
            Node::Begin { .. } => "Begin",
            Node::Kwbegin { .. } => "Kwbegin",
            Node::If { .. } => "If",
            Node::And { .. } => "And",
            Node::Or { .. } => "Or",
            Node::While { .. } => "While",
            Node::WhilePost { .. } => "WhilePost",
            Node::Until { .. } => "Until",
            Node::UntilPost { .. } => "UntilPost",
            Node::For { .. } => "For",
            Node::Case { .. } => "Case",
            Node::When { .. } => "When",
            Node::Return { .. } => "Return",
            Node::Break { .. } => "Break",
            Node::Next { .. } => "Next",
            Node::Retry { .. } => "Retry",
            Node::Rescue { .. } => "Rescue",
            Node::Resbody { .. } => "Resbody",
            Node::Ensure { .. } => "Ensure",
            Node::Module { .. } => "Module",
            Node::Class { .. } => "Class",
            Node::SClass { .. } => "SClass",
            Node::DefMethod { .. } => "DefMethod",
            Node::DefS { .. } => "DefS",
            Node::Alias { .. } => "Alias",
            Node::Args { .. } => "Args",
            Node::Arg { .. } => "Arg",
            Node::Optarg { .. } => "Optarg",
            Node::Restarg { .. } => "Restarg",
            Node::Kwarg { .. } => "Kwarg",
            Node::Kwoptarg { .. } => "Kwoptarg",
            Node::Kwrestarg { .. } => "Kwrestarg",
            Node::Blockarg { .. } => "Blockarg",
            Node::Shadowarg { .. } => "Shadowarg",
            Node::Defined { .. } => "Defined",
            Node::Preexe { .. } => "Preexe",
            Node::Postexe { .. } => "Postexe",
            Node::Undef { .. } => "Undef",
            Node::Backref { .. } => "Backref",
            Node::IFlipflop { .. } => "IFlipflop",
            Node::EFlipflop { .. } => "EFlipflop",
            Node::MatchCurLine { .. } => "MatchCurLine",
            Node::Redo { .. } => "Redo",
        }
    }
}
