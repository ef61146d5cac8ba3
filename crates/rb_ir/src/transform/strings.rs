// rb_ir/transform/strings - interpolation. Strings, symbols, backtick
// strings and regexps all share the same `.concat` chain.
use rb_ast::{Node, Span};
use rb_core::{names, symbols};

use super::{lower_opt, transform_node};
use crate::builder as mk;
use crate::context::DesugarContext;
use crate::error::TransformError;
use crate::types::IrNode;

/// Folds interpolation pieces into a `.concat` chain. Pieces that are not
/// string literals pass through `.to_s` first; no pieces at all is the empty
/// string literal.
pub fn desugar_string_parts(
    parts: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    if parts.is_empty() {
        return Ok(mk::str_(span, names::EMPTY));
    }

    let mut parts = parts.into_iter();
    let first = transform_node(parts.next().expect("parts checked non-empty"), context)?;
    let mut result = to_s_unless_string(first);

    for part in parts {
        let piece = transform_node(part, context)?;
        let piece = to_s_unless_string(piece);
        result = mk::send1(span.clone(), result, names::CONCAT, piece);
    }
    Ok(result)
}

fn to_s_unless_string(piece: IrNode) -> IrNode {
    if piece.is_string_lit() {
        piece
    } else {
        let span = piece.span().clone();
        mk::send0(span, piece, names::TO_S)
    }
}

/// Interpolated symbols build the string, then `.intern` it.
pub fn desugar_dsymbol(
    parts: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    if parts.is_empty() {
        return Ok(mk::sym(span, names::EMPTY));
    }
    let string = desugar_string_parts(parts, span.clone(), context)?;
    Ok(mk::send0(span, string, names::INTERN))
}

/// Backtick strings call the enclosing object's `` ` `` method.
pub fn desugar_xstring(
    parts: Vec<Node>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let string = desugar_string_parts(parts, span.clone(), context)?;
    Ok(mk::send1(
        span.clone(),
        mk::self_(span),
        names::BACKTICK,
        string,
    ))
}

/// Regexp literals become `Regexp.new(<string>, <opts>)`.
pub fn desugar_regexp(
    parts: Vec<Node>,
    opts: Option<Box<Node>>,
    span: Span,
    context: &mut DesugarContext<'_>,
) -> Result<IrNode, TransformError> {
    let pattern = desugar_string_parts(parts, span.clone(), context)?;
    let opts = lower_opt(opts, &span, context)?;
    Ok(mk::send2(
        span.clone(),
        mk::constant(span, symbols::REGEXP),
        names::NEW,
        pattern,
        opts,
    ))
}

/// Folds single-character regexp flags into the runtime's option bitmask.
/// Encoding flags are the parser's business and are dropped here; unknown
/// flags were already reported upstream.
pub fn desugar_regopt(options: &str, span: Span) -> IrNode {
    let mut acc = mk::int(span.clone(), 0);
    for flag in options.chars() {
        let bit = match flag {
            'i' => 1, // case insensitive
            'x' => 2, // extended
            'm' => 4, // multiline
            _ => 0,
        };
        if bit != 0 {
            acc = mk::send1(span.clone(), acc, names::OR_OP, mk::int(span.clone(), bit));
        }
    }
    acc
}
