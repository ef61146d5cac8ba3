// rb_core/diagnostics - append-only sink for user-facing errors.
use rb_ast::Span;
use serde::{Deserialize, Serialize};

use crate::global_state::GlobalState;

/// Stable error categories with their numeric codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum ErrorCode {
    #[error("unsupported node")]
    UnsupportedNode,
    #[error("constant reassignment")]
    NoConstantReassignment,
    #[error("invalid singleton definition")]
    InvalidSingletonDef,
    #[error("integer literal out of range")]
    IntegerOutOfRange,
    #[error("float literal out of range")]
    FloatOutOfRange,
    #[error("internal error")]
    InternalError,
}

impl ErrorCode {
    pub fn code(self) -> u16 {
        match self {
            ErrorCode::InternalError => 1001,
            ErrorCode::UnsupportedNode => 2001,
            ErrorCode::NoConstantReassignment => 2002,
            ErrorCode::InvalidSingletonDef => 2003,
            ErrorCode::IntegerOutOfRange => 2004,
            ErrorCode::FloatOutOfRange => 2005,
        }
    }
}

/// One recorded error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub span: Span,
    pub header: String,
}

/// In-flight error: created by [`GlobalState::begin_error`], recorded once the
/// caller supplies the formatted header.
pub struct ErrorBuilder<'gs> {
    gs: &'gs mut GlobalState,
    code: ErrorCode,
    span: Span,
}

impl<'gs> ErrorBuilder<'gs> {
    pub(crate) fn new(gs: &'gs mut GlobalState, span: Span, code: ErrorCode) -> Self {
        Self { gs, code, span }
    }

    pub fn set_header(self, header: String) {
        self.gs.record(Diagnostic {
            code: self.code,
            span: self.span,
            header,
        });
    }
}
