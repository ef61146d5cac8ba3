use rb_ast::Span;

// Error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("Internal error: {message}")]
    Internal { message: String, span: Span },

    #[error("Malformed tree: {message}")]
    Verify { message: String, span: Span },
}

impl TransformError {
    pub(crate) fn internal(message: impl Into<String>, span: &Span) -> Self {
        TransformError::Internal {
            message: message.into(),
            span: span.clone(),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            TransformError::Internal { span, .. } | TransformError::Verify { span, .. } => span,
        }
    }
}
