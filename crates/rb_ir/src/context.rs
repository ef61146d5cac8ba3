// rb_ir/context - mutable state threaded through one desugaring invocation.
use rb_ast::Span;
use rb_core::{ErrorCode, GlobalState, NameRef, UniqueNameKind};

use crate::error::TransformError;

/// Transformation context for desugaring. Borrows the global state for name
/// interning and diagnostics and carries the per-invocation temporary
/// counter, so every temporary minted anywhere below one entry point is
/// distinct from every other.
pub struct DesugarContext<'gs> {
    pub gs: &'gs mut GlobalState,
    unique_counter: u32,
    internal_error_reported: bool,
}

impl<'gs> DesugarContext<'gs> {
    pub fn new(gs: &'gs mut GlobalState) -> Self {
        Self {
            gs,
            unique_counter: 1,
            internal_error_reported: false,
        }
    }

    /// Mints a temporary distinct from user names and from every other
    /// temporary of this invocation.
    pub fn fresh_name(&mut self, base: NameRef) -> NameRef {
        self.unique_counter += 1;
        self.gs
            .fresh_name_unique(UniqueNameKind::Desugar, base, self.unique_counter)
    }

    /// Fresh temporary rendered back to source form, for splicing into a
    /// synthesized parse node.
    pub fn fresh_name_str(&mut self, base: NameRef) -> (NameRef, String) {
        let name = self.fresh_name(base);
        (name, self.gs.show_name(name).to_string())
    }

    pub fn enter_name(&mut self, value: &str) -> NameRef {
        self.gs.enter_name_utf8(value)
    }

    /// Interned writer name for a reader: `m` -> `m=`.
    pub fn setter_name(&mut self, reader: NameRef) -> NameRef {
        let rendered = format!("{}=", self.gs.show_name(reader));
        self.gs.enter_name_utf8(&rendered)
    }

    /// Records the single "failed to process tree" diagnostic for this
    /// invocation. Later internal errors unwind silently so a corrupt input
    /// cannot flood the sink.
    pub(crate) fn report_internal_error_once(&mut self, err: &TransformError) {
        if self.internal_error_reported {
            return;
        }
        self.internal_error_reported = true;
        let span: Span = err.span().clone();
        if let Some(e) = self.gs.begin_error(span, ErrorCode::InternalError) {
            e.set_header("Failed to process tree".to_string());
        }
    }
}
