// rb_core/global_state - the string interner and symbol table every pass
// reads and the desugarer mints fresh names from.
use std::collections::HashMap;

use rb_ast::Span;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, ErrorBuilder, ErrorCode};
use crate::symbols::SymbolRef;
use crate::{names, symbols};

/// Reference into the name table of a [`GlobalState`]. Stable across the
/// lifetime of the state; equal refs denote equal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameRef(pub(crate) u32);

impl NameRef {
    pub(crate) const fn well_known(id: u32) -> NameRef {
        NameRef(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// Category tag for freshly minted unique names. Only the desugarer mints
/// names today; later passes get their own variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniqueNameKind {
    Desugar,
}

#[derive(Debug, Clone)]
struct SymbolData {
    name: NameRef,
}

#[derive(Debug)]
pub struct GlobalState {
    names: Vec<String>,
    names_by_value: HashMap<String, NameRef>,
    symbols: Vec<SymbolData>,
    diagnostics: Vec<Diagnostic>,
}

impl GlobalState {
    pub fn new() -> Self {
        let mut gs = Self {
            names: Vec::new(),
            names_by_value: HashMap::new(),
            symbols: Vec::new(),
            diagnostics: Vec::new(),
        };
        for (id, value) in names::STRINGS.iter().enumerate() {
            let entered = gs.enter_name_utf8(value);
            debug_assert_eq!(entered.id() as usize, id, "well-known name table skew");
        }
        for (id, value) in symbols::STRINGS.iter().enumerate() {
            let name = gs.enter_name_utf8(value);
            gs.symbols.push(SymbolData { name });
            debug_assert_eq!(gs.symbols.len() - 1, id, "well-known symbol table skew");
        }
        gs
    }

    /// Interns `value`; the same string always yields the same ref.
    pub fn enter_name_utf8(&mut self, value: &str) -> NameRef {
        if let Some(existing) = self.names_by_value.get(value) {
            return *existing;
        }
        let id = u32::try_from(self.names.len()).expect("name table overflow");
        let name = NameRef(id);
        self.names.push(value.to_string());
        self.names_by_value.insert(value.to_string(), name);
        name
    }

    /// Mints a unique name for `(kind, base, counter)`. Distinct triples
    /// produce distinct refs; repeated calls with the same triple are stable.
    pub fn fresh_name_unique(
        &mut self,
        kind: UniqueNameKind,
        base: NameRef,
        counter: u32,
    ) -> NameRef {
        let rendered = match kind {
            UniqueNameKind::Desugar => format!("{}${}", self.show_name(base), counter),
        };
        self.enter_name_utf8(&rendered)
    }

    pub fn show_name(&self, name: NameRef) -> &str {
        &self.names[name.0 as usize]
    }

    pub fn symbol_name(&self, symbol: SymbolRef) -> NameRef {
        self.symbols[symbol.0 as usize].name
    }

    /// Starts recording an error. Callers finish with
    /// [`ErrorBuilder::set_header`]; a `None` here means the sink declined
    /// the report and the caller skips formatting entirely.
    pub fn begin_error(&mut self, span: Span, code: ErrorCode) -> Option<ErrorBuilder<'_>> {
        Some(ErrorBuilder::new(self, span, code))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let mut gs = GlobalState::new();
        let a = gs.enter_name_utf8("foo");
        let b = gs.enter_name_utf8("foo");
        assert_eq!(a, b);
        assert_eq!(gs.show_name(a), "foo");
    }

    #[test]
    fn well_known_names_are_registered() {
        let mut gs = GlobalState::new();
        assert_eq!(gs.show_name(names::NIL_P), "nil?");
        assert_eq!(gs.show_name(names::CALL_WITH_SPLAT), "<call-with-splat>");
        assert_eq!(gs.show_name(names::EMPTY), "");
        // Re-entering a well-known string yields the well-known ref.
        assert_eq!(gs.enter_name_utf8("to_s"), names::TO_S);
    }

    #[test]
    fn well_known_symbols_have_names() {
        let gs = GlobalState::new();
        assert_eq!(gs.show_name(gs.symbol_name(symbols::MAGIC)), "Magic");
        assert_eq!(gs.show_name(gs.symbol_name(symbols::ROOT)), "<root>");
    }

    #[test]
    fn fresh_names_are_distinct_per_counter() {
        let mut gs = GlobalState::new();
        let a = gs.fresh_name_unique(UniqueNameKind::Desugar, names::ASSIGN_TEMP, 2);
        let b = gs.fresh_name_unique(UniqueNameKind::Desugar, names::ASSIGN_TEMP, 3);
        let c = gs.fresh_name_unique(UniqueNameKind::Desugar, names::AND_AND, 2);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(gs.show_name(a), "<assignTemp>$2");
        // Same triple, same ref.
        let again = gs.fresh_name_unique(UniqueNameKind::Desugar, names::ASSIGN_TEMP, 2);
        assert_eq!(a, again);
    }

    #[test]
    fn diagnostics_accumulate_in_order() {
        let mut gs = GlobalState::new();
        if let Some(e) = gs.begin_error(Span::new(1, 0, 1, 3), ErrorCode::UnsupportedNode) {
            e.set_header("Unsupported node type `Redo`".to_string());
        }
        if let Some(e) = gs.begin_error(Span::new(2, 0, 2, 3), ErrorCode::IntegerOutOfRange) {
            e.set_header("Unsupported large integer literal".to_string());
        }
        let diags = gs.diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].code, ErrorCode::UnsupportedNode);
        assert_eq!(diags[0].code.code(), 2001);
        assert_eq!(diags[1].span.start_line, 2);
    }
}
