// rb_core/symbols - the handful of symbols later passes recognize before
// resolution has run: the root scope, the definition placeholder, and the
// classes the desugarer targets directly.
use serde::{Deserialize, Serialize};

/// Reference into the symbol table of a [`crate::GlobalState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolRef(pub(crate) u32);

impl SymbolRef {
    pub(crate) const fn well_known(id: u32) -> SymbolRef {
        SymbolRef(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// The root scope, `::`.
pub const ROOT: SymbolRef = SymbolRef::well_known(0);
/// Placeholder owner for definitions that resolution has not seen yet.
pub const TODO: SymbolRef = SymbolRef::well_known(1);
/// Compiler intrinsics recognized by the type system.
pub const MAGIC: SymbolRef = SymbolRef::well_known(2);
pub const KERNEL: SymbolRef = SymbolRef::well_known(3);
pub const COMPLEX: SymbolRef = SymbolRef::well_known(4);
pub const RATIONAL: SymbolRef = SymbolRef::well_known(5);
pub const RANGE: SymbolRef = SymbolRef::well_known(6);
pub const REGEXP: SymbolRef = SymbolRef::well_known(7);
pub const SYMBOL: SymbolRef = SymbolRef::well_known(8);

pub(crate) const STRINGS: &[&str] = &[
    "<root>",
    "<todo sym>",
    "Magic",
    "Kernel",
    "Complex",
    "Rational",
    "Range",
    "Regexp",
    "Symbol",
];
