// rb_core - process-global state shared by all analysis passes: the string
// interner, well-known name and symbol tables, and the diagnostic sink.

pub mod diagnostics;
pub mod global_state;
pub mod names;
pub mod symbols;

pub use diagnostics::{Diagnostic, ErrorBuilder, ErrorCode};
pub use global_state::{GlobalState, NameRef, UniqueNameKind};
pub use symbols::SymbolRef;
