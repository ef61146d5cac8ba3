// rb_core/names - well-known names, registered into every GlobalState at
// construction in the order of this table so the constants below are stable.
use crate::global_state::NameRef;

pub const INITIALIZE: NameRef = NameRef::well_known(0);
pub const TO_S: NameRef = NameRef::well_known(1);
pub const TO_A: NameRef = NameRef::well_known(2);
pub const TO_H: NameRef = NameRef::well_known(3);
pub const TO_HASH: NameRef = NameRef::well_known(4);
pub const TO_PROC: NameRef = NameRef::well_known(5);
pub const CONCAT: NameRef = NameRef::well_known(6);
pub const MERGE: NameRef = NameRef::well_known(7);
pub const INTERN: NameRef = NameRef::well_known(8);
pub const CALL: NameRef = NameRef::well_known(9);
pub const BANG: NameRef = NameRef::well_known(10);
pub const SLICE: NameRef = NameRef::well_known(11);
pub const NEW: NameRef = NameRef::well_known(12);
pub const EACH: NameRef = NameRef::well_known(13);
pub const NIL_P: NameRef = NameRef::well_known(14);
pub const SUPER: NameRef = NameRef::well_known(15);
pub const TRIPLE_EQ: NameRef = NameRef::well_known(16);
pub const OR_OP: NameRef = NameRef::well_known(17);
pub const DEFINED_P: NameRef = NameRef::well_known(18);
pub const SQUARE_BRACKETS: NameRef = NameRef::well_known(19);
pub const BACKTICK: NameRef = NameRef::well_known(20);
pub const ALIAS_METHOD: NameRef = NameRef::well_known(21);
pub const CALL_WITH_SPLAT: NameRef = NameRef::well_known(22);
pub const EXPAND_SPLAT: NameRef = NameRef::well_known(23);
pub const SPLAT: NameRef = NameRef::well_known(24);
pub const SINGLETON: NameRef = NameRef::well_known(25);
pub const EMPTY: NameRef = NameRef::well_known(26);
pub const CURRENT_FILE: NameRef = NameRef::well_known(27);

// Temporary-name bases used by the desugarer.
pub const AND_AND: NameRef = NameRef::well_known(28);
pub const OR_OR: NameRef = NameRef::well_known(29);
pub const ASSIGN_TEMP: NameRef = NameRef::well_known(30);
pub const DESTRUCTURE_ARG: NameRef = NameRef::well_known(31);
pub const RESCUE_TEMP: NameRef = NameRef::well_known(32);
pub const FOR_TEMP: NameRef = NameRef::well_known(33);
pub const BLOCK_PASS_TEMP: NameRef = NameRef::well_known(34);

pub(crate) const STRINGS: &[&str] = &[
    "initialize",
    "to_s",
    "to_a",
    "to_h",
    "to_hash",
    "to_proc",
    "concat",
    "merge",
    "intern",
    "call",
    "!",
    "slice",
    "new",
    "each",
    "nil?",
    "super",
    "===",
    "|",
    "defined?",
    "[]",
    "`",
    "alias_method",
    "<call-with-splat>",
    "<expand-splat>",
    "<splat>",
    "<singleton class>",
    "",
    "__FILE__",
    "&&",
    "||",
    "<assignTemp>",
    "<destructure>",
    "<rescueTemp>",
    "<forTemp>",
    "<blockPassTemp>",
];
