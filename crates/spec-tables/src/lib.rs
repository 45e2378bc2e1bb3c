//! IPPcode22 opcode tables.
//!
//! Defines the operand kinds an instruction slot can expect and the fixed
//! table of the 35 IPPcode22 opcodes with their operand signatures. The
//! parser consults [`lookup`] once per body line; everything about which
//! opcodes exist and how many operands they take lives here as data.

use std::collections::HashMap;
use std::sync::OnceLock;

/// The kind of operand an instruction slot expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// A variable reference: `LF@name`, `GF@name` or `TF@name`.
    Var,
    /// A symbol: a variable or a typed literal (`int@`, `bool@`, `string@`, `nil@`).
    Symb,
    /// A bare label identifier.
    Label,
    /// A type name: `int`, `string`, `bool` or `nil`.
    Type,
}

impl OperandKind {
    /// Lowercase name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            OperandKind::Var => "var",
            OperandKind::Symb => "symb",
            OperandKind::Label => "label",
            OperandKind::Type => "type",
        }
    }
}

impl std::fmt::Display for OperandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    /// Canonical (upper-case) opcode name.
    pub name: &'static str,
    /// Expected operand kinds, in order. Its length is the opcode's arity.
    pub signature: &'static [OperandKind],
}

impl OpcodeEntry {
    /// Number of operands the opcode takes.
    pub fn arity(&self) -> usize {
        self.signature.len()
    }
}

use OperandKind::{Label, Symb, Type, Var};

const NONE: &[OperandKind] = &[];
const VAR: &[OperandKind] = &[Var];
const LABEL: &[OperandKind] = &[Label];
const SYMB: &[OperandKind] = &[Symb];
const VAR_SYMB: &[OperandKind] = &[Var, Symb];
const VAR_TYPE: &[OperandKind] = &[Var, Type];
const VAR_SYMB_SYMB: &[OperandKind] = &[Var, Symb, Symb];
const LABEL_SYMB_SYMB: &[OperandKind] = &[Label, Symb, Symb];

const fn op(name: &'static str, signature: &'static [OperandKind]) -> OpcodeEntry {
    OpcodeEntry { name, signature }
}

/// Every IPPcode22 opcode, grouped by signature.
pub static OPCODES: [OpcodeEntry; 35] = [
    // frames and calls
    op("CREATEFRAME", NONE),
    op("PUSHFRAME", NONE),
    op("POPFRAME", NONE),
    op("RETURN", NONE),
    op("BREAK", NONE),
    op("DEFVAR", VAR),
    op("POPS", VAR),
    op("CALL", LABEL),
    op("LABEL", LABEL),
    op("JUMP", LABEL),
    op("PUSHS", SYMB),
    op("WRITE", SYMB),
    op("EXIT", SYMB),
    op("DPRINT", SYMB),
    // data movement and conversion
    op("MOVE", VAR_SYMB),
    op("INT2CHAR", VAR_SYMB),
    op("STRLEN", VAR_SYMB),
    op("TYPE", VAR_SYMB),
    op("NOT", VAR_SYMB),
    op("READ", VAR_TYPE),
    // arithmetic, relational, boolean, string
    op("ADD", VAR_SYMB_SYMB),
    op("SUB", VAR_SYMB_SYMB),
    op("MUL", VAR_SYMB_SYMB),
    op("IDIV", VAR_SYMB_SYMB),
    op("LT", VAR_SYMB_SYMB),
    op("GT", VAR_SYMB_SYMB),
    op("EQ", VAR_SYMB_SYMB),
    op("AND", VAR_SYMB_SYMB),
    op("OR", VAR_SYMB_SYMB),
    op("STRI2INT", VAR_SYMB_SYMB),
    op("CONCAT", VAR_SYMB_SYMB),
    op("GETCHAR", VAR_SYMB_SYMB),
    op("SETCHAR", VAR_SYMB_SYMB),
    // conditional jumps
    op("JUMPIFEQ", LABEL_SYMB_SYMB),
    op("JUMPIFNEQ", LABEL_SYMB_SYMB),
];

/// Returns the cached name → entry map, building it on first access.
fn opcode_map() -> &'static HashMap<&'static str, &'static OpcodeEntry> {
    static MAP: OnceLock<HashMap<&'static str, &'static OpcodeEntry>> = OnceLock::new();
    MAP.get_or_init(|| OPCODES.iter().map(|e| (e.name, e)).collect())
}

/// Look up an opcode by its canonical (upper-case) name.
///
/// Matching is exact; callers upper-case the source token first.
pub fn lookup(name: &str) -> Option<&'static OpcodeEntry> {
    opcode_map().get(name).copied()
}
