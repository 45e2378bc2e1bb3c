pub use ippcode_spec_tables::{OPCODES, OpcodeEntry, OperandKind, lookup};
