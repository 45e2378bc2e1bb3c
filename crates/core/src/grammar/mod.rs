/// IPPcode22 program model: instructions and typed arguments.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// XML emitter: renders a [`ast::Program`] as the IPPcode22 XML document.
pub mod emit;
/// Line lexer: comment stripping and whitespace tokenization.
pub mod lexer;
/// Operand classification against the expected operand kind.
pub mod operand;
/// Line-oriented parser with header gating.
pub mod parser;
/// Re-exports of the opcode table used by the parser.
pub mod tables;
