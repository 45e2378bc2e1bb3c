//! IPPcode22 parser core library.
//!
//! Reads IPPcode22 source, validates the header, every opcode and every
//! operand, and builds a [`Program`] that the emitter renders as XML. The main
//! entry points are [`parse_str`] for parsing and [`emit_xml`] for output.
//!
//! ```
//! use ippcode_core::{EmitConfig, emit_xml, parse_str};
//!
//! let program = parse_str(".IPPcode22\nDEFVAR GF@x\n").unwrap();
//! let xml = emit_xml(&program, &EmitConfig::default());
//! assert!(xml.contains(r#"<arg1 type="var">GF@x</arg1>"#));
//! ```

#![warn(missing_docs)]

/// Fatal parse errors and their mapping to diagnostics.
pub mod error;
/// Escape sequence validation for string literals.
pub mod escape;
/// IPPcode22 grammar: lexer, operand classifier, parser, program model, emitter.
pub mod grammar;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Parser
pub use grammar::parser::{HeaderMatch, ParserConfig, parse_reader, parse_str, parse_with_config};

// Program model
pub use grammar::ast::{ArgKind, Argument, Instruction, Program};

// Emitter
pub use grammar::emit::{EmitConfig, Indent, emit_xml};

// Errors and diagnostics
pub use error::ParseError;
pub use grammar::diag::{Diagnostic, LineIndex, Span, codes};
