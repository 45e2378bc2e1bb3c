//! Shared test helpers for `ippcode_core` integration tests.

#![allow(unreachable_pub)]

use ippcode_core::{EmitConfig, ParseError, Program, emit_xml, parse_str};

/// Prepend the language header and a newline to a program body.
#[allow(dead_code)]
pub fn with_header(body: &str) -> String {
    format!(".IPPcode22\n{body}")
}

/// Parse input that must be accepted.
#[allow(dead_code)]
pub fn parse_ok(input: &str) -> Program {
    parse_str(input).unwrap_or_else(|e| panic!("expected {input:?} to parse, got: {e}"))
}

/// Parse input that must be rejected.
#[allow(dead_code)]
pub fn parse_err(input: &str) -> ParseError {
    match parse_str(input) {
        Ok(program) => panic!("expected {input:?} to fail, got {program:?}"),
        Err(e) => e,
    }
}

/// Parse and emit with the default configuration.
#[allow(dead_code)]
pub fn xml(input: &str) -> String {
    emit_xml(&parse_ok(input), &EmitConfig::default())
}

/// Opcode names in program order.
#[allow(dead_code)]
pub fn opcodes(program: &Program) -> Vec<&'static str> {
    program.instructions.iter().map(|i| i.opcode).collect()
}
