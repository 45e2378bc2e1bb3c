//! Typed, fatal parse errors.

use std::collections::BTreeMap;
use std::io;

use ippcode_diagnostics::{Diagnostic, Span, codes};
use ippcode_spec_tables::OperandKind;

use crate::grammar::ast::HEADER_MARKER;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Everything that stops a program from being accepted.
///
/// Parsing is fail-fast: the first error aborts the run and no XML is
/// produced. Each variant maps to one diagnostic code and, through it, to a
/// process exit code.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The first meaningful line is not the `.IPPcode22` marker, or the input
    /// has no meaningful line at all.
    #[error("{}", header_message(.found))]
    MissingOrWrongHeader {
        /// The normalized line found instead, if any.
        found: Option<String>,
        /// Where the offending line is (or end of input).
        span: Span,
    },

    /// The opcode is not in the instruction table.
    #[error("unknown instruction '{token}'")]
    UnknownInstruction {
        /// The first token of the line, as written.
        token: String,
        /// Span of the token.
        span: Span,
    },

    /// The operand count does not match the opcode's signature.
    #[error("{opcode} expects {expected} operand{}, found {found}", plural_suffix(.expected))]
    OperandArityMismatch {
        /// Canonical opcode name.
        opcode: &'static str,
        /// Operands required by the signature.
        expected: usize,
        /// Operands present on the line.
        found: usize,
        /// Span of the whole line.
        span: Span,
    },

    /// An operand fails the grammar for its expected kind.
    #[error("{opcode}: operand {position} '{token}' is not a valid {expected}")]
    InvalidOperand {
        /// Canonical opcode name.
        opcode: &'static str,
        /// 1-based operand position.
        position: usize,
        /// The kind the signature expects at this position.
        expected: OperandKind,
        /// The offending token.
        token: String,
        /// Span of the token.
        span: Span,
    },

    /// A string literal contains a malformed escape sequence.
    #[error("{opcode}: operand {position} '{token}': {details}")]
    InvalidEscapeSequence {
        /// Canonical opcode name.
        opcode: &'static str,
        /// 1-based operand position.
        position: usize,
        /// The offending token.
        token: String,
        /// Description of the malformed sequence.
        details: String,
        /// Span of the malformed sequence within the token.
        span: Span,
    },

    /// The source could not be read.
    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),
}

fn header_message(found: &Option<String>) -> String {
    match found {
        Some(line) => format!("expected header '{HEADER_MARKER}', found '{line}'"),
        None => format!("missing header '{HEADER_MARKER}'"),
    }
}

fn plural_suffix(n: &usize) -> &'static str {
    if *n == 1 { "" } else { "s" }
}

impl ParseError {
    /// Diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MissingOrWrongHeader { .. } => codes::MISSING_HEADER,
            ParseError::UnknownInstruction { .. } => codes::UNKNOWN_INSTRUCTION,
            ParseError::OperandArityMismatch { .. } => codes::OPERAND_ARITY,
            ParseError::InvalidOperand { .. } => codes::INVALID_OPERAND,
            ParseError::InvalidEscapeSequence { .. } => codes::INVALID_ESCAPE,
            ParseError::Io(_) => codes::INPUT_ERROR,
        }
    }

    /// Source span the error points at, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::MissingOrWrongHeader { span, .. }
            | ParseError::UnknownInstruction { span, .. }
            | ParseError::OperandArityMismatch { span, .. }
            | ParseError::InvalidOperand { span, .. }
            | ParseError::InvalidEscapeSequence { span, .. } => Some(*span),
            ParseError::Io(_) => None,
        }
    }

    /// Process exit code the CLI terminates with.
    pub fn exit_code(&self) -> i32 {
        ippcode_diagnostics::exit_code(self.code()).unwrap_or(99)
    }

    /// Convert into the shared [`Diagnostic`] type, with structured context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), self.to_string(), self.span());
        match self {
            ParseError::MissingOrWrongHeader { found, .. } => match found {
                Some(line) => diag.with_context(ctx!(
                    "expected" => HEADER_MARKER,
                    "found" => line.as_str(),
                )),
                None => diag.with_context(ctx!("expected" => HEADER_MARKER)),
            },
            ParseError::UnknownInstruction { token, .. } => {
                diag.with_context(ctx!("opcode" => token.as_str()))
            }
            ParseError::OperandArityMismatch {
                opcode,
                expected,
                found,
                ..
            } => diag.with_context(ctx!(
                "opcode" => *opcode,
                "expected" => expected.to_string(),
                "found" => found.to_string(),
            )),
            ParseError::InvalidOperand {
                opcode,
                position,
                expected,
                token,
                ..
            } => diag.with_context(ctx!(
                "opcode" => *opcode,
                "position" => position.to_string(),
                "expected" => expected.as_str(),
                "token" => token.as_str(),
            )),
            ParseError::InvalidEscapeSequence {
                opcode,
                position,
                token,
                ..
            } => diag.with_context(ctx!(
                "opcode" => *opcode,
                "position" => position.to_string(),
                "token" => token.as_str(),
            )),
            ParseError::Io(_) => diag,
        }
    }
}
