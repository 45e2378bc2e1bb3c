//! Operand classification: lexical grammars for variables, labels, types and
//! literals.
//!
//! Every matcher is anchored at both ends of the token, so a token that merely
//! starts with a valid form (`int@5x`, `GF@x@y`) is rejected.

use ippcode_spec_tables::OperandKind;

use super::ast::ArgKind;
use crate::escape::{EscapeError, validate_escapes};

/// Why a token could not be classified for its expected kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    /// The token matches none of the alternatives for the expected kind.
    Invalid,
    /// The token is a `string@` literal with a malformed escape sequence.
    /// The error offset is relative to the whole token.
    Escape(EscapeError),
}

/// Frame prefixes for variables.
const FRAMES: [&str; 3] = ["LF@", "GF@", "TF@"];

/// Type names accepted by `type` operands.
const TYPE_NAMES: [&str; 4] = ["int", "string", "bool", "nil"];

/// Characters allowed in an identifier besides ASCII letters (and, after the
/// first position, ASCII digits).
fn is_special(b: u8) -> bool {
    matches!(b, b'_' | b'$' | b'&' | b'%' | b'*' | b'!' | b'?' | b'-')
}

/// Check the identifier grammar used by variable names and labels.
pub fn is_identifier(s: &str) -> bool {
    let b = s.as_bytes();
    match b.split_first() {
        Some((&first, rest)) => {
            (first.is_ascii_alphabetic() || is_special(first))
                && rest
                    .iter()
                    .all(|&c| c.is_ascii_alphanumeric() || is_special(c))
        }
        None => false,
    }
}

/// Check `LF@name`, `GF@name` or `TF@name`.
pub fn is_var(s: &str) -> bool {
    FRAMES
        .iter()
        .find_map(|frame| s.strip_prefix(*frame))
        .is_some_and(is_identifier)
}

/// Check an integer literal body: optional sign followed by ASCII digits.
fn is_int_body(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Classify `token` against the `expected` operand kind.
///
/// Returns the concrete [`ArgKind`] the token was recognized as. For
/// [`OperandKind::Symb`] this is the matched literal subtype or
/// [`ArgKind::Var`].
pub fn classify(token: &str, expected: OperandKind) -> Result<ArgKind, OperandError> {
    match expected {
        OperandKind::Var if is_var(token) => Ok(ArgKind::Var),
        OperandKind::Label if is_identifier(token) => Ok(ArgKind::Label),
        OperandKind::Type if TYPE_NAMES.contains(&token) => Ok(ArgKind::Type),
        OperandKind::Symb => classify_symbol(token),
        _ => Err(OperandError::Invalid),
    }
}

fn classify_symbol(token: &str) -> Result<ArgKind, OperandError> {
    if is_var(token) {
        return Ok(ArgKind::Var);
    }
    let Some((prefix, body)) = token.split_once('@') else {
        return Err(OperandError::Invalid);
    };
    match prefix {
        "int" if is_int_body(body) => Ok(ArgKind::Int),
        "bool" if body == "true" || body == "false" => Ok(ArgKind::Bool),
        "nil" if body == "nil" => Ok(ArgKind::Nil),
        "string" => match validate_escapes(body).into_iter().next() {
            None => Ok(ArgKind::String),
            Some(mut err) => {
                err.offset += prefix.len() + 1;
                Err(OperandError::Escape(err))
            }
        },
        _ => Err(OperandError::Invalid),
    }
}
