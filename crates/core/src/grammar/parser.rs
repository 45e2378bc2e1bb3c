use std::io::BufRead;

use super::{
    ast::{Argument, HEADER_MARKER, Instruction, Program},
    diag::Span,
    lexer::{Token, normalized, tokenize_line},
    operand::{OperandError, classify},
    tables::{OperandKind, lookup},
};
use crate::error::ParseError;

// ─── Configuration ──────────────────────────────────────────────────────────

/// How the first meaningful line is compared against [`HEADER_MARKER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMatch {
    /// Byte-for-byte comparison: only `.IPPcode22` is accepted.
    #[default]
    Exact,
    /// ASCII case-insensitive comparison: `.ippcode22` is accepted too.
    IgnoreCase,
}

/// Parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Header comparison mode.
    pub header_match: HeaderMatch,
}

// ─── Header gate ────────────────────────────────────────────────────────────

/// The parser is either waiting for the language header or reading the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    AwaitingHeader,
    InBody,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse IPPcode22 source with the default configuration.
pub fn parse_str(input: &str) -> Result<Program, ParseError> {
    parse_with_config(input, &ParserConfig::default())
}

/// Parse IPPcode22 source held in memory.
pub fn parse_with_config(input: &str, config: &ParserConfig) -> Result<Program, ParseError> {
    let mut parser = Parser::new(config);
    let mut offset = 0usize;
    for line in input.split_inclusive('\n') {
        parser.feed_line(line, offset)?;
        offset += line.len();
    }
    parser.finish(offset)
}

/// Parse IPPcode22 source from a reader, one line at a time.
///
/// The result is still all-or-nothing: the program is only returned once the
/// reader is exhausted. Read failures (including invalid UTF-8) surface as
/// [`ParseError::Io`].
pub fn parse_reader<R: BufRead>(mut reader: R, config: &ParserConfig) -> Result<Program, ParseError> {
    let mut parser = Parser::new(config);
    let mut line = String::new();
    let mut offset = 0usize;
    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        parser.feed_line(&line, offset)?;
        offset += read;
    }
    parser.finish(offset)
}

// ─── Parser Implementation ─────────────────────────────────────────────────

struct Parser<'c> {
    config: &'c ParserConfig,
    gate: Gate,
    program: Program,
    /// Order assigned to the next accepted instruction.
    next_order: u32,
}

impl<'c> Parser<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            gate: Gate::AwaitingHeader,
            program: Program::default(),
            next_order: 1,
        }
    }

    /// Process one raw line starting at byte `offset` of the input.
    fn feed_line(&mut self, line: &str, offset: usize) -> Result<(), ParseError> {
        let tokens = tokenize_line(line, offset);
        let Some((head, operands)) = tokens.split_first() else {
            return Ok(());
        };
        match self.gate {
            Gate::AwaitingHeader => {
                self.check_header(&tokens)?;
                self.gate = Gate::InBody;
            }
            Gate::InBody => {
                let instruction = self.build_instruction(head, operands, line_span(&tokens))?;
                self.program.instructions.push(instruction);
                self.next_order += 1;
            }
        }
        Ok(())
    }

    /// Close the input. `end` is the total input length in bytes.
    fn finish(self, end: usize) -> Result<Program, ParseError> {
        match self.gate {
            Gate::AwaitingHeader => Err(ParseError::MissingOrWrongHeader {
                found: None,
                span: Span::empty(end),
            }),
            Gate::InBody => Ok(self.program),
        }
    }

    fn check_header(&self, tokens: &[Token<'_>]) -> Result<(), ParseError> {
        let matches = match tokens {
            [only] => match self.config.header_match {
                HeaderMatch::Exact => only.text == HEADER_MARKER,
                HeaderMatch::IgnoreCase => only.text.eq_ignore_ascii_case(HEADER_MARKER),
            },
            _ => false,
        };
        if matches {
            Ok(())
        } else {
            Err(ParseError::MissingOrWrongHeader {
                found: Some(normalized(tokens)),
                span: line_span(tokens),
            })
        }
    }

    // ── Instruction builder ─────────────────────────────────────────────

    fn build_instruction(
        &self,
        head: &Token<'_>,
        operands: &[Token<'_>],
        span: Span,
    ) -> Result<Instruction, ParseError> {
        let entry = lookup(&head.text.to_ascii_uppercase()).ok_or_else(|| {
            ParseError::UnknownInstruction {
                token: head.text.to_string(),
                span: Span::new(head.start, head.end),
            }
        })?;

        if operands.len() != entry.arity() {
            return Err(ParseError::OperandArityMismatch {
                opcode: entry.name,
                expected: entry.arity(),
                found: operands.len(),
                span,
            });
        }

        let args = operands
            .iter()
            .zip(entry.signature)
            .enumerate()
            .map(|(i, (tok, &expected))| build_argument(entry.name, i + 1, tok, expected))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Instruction {
            order: self.next_order,
            opcode: entry.name,
            args,
            span,
        })
    }
}

fn build_argument(
    opcode: &'static str,
    position: usize,
    tok: &Token<'_>,
    expected: OperandKind,
) -> Result<Argument, ParseError> {
    match classify(tok.text, expected) {
        Ok(kind) => Ok(Argument {
            position: position as u8,
            kind,
            raw: tok.text.to_string(),
            span: Span::new(tok.start, tok.end),
        }),
        Err(OperandError::Invalid) => Err(ParseError::InvalidOperand {
            opcode,
            position,
            expected,
            token: tok.text.to_string(),
            span: Span::new(tok.start, tok.end),
        }),
        Err(OperandError::Escape(err)) => {
            // Cover the backslash and whatever digits follow it.
            let digits = tok.text.as_bytes()[err.offset + 1..]
                .iter()
                .take(3)
                .take_while(|b| b.is_ascii_digit())
                .count();
            let start = tok.start + err.offset;
            Err(ParseError::InvalidEscapeSequence {
                opcode,
                position,
                token: tok.text.to_string(),
                details: err.message,
                span: Span::new(start, start + 1 + digits),
            })
        }
    }
}

/// Span from the first to the last token of a line.
fn line_span(tokens: &[Token<'_>]) -> Span {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => Span::new(first.start, last.end),
        _ => Span::empty(0),
    }
}
