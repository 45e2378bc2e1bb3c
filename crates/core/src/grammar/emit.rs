//! XML emitter. Renders a validated [`Program`] as the IPPcode22 XML
//! representation.
//!
//! Output is fully deterministic: attribute order is fixed, instructions are
//! written in `order`, and nothing depends on hashing or the environment.
//! Operand text is XML-escaped but otherwise passed through verbatim; string
//! escape sequences like `\032` are not decoded.

use std::borrow::Cow;

use crate::grammar::ast::{Argument, Instruction, Program};

// ── Configuration ───────────────────────────────────────────────────────

/// Indentation style for emitted XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// One element per line, no leading indentation.
    None,
    /// The given number of spaces per nesting level.
    Spaces(usize),
    /// One tab per nesting level.
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

/// Configuration for the XML emitter.
#[derive(Debug, Clone, Default)]
pub struct EmitConfig {
    /// Indentation style.
    pub indent: Indent,
}

// ── Public API ──────────────────────────────────────────────────────────

/// Emit the XML document for a parsed program.
pub fn emit_xml(program: &Program, config: &EmitConfig) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<program language=\"");
    out.push_str(&escape_xml(program.language));
    out.push('"');

    if program.instructions.is_empty() {
        out.push_str("/>\n");
        return out;
    }

    out.push_str(">\n");
    for instruction in &program.instructions {
        emit_instruction(&mut out, instruction, config);
    }
    out.push_str("</program>\n");
    out
}

/// Replace `& < > ' "` with their predefined XML entities.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

// ── Element emission ────────────────────────────────────────────────────

fn emit_instruction(out: &mut String, instruction: &Instruction, config: &EmitConfig) {
    push_indent(out, config, 1);
    out.push_str(&format!(
        "<instruction order=\"{}\" opcode=\"{}\"",
        instruction.order,
        escape_xml(instruction.opcode),
    ));

    if instruction.args.is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push_str(">\n");
    for arg in &instruction.args {
        emit_argument(out, arg, config);
    }
    push_indent(out, config, 1);
    out.push_str("</instruction>\n");
}

fn emit_argument(out: &mut String, arg: &Argument, config: &EmitConfig) {
    push_indent(out, config, 2);
    let tag = format!("arg{}", arg.position);
    out.push_str(&format!("<{tag} type=\"{}\"", arg.kind));

    let value = arg.value();
    if value.is_empty() {
        out.push_str("/>\n");
    } else {
        out.push('>');
        out.push_str(&escape_xml(value));
        out.push_str(&format!("</{tag}>\n"));
    }
}

fn push_indent(out: &mut String, config: &EmitConfig, depth: usize) {
    match config.indent {
        Indent::None => {}
        Indent::Spaces(n) => out.extend(std::iter::repeat_n(' ', n * depth)),
        Indent::Tab => out.extend(std::iter::repeat_n('\t', depth)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_borrows_clean_text() {
        assert!(matches!(escape_xml("GF@x"), Cow::Borrowed("GF@x")));
    }

    #[test]
    fn escape_all_reserved_characters() {
        assert_eq!(
            escape_xml(r#"a&b<c>d'e"f"#),
            "a&amp;b&lt;c&gt;d&apos;e&quot;f"
        );
    }

    #[test]
    fn escape_leaves_backslash_sequences_alone() {
        assert_eq!(escape_xml("x\\032y"), "x\\032y");
    }

    #[test]
    fn empty_program_is_self_closing() {
        let xml = emit_xml(&Program::default(), &EmitConfig::default());
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<program language=\"IPPcode22\"/>\n"
        );
    }
}
