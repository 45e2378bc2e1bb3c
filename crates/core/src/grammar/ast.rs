use ippcode_diagnostics::Span;

/// Language tag written to the `language` attribute of the XML root.
pub const LANGUAGE: &str = "IPPcode22";

/// Header line that must open every source file.
pub const HEADER_MARKER: &str = ".IPPcode22";

/// A fully validated IPPcode22 program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Language tag (always [`LANGUAGE`]).
    pub language: &'static str,
    /// Instructions in source order; `order` runs 1..=N without gaps.
    pub instructions: Vec<Instruction>,
}

impl Default for Program {
    fn default() -> Self {
        Self {
            language: LANGUAGE,
            instructions: Vec::new(),
        }
    }
}

/// A single accepted instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// 1-based position among accepted instructions.
    pub order: u32,
    /// Canonical upper-case opcode name.
    pub opcode: &'static str,
    /// Operands; count and kinds always match the opcode's signature.
    pub args: Vec<Argument>,
    /// Source span from the opcode to the last operand.
    pub span: Span,
}

/// One operand of an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// 1-based operand position (`arg1`..`arg3`).
    pub position: u8,
    /// Concrete kind the token was classified as.
    pub kind: ArgKind,
    /// Original token text.
    pub raw: String,
    /// Source span of the token.
    pub span: Span,
}

impl Argument {
    /// Text content written to XML, before escaping.
    ///
    /// Variables, labels and types keep the whole token; literals drop their
    /// `type@` prefix.
    pub fn value(&self) -> &str {
        match self.kind {
            ArgKind::Var | ArgKind::Label | ArgKind::Type => &self.raw,
            ArgKind::Int | ArgKind::Bool | ArgKind::String | ArgKind::Nil => self
                .raw
                .split_once('@')
                .map_or(self.raw.as_str(), |(_, rest)| rest),
        }
    }
}

/// Concrete argument kind, written as the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Frame-qualified variable.
    Var,
    /// Label identifier.
    Label,
    /// Type name.
    Type,
    /// Integer literal.
    Int,
    /// Boolean literal.
    Bool,
    /// String literal.
    String,
    /// The `nil` literal.
    Nil,
}

impl ArgKind {
    /// Name used in the XML `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            ArgKind::Var => "var",
            ArgKind::Label => "label",
            ArgKind::Type => "type",
            ArgKind::Int => "int",
            ArgKind::Bool => "bool",
            ArgKind::String => "string",
            ArgKind::Nil => "nil",
        }
    }
}

impl std::fmt::Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
