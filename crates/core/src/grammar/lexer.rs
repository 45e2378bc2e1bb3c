/// A token that borrows its text directly from the source line, with no allocation.
///
/// `start`/`end` are absolute byte offsets into the whole input, so a token
/// can be turned into a diagnostic span without knowing which line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Borrowed slice of the source line.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Cut a line at its comment, if any.
///
/// A comment starts at the first `#` that is not directly preceded by a
/// backslash and runs to the end of the line.
pub fn strip_comment(line: &str) -> &str {
    let b = line.as_bytes();
    let mut i = 0usize;
    while i < b.len() {
        if b[i] == b'#' && (i == 0 || b[i - 1] != b'\\') {
            return &line[..i];
        }
        i += 1;
    }
    line
}

/// Normalize one raw source line into its tokens.
///
/// Strips the comment, then splits on runs of ASCII whitespace. This trims
/// both edges, collapses internal runs, and drops the line terminator
/// (`\n` or `\r\n`). An empty result means the line is blank or comment-only
/// and should be skipped.
///
/// `base` is the byte offset of `line` within the whole input.
///
/// Only ASCII bytes are compared, and UTF-8 continuation bytes (0x80–0xBF)
/// never match them, so every slice boundary falls on a char boundary.
pub fn tokenize_line(line: &str, base: usize) -> Vec<Token<'_>> {
    let code = strip_comment(line);
    let b = code.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0usize;
    while i < b.len() {
        if b[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < b.len() && !b[i].is_ascii_whitespace() {
            i += 1;
        }
        toks.push(Token {
            text: &code[start..i],
            start: base + start,
            end: base + i,
        });
    }
    toks
}

/// Join tokens with single spaces: the normalized form of the line.
pub fn normalized(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<&str> {
        tokenize_line(line, 0).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(
            texts("  MOVE \t GF@x    int@1  \n"),
            ["MOVE", "GF@x", "int@1"]
        );
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(texts("BREAK\r\n"), ["BREAK"]);
    }

    #[test]
    fn strips_comment() {
        assert_eq!(texts("MOVE GF@x GF@y # note"), ["MOVE", "GF@x", "GF@y"]);
        assert_eq!(texts("MOVE GF@x GF@y#note"), ["MOVE", "GF@x", "GF@y"]);
    }

    #[test]
    fn comment_only_and_blank_lines_are_empty() {
        assert!(texts("# just a comment\n").is_empty());
        assert!(texts("   \t \n").is_empty());
        assert!(texts("").is_empty());
    }

    #[test]
    fn escaped_hash_is_not_a_comment() {
        assert_eq!(texts("WRITE string@a\\#b # c"), ["WRITE", "string@a\\#b"]);
    }

    #[test]
    fn offsets_are_absolute() {
        let toks = tokenize_line("  DEFVAR GF@x", 100);
        assert_eq!(toks[0].start, 102);
        assert_eq!(toks[0].end, 108);
        assert_eq!(toks[1].start, 109);
        assert_eq!(toks[1].end, 113);
    }

    #[test]
    fn multibyte_text_keeps_char_boundaries() {
        let toks = tokenize_line("WRITE string@žluťoučký", 0);
        assert_eq!(toks[1].text, "string@žluťoučký");
    }

    #[test]
    fn normalized_joins_with_single_space() {
        let toks = tokenize_line("\t.IPPcode22   # header", 0);
        assert_eq!(normalized(&toks), ".IPPcode22");
    }
}
