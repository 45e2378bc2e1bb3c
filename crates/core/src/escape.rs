//! Escape sequence validation for IPPcode22 string literals.
//!
//! Inside a `string@` literal a backslash introduces a character code and must
//! be followed by exactly three decimal digits (`\032` is a space, `\092` a
//! backslash). Escapes are only validated here; the emitter passes them
//! through to the XML untouched.

/// An escape validation error at a specific byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeError {
    /// Byte offset of the backslash within the scanned content.
    pub offset: usize,
    /// Human-readable description of the error.
    pub message: String,
}

/// Validate escape sequences in string literal content (the text after `@`).
///
/// Returns every malformed sequence found, in order. An empty list means the
/// content is valid; content without backslashes is always valid.
pub fn validate_escapes(content: &str) -> Vec<EscapeError> {
    let mut errors = Vec::new();
    let bytes = content.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let digits = bytes[i + 1..]
            .iter()
            .take(3)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 3 {
            i += 4;
            continue;
        }
        let seq_end = next_char_boundary(content, (i + 4).min(bytes.len()));
        errors.push(EscapeError {
            offset: i,
            message: if i + 1 == bytes.len() {
                "lone backslash at end of string (expected '\\' followed by three digits)"
                    .to_string()
            } else {
                format!(
                    "invalid escape sequence {} (expected '\\' followed by three digits 0-9)",
                    &content[i..seq_end],
                )
            },
        });
        // Resume right after the backslash so a following backslash is checked too.
        i += 1;
    }

    errors
}

/// Return the smallest index >= `pos` that is a valid UTF-8 char boundary.
fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos;
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p.min(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_valid() {
        assert!(validate_escapes("hello_world").is_empty());
        assert!(validate_escapes("").is_empty());
    }

    #[test]
    fn three_digit_escapes_are_valid() {
        assert!(validate_escapes("\\123").is_empty());
        assert!(validate_escapes("a\\032b\\092c").is_empty());
    }

    #[test]
    fn extra_digits_after_escape_are_plain_text() {
        assert!(validate_escapes("\\0321").is_empty());
    }

    #[test]
    fn adjacent_escapes() {
        assert!(validate_escapes("\\010\\013").is_empty());
    }

    #[test]
    fn two_digits_then_letter_is_invalid() {
        let errors = validate_escapes("ab\\1x");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, 2);
        assert!(errors[0].message.contains("\\1x"), "{}", errors[0].message);
    }

    #[test]
    fn two_digits_at_end_is_invalid() {
        let errors = validate_escapes("x\\12");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, 1);
    }

    #[test]
    fn lone_backslash_is_invalid() {
        let errors = validate_escapes("abc\\");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, 3);
        assert!(errors[0].message.contains("lone backslash"));
    }

    #[test]
    fn double_backslash_reports_both() {
        let errors = validate_escapes("\\\\");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].offset, 0);
        assert_eq!(errors[1].offset, 1);
    }

    #[test]
    fn multibyte_after_backslash_does_not_panic() {
        let errors = validate_escapes("\\žž");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].offset, 0);
    }
}
