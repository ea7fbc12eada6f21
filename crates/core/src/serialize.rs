//! Reassemble a document into PostScript text.

use std::fmt;

use crate::lexer::{CLOSE_BRACE, Document, OPEN_BRACE, TokenKind};

/// Join tokens with single spaces, except that braces hug their contents:
/// no space before `}` and none after `{`. A comment token, only present
/// when comments were kept, ends its line.
pub fn join_braces<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    let mut space_before = false;
    let mut after_comment = false;
    for token in tokens {
        let token = token.as_ref();
        if after_comment {
            out.push('\n');
        } else if space_before && token != CLOSE_BRACE {
            out.push(' ');
        }
        out.push_str(token);
        space_before = token != OPEN_BRACE;
        after_comment = TokenKind::of(token) == TokenKind::Comment;
    }
    out
}

impl Document {
    /// Setup lines, the joined Body and Teardown lines, one section per line
    /// group.
    pub fn to_postscript(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}",
            self.setup.join("\n"),
            join_braces(&self.body),
            self.teardown.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_braces() {
        assert_eq!(join_braces(&["{", "a", "}"]), "{a}");
        assert_eq!(join_braces(&["a", "b"]), "a b");
        assert_eq!(join_braces(&["/f", "{", "{", "}", "}", "g"]), "/f {{}} g");
        assert_eq!(join_braces::<&str>(&[]), "");
    }

    #[test]
    fn test_comment_ends_line() {
        assert_eq!(join_braces(&["{", "% c", "}", "x"]), "{% c\n} x");
        assert_eq!(join_braces(&["1", "% c", "2"]), "1 % c\n2");
    }

    #[test]
    fn test_empty_document_keeps_section_breaks() {
        assert_eq!(Document::default().to_postscript(), "\n\n");
    }
}
