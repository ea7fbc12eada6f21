//! Line-oriented PostScript tokenizer.
//!
//! This is not a PostScript grammar. Source text is split into three
//! sections: verbatim header lines (Setup), a whitespace-separated token
//! stream (Body) and verbatim footer lines (Teardown). Only Body is
//! analysed and rewritten by the passes.

use smol_str::SmolStr;

/// An atomic unit of Body text.
pub type Token = SmolStr;

pub const OPEN_BRACE: &str = "{";
pub const CLOSE_BRACE: &str = "}";

/// Structural kind of a Body token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Starts with `%`.
    Comment,
    /// A `/name` literal.
    Literal,
    OpenBrace,
    CloseBrace,
    /// Only alphabetic characters, e.g. an operator such as `moveto`.
    Word,
    /// Numbers, strings, array brackets and anything else.
    Other,
}

impl TokenKind {
    pub fn of(token: &str) -> Self {
        match token {
            OPEN_BRACE => TokenKind::OpenBrace,
            CLOSE_BRACE => TokenKind::CloseBrace,
            _ if token.starts_with('%') => TokenKind::Comment,
            _ if token.starts_with('/') => TokenKind::Literal,
            _ if !token.is_empty() && token.chars().all(char::is_alphabetic) => TokenKind::Word,
            _ => TokenKind::Other,
        }
    }
}

/// Name carried by a `/name` literal, without the slash.
pub fn literal_name(token: &str) -> Option<&str> {
    token.strip_prefix('/')
}

/// Classification of one trimmed source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `%%Trailer` or `%%EOF`.
    Teardown,
    /// DSC comments (`%%`), the `%!` magic and `<<` dictionaries.
    Setup,
    /// A whole-line comment, kept as a single Body token.
    Comment,
    /// Code followed by a comment starting at the given byte offset.
    TrailingComment(usize),
    Code,
}

impl LineKind {
    /// Classify a line that has already been trimmed. Rules are checked in
    /// order; the first match wins.
    pub fn of(line: &str) -> Self {
        if line == "%%Trailer" || line == "%%EOF" {
            LineKind::Teardown
        } else if line.starts_with("%%") || line.starts_with("%!") || line.starts_with("<<") {
            LineKind::Setup
        } else if line.starts_with('%') {
            LineKind::Comment
        } else if let Some(pos) = line.find('%') {
            LineKind::TrailingComment(pos)
        } else {
            LineKind::Code
        }
    }
}

/// Pad braces so they always split out as their own tokens, and fuse the
/// `bind def` and `exch def` idioms into single binding operators.
pub fn preprocess(text: &str) -> String {
    text.replace('{', " { ")
        .replace('}', " } ")
        .replace("bind def", "binddef")
        .replace("exch def", "exchdef")
}

/// A PostScript program split into its three sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub setup: Vec<String>,
    pub body: Vec<Token>,
    pub teardown: Vec<String>,
}

impl Document {
    /// Preprocess and tokenize raw source text.
    pub fn parse(text: &str) -> Self {
        let text = preprocess(text);
        let mut doc = Self::default();
        for line in text.split('\n') {
            doc.push_line(line.trim());
        }
        doc
    }

    fn push_line(&mut self, line: &str) {
        match LineKind::of(line) {
            LineKind::Teardown => self.teardown.push(line.to_string()),
            LineKind::Setup => self.setup.push(line.to_string()),
            LineKind::Comment => self.body.push(Token::new(line)),
            LineKind::TrailingComment(pos) => {
                let (code, comment) = line.split_at(pos);
                self.body.extend(code.split_whitespace().map(Token::new));
                self.body.push(Token::new(comment));
            }
            LineKind::Code => self.body.extend(line.split_whitespace().map(Token::new)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind() {
        assert_eq!(TokenKind::of("% note"), TokenKind::Comment);
        assert_eq!(TokenKind::of("/foo"), TokenKind::Literal);
        assert_eq!(TokenKind::of("{"), TokenKind::OpenBrace);
        assert_eq!(TokenKind::of("}"), TokenKind::CloseBrace);
        assert_eq!(TokenKind::of("moveto"), TokenKind::Word);
        assert_eq!(TokenKind::of("12"), TokenKind::Other);
        assert_eq!(TokenKind::of("add2"), TokenKind::Other);
        assert_eq!(TokenKind::of("{add}"), TokenKind::Other);
    }

    #[test]
    fn test_line_kind_precedence() {
        assert_eq!(LineKind::of("%%EOF"), LineKind::Teardown);
        assert_eq!(LineKind::of("%%Trailer"), LineKind::Teardown);
        assert_eq!(LineKind::of("%%BoundingBox: 0 0 10 10"), LineKind::Setup);
        assert_eq!(LineKind::of("%!PS-Adobe-3.0"), LineKind::Setup);
        assert_eq!(LineKind::of("<< /PageSize [595 842] >> setpagedevice"), LineKind::Setup);
        assert_eq!(LineKind::of("% plain"), LineKind::Comment);
        assert_eq!(LineKind::of("1 2 add % sum"), LineKind::TrailingComment(8));
        assert_eq!(LineKind::of("1 2 add"), LineKind::Code);
    }

    #[test]
    fn test_preprocess_fuses_binders() {
        assert_eq!(preprocess("/f{x}bind def"), "/f { x } binddef");
        assert_eq!(preprocess("/v exch def"), "/v exchdef");
    }
}
