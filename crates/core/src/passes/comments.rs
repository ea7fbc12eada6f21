//! Comment removal.

use crate::lexer::{Token, TokenKind};

/// Remove every comment token from `body`, returning how many were dropped.
pub fn strip_comments(body: &mut Vec<Token>) -> usize {
    let before = body.len();
    body.retain(|token| TokenKind::of(token) != TokenKind::Comment);
    let removed = before - body.len();
    tracing::debug!(removed, "stripped comments");
    removed
}
