//! Frequency remangling.
//!
//! The mangling passes hand out codes in first-seen order. This pass counts
//! how often each code is used and reissues codes from a fresh generator so
//! the most used name gets the shortest one.

use indexmap::IndexMap;
use itertools::Itertools;
use smol_str::format_smolstr;

use crate::lexer::{Token, literal_name};
use crate::names::NameGenerator;

use super::mangle::NameMap;

/// Reissue every code in `body` by descending use count.
///
/// Bare and `/`-prefixed uses of a code count together. Ties keep the order
/// in which codes were first met. Returns the old code -> new code map; the
/// map in `codes` is left untouched.
pub fn remangle(body: &mut [Token], codes: &NameMap, mut generator: NameGenerator<'_>) -> NameMap {
    let mut counts: IndexMap<Token, usize> = IndexMap::new();
    for token in body.iter() {
        let key = literal_name(token).unwrap_or(token.as_str());
        if codes.is_code(key) {
            *counts.entry(Token::new(key)).or_default() += 1;
        }
    }

    let mut renamed = NameMap::new();
    for (code, _) in counts.into_iter().sorted_by(|a, b| b.1.cmp(&a.1)) {
        renamed.insert(code, generator.next_name());
    }

    for token in body.iter_mut() {
        if let Some(code) = renamed.get(token).cloned() {
            *token = code;
        } else if let Some(code) = literal_name(token).and_then(|old| renamed.get(old)) {
            *token = format_smolstr!("/{code}");
        }
    }

    tracing::debug!(codes = renamed.len(), "remangled by frequency");
    renamed
}
