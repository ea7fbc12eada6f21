//! Dead procedure elimination.
//!
//! A procedure is a `/name { ... } def` span. It is dead when the bare token
//! `name` appears nowhere in Body. Removing one procedure can leave the
//! procedures only it called dead as well, so the scan restarts from the top
//! after every removal and stops once a full scan removes nothing.
//!
//! Each restart rebuilds the reference set and rescans Body, so the cost is
//! quadratic in the number of dead procedures. Inputs are small generated
//! programs; see `benches/compress_bench.rs` for the curve.

use std::ops::Range;

use rustc_hash::FxHashSet;

use crate::error::{CompressError, Result};
use crate::lexer::{CLOSE_BRACE, OPEN_BRACE, Token, literal_name};

/// Tokens that close a definition statement.
const TERMINATORS: [&str; 2] = ["def", "binddef"];

/// How the end of a candidate definition is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DefinitionScan {
    /// Skip forward from the closing brace to the first `def` or `binddef`,
    /// whatever sits in between. A procedure literal that is never bound
    /// (pushed into an array, say) is still treated as a definition and the
    /// span runs on to the next terminator.
    #[default]
    Lenient,
    /// Only `bind` may sit between the closing brace and the terminator.
    /// Candidates that do not fit are kept as they are.
    Strict,
}

/// Remove dead procedure definitions from `body` until none are left.
///
/// Returns the names of the removed procedures in removal order.
pub fn eliminate_dead_procedures(body: &mut Vec<Token>, scan: DefinitionScan) -> Result<Vec<Token>> {
    let mut removed = Vec::new();
    while let Some(span) = find_dead_definition(body, scan)? {
        let name = literal_name(&body[span.start]).map(Token::new).unwrap_or_default();
        tracing::trace!(%name, start = span.start, tokens = span.len(), "removing dead procedure");
        body.drain(span);
        removed.push(name);
    }
    tracing::debug!(removed = removed.len(), "eliminated dead procedures");
    Ok(removed)
}

/// Locate the first dead definition, as a token range including the
/// terminator.
fn find_dead_definition(body: &[Token], scan: DefinitionScan) -> Result<Option<Range<usize>>> {
    let referenced: FxHashSet<&str> = body.iter().map(Token::as_str).collect();

    for (start, token) in body.iter().enumerate() {
        let Some(name) = literal_name(token) else {
            continue;
        };
        if referenced.contains(name) || body.get(start + 1).map(Token::as_str) != Some(OPEN_BRACE) {
            continue;
        }

        let close = matching_brace(body, start + 1).ok_or_else(|| CompressError::UnclosedProcedure {
            name: name.to_string(),
            pos: start,
        })?;

        match scan {
            DefinitionScan::Lenient => {
                let end = body[close..]
                    .iter()
                    .position(|t| TERMINATORS.contains(&t.as_str()))
                    .map(|offset| close + offset)
                    .ok_or_else(|| CompressError::UnterminatedDefinition {
                        name: name.to_string(),
                        pos: start,
                    })?;
                return Ok(Some(start..end + 1));
            }
            DefinitionScan::Strict => {
                if let Some(end) = bound_terminator(body, close + 1) {
                    return Ok(Some(start..end + 1));
                }
            }
        }
    }
    Ok(None)
}

/// Index of the brace closing the one at `open`.
fn matching_brace(body: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in body.iter().enumerate().skip(open) {
        match token.as_str() {
            OPEN_BRACE => depth += 1,
            CLOSE_BRACE => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Terminator reachable from `from` across nothing but `bind` tokens.
fn bound_terminator(body: &[Token], from: usize) -> Option<usize> {
    for (i, token) in body.iter().enumerate().skip(from) {
        match token.as_str() {
            t if TERMINATORS.contains(&t) => return Some(i),
            "bind" => {}
            _ => return None,
        }
    }
    None
}
