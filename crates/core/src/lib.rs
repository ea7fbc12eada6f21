//! pscompress - shrink and obfuscate PostScript programs.
//!
//! The engine strips comments, removes procedures that are never referred
//! to and renames every identifier to a short code, giving the shortest
//! codes to the most used names. It works on a whitespace token stream, not
//! a PostScript grammar; inputs are expected to be simple generated
//! programs with one token per whitespace run and no braces or `%` inside
//! string literals.
//!
//! # Example
//! ```ignore
//! let small = pscompress_core::compress("/sq { dup mul } def 3 sq")?;
//! ```

pub mod compressor;
pub mod error;
pub mod lexer;
pub mod names;
pub mod passes;
pub mod serialize;

pub use compressor::{
    CompressOptions, CompressStats, Compressed, Compressor, CompressorBuilder, Session, compress,
};
pub use error::{CompressError, Result};
pub use lexer::{Document, Token};
pub use names::{Alphabet, NameGenerator};
pub use passes::{DefinitionScan, NameMap};
