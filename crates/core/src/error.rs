//! Error types for the PostScript compression engine.

use thiserror::Error;

/// Primary error type for compression jobs.
///
/// The first group are configuration errors, raised once when a
/// [`Compressor`](crate::Compressor) is built. The second group are
/// malformed-input errors, raised mid-pass; they abort the whole job.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressError {
    #[error("{alphabet} alphabet contains duplicate character {ch:?}")]
    DuplicateAlphabetChar { alphabet: &'static str, ch: char },

    #[error("primary alphabet needs at least 2 characters, has {0}")]
    PrimaryTooShort(usize),

    #[error("secondary alphabet has {secondary} characters, needs at least {primary}")]
    SecondaryTooShort { primary: usize, secondary: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("procedure /{name} at token {pos} has no closing brace")]
    UnclosedProcedure { name: String, pos: usize },

    #[error("unterminated procedure definition /{name} at token {pos}")]
    UnterminatedDefinition { name: String, pos: usize },

    #[error("/{0} is defined as a variable but is needed as a binding operator")]
    ReservedName(String),
}

/// Convenience Result type alias for CompressError.
pub type Result<T> = std::result::Result<T, CompressError>;
