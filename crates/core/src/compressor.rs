//! Compression pipeline and its configuration.
//!
//! # Example
//! ```ignore
//! use pscompress_core::{Compressor, DefinitionScan};
//!
//! let compressor = Compressor::builder()
//!     .definition_scan(DefinitionScan::Strict)
//!     .build()?;
//! let small = compressor.compress(&source)?;
//! ```

use std::fmt;

use crate::error::{CompressError, Result};
use crate::lexer::{Document, Token};
use crate::names::Alphabet;
use crate::passes::{
    DefinitionScan, NameMap, eliminate_dead_procedures, mangle_defaults, mangle_variables,
    remangle, strip_comments,
};

/// Which passes run, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Drop comment tokens from Body.
    pub strip_comments: bool,
    /// Remove procedures that nothing refers to.
    pub eliminate_dead_code: bool,
    /// Rename user names and built-in operators.
    pub mangle: bool,
    /// Reissue codes by use count. Requires `mangle`.
    pub remangle: bool,
    pub definition_scan: DefinitionScan,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            strip_comments: true,
            eliminate_dead_code: true,
            mangle: true,
            remangle: true,
            definition_scan: DefinitionScan::Lenient,
        }
    }
}

impl CompressOptions {
    fn validate(&self) -> Result<()> {
        if self.remangle && !self.mangle {
            return Err(CompressError::InvalidOptions(
                "frequency remangling requires mangling".to_string(),
            ));
        }
        Ok(())
    }
}

/// A builder for configuring a [`Compressor`].
#[derive(Debug, Clone, Default)]
pub struct CompressorBuilder {
    options: CompressOptions,
    alphabet: Option<(String, String)>,
}

impl CompressorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all pass settings at once.
    pub fn options(mut self, options: CompressOptions) -> Self {
        self.options = options;
        self
    }

    pub fn strip_comments(mut self, enabled: bool) -> Self {
        self.options.strip_comments = enabled;
        self
    }

    pub fn eliminate_dead_code(mut self, enabled: bool) -> Self {
        self.options.eliminate_dead_code = enabled;
        self
    }

    /// Enables or disables mangling. Disabling it also disables
    /// remangling, which has nothing to work on without it.
    pub fn mangle(mut self, enabled: bool) -> Self {
        self.options.mangle = enabled;
        if !enabled {
            self.options.remangle = false;
        }
        self
    }

    pub fn remangle(mut self, enabled: bool) -> Self {
        self.options.remangle = enabled;
        self
    }

    pub fn definition_scan(mut self, scan: DefinitionScan) -> Self {
        self.options.definition_scan = scan;
        self
    }

    /// Spell codes with custom alphabets instead of the PostScript default.
    ///
    /// # Arguments
    /// * `primary` - Characters that may start a code.
    /// * `secondary` - Characters for every later position.
    pub fn alphabet(mut self, primary: &str, secondary: &str) -> Self {
        self.alphabet = Some((primary.to_string(), secondary.to_string()));
        self
    }

    /// Validate the configuration and build the compressor.
    pub fn build(self) -> Result<Compressor> {
        self.options.validate()?;
        let alphabet = match &self.alphabet {
            Some((primary, secondary)) => Alphabet::new(primary, secondary)?,
            None => Alphabet::postscript()?,
        };
        Ok(Compressor {
            options: self.options,
            alphabet,
        })
    }
}

/// A validated, reusable compression configuration.
///
/// Every call to [`Compressor::compress`] runs in its own [`Session`], so
/// one compressor can serve any number of jobs.
#[derive(Debug, Clone)]
pub struct Compressor {
    options: CompressOptions,
    alphabet: Alphabet,
}

impl Compressor {
    /// A compressor running the full pipeline with the default alphabet.
    pub fn new() -> Result<Self> {
        CompressorBuilder::new().build()
    }

    pub fn builder() -> CompressorBuilder {
        CompressorBuilder::new()
    }

    pub fn options(&self) -> &CompressOptions {
        &self.options
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Compress `text`, failing without output on malformed input.
    pub fn compress(&self, text: &str) -> Result<String> {
        self.compress_with_stats(text).map(|compressed| compressed.text)
    }

    /// Compress `text` and report what each pass did.
    pub fn compress_with_stats(&self, text: &str) -> Result<Compressed> {
        Session::new(&self.options, &self.alphabet, text).run()
    }
}

/// Output of a compression job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub text: String,
    pub stats: CompressStats,
}

/// Counters collected while compressing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// Body tokens straight after tokenizing.
    pub tokens_in: usize,
    /// Body tokens after the last pass, prelude included.
    pub tokens_out: usize,
    pub comments_removed: usize,
    /// Eliminated procedures, in removal order.
    pub procedures_removed: Vec<Token>,
    pub variables_mangled: usize,
    pub operators_aliased: usize,
    pub prelude_tokens: usize,
}

impl fmt::Display for CompressStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} bytes, {} -> {} tokens, {} comments, {} dead procedures, {} variables, {} operators",
            self.input_bytes,
            self.output_bytes,
            self.tokens_in,
            self.tokens_out,
            self.comments_removed,
            self.procedures_removed.len(),
            self.variables_mangled,
            self.operators_aliased,
        )
    }
}

/// State of a single compression job.
///
/// Owns the document and the name map; created per job and consumed by
/// [`Session::run`].
#[derive(Debug)]
pub struct Session<'a> {
    options: &'a CompressOptions,
    alphabet: &'a Alphabet,
    document: Document,
    names: NameMap,
    stats: CompressStats,
}

impl<'a> Session<'a> {
    pub fn new(options: &'a CompressOptions, alphabet: &'a Alphabet, text: &str) -> Self {
        let document = Document::parse(text);
        let stats = CompressStats {
            input_bytes: text.len(),
            tokens_in: document.body.len(),
            ..CompressStats::default()
        };
        Self {
            options,
            alphabet,
            document,
            names: NameMap::new(),
            stats,
        }
    }

    /// Run every enabled pass in order and render the result.
    pub fn run(mut self) -> Result<Compressed> {
        let body = &mut self.document.body;

        if self.options.strip_comments {
            self.stats.comments_removed = strip_comments(body);
        }
        if self.options.eliminate_dead_code {
            self.stats.procedures_removed =
                eliminate_dead_procedures(body, self.options.definition_scan)?;
        }
        if self.options.mangle {
            // Both mangling passes draw from one sequence so their codes
            // never collide.
            let mut generator = self.alphabet.generator();
            self.stats.variables_mangled = mangle_variables(body, &mut self.names, &mut generator);
            let prelude = mangle_defaults(body, &mut self.names, &mut generator)?;
            for (name, code) in self.names.iter() {
                tracing::trace!(name, code, "assigned code");
            }
            self.stats.operators_aliased = prelude.aliases().len();
            self.stats.prelude_tokens = prelude.tokens().count();

            if self.options.remangle {
                remangle(body, &self.names, self.alphabet.generator());
            }
        }

        let text = self.document.to_postscript();
        self.stats.tokens_out = self.document.body.len();
        self.stats.output_bytes = text.len();
        tracing::debug!(
            input_bytes = self.stats.input_bytes,
            output_bytes = self.stats.output_bytes,
            tokens_in = self.stats.tokens_in,
            tokens_out = self.stats.tokens_out,
            "compressed document"
        );
        Ok(Compressed {
            text,
            stats: self.stats,
        })
    }
}

/// Compress `text` with the full default pipeline.
pub fn compress(text: &str) -> Result<String> {
    Compressor::new()?.compress(text)
}
