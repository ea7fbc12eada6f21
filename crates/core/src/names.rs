//! Short synthetic name codes.
//!
//! A code is a counter written in base `B`, where `B` is the size of the
//! primary alphabet. The least significant digit is written first and is
//! drawn from the primary alphabet, so every code starts with a character
//! that may lead a PostScript name. Every further digit is drawn from the
//! secondary alphabet.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::error::{CompressError, Result};

/// Characters that may start a mangled name.
pub const PRIMARY_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-+\"£$&*.,@#'|!";

/// Characters that are only legal after the first position of a name.
pub const DIGIT_CHARS: &str = "1234567890";

/// A validated pair of alphabets used to spell codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    primary: Vec<char>,
    secondary: Vec<char>,
}

impl Alphabet {
    /// Create an alphabet from explicit character sets.
    ///
    /// Fails if either set repeats a character, if the primary set has
    /// fewer than two characters, or if the secondary set is shorter than
    /// the primary one (non-leading digits index it with values `< B`).
    pub fn new(primary: &str, secondary: &str) -> Result<Self> {
        let primary = unique_chars("primary", primary)?;
        let secondary = unique_chars("secondary", secondary)?;
        if primary.len() < 2 {
            return Err(CompressError::PrimaryTooShort(primary.len()));
        }
        if secondary.len() < primary.len() {
            return Err(CompressError::SecondaryTooShort {
                primary: primary.len(),
                secondary: secondary.len(),
            });
        }
        Ok(Self { primary, secondary })
    }

    /// The default alphabet: PostScript name characters, with decimal
    /// digits allowed after the first position.
    pub fn postscript() -> Result<Self> {
        Self::new(PRIMARY_CHARS, &format!("{PRIMARY_CHARS}{DIGIT_CHARS}"))
    }

    /// The numeric base codes are written in.
    pub fn base(&self) -> usize {
        self.primary.len()
    }

    pub fn primary(&self) -> &[char] {
        &self.primary
    }

    pub fn secondary(&self) -> &[char] {
        &self.secondary
    }

    /// Spell counter value `n`.
    pub fn encode(&self, mut n: usize) -> String {
        let base = self.base();
        let mut code = String::new();
        code.push(self.primary[n % base]);
        n /= base;
        while n > 0 {
            code.push(self.secondary[n % base]);
            n /= base;
        }
        code
    }

    /// A fresh generator starting at counter zero.
    pub fn generator(&self) -> NameGenerator<'_> {
        NameGenerator::new(self)
    }
}

fn unique_chars(alphabet: &'static str, chars: &str) -> Result<Vec<char>> {
    let mut seen = FxHashSet::default();
    chars
        .chars()
        .map(|ch| {
            if seen.insert(ch) {
                Ok(ch)
            } else {
                Err(CompressError::DuplicateAlphabetChar { alphabet, ch })
            }
        })
        .collect()
}

/// An endless, non-repeating sequence of codes.
///
/// Two generators over the same alphabet yield the same sequence only when
/// they start from the same counter; passes that need independent sequences
/// each own a generator.
#[derive(Debug, Clone)]
pub struct NameGenerator<'a> {
    alphabet: &'a Alphabet,
    counter: usize,
}

impl<'a> NameGenerator<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self::starting_at(alphabet, 0)
    }

    /// Resume a sequence at an explicit counter value.
    pub fn starting_at(alphabet: &'a Alphabet, counter: usize) -> Self {
        Self { alphabet, counter }
    }

    /// Counter value of the next code to be produced.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Produce the next code.
    pub fn next_name(&mut self) -> SmolStr {
        let code = self.alphabet.encode(self.counter);
        self.counter += 1;
        SmolStr::from(code)
    }
}

impl Iterator for NameGenerator<'_> {
    type Item = SmolStr;

    fn next(&mut self) -> Option<SmolStr> {
        Some(self.next_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_small_alphabet() {
        let alphabet = Alphabet::new("ab", "ab01").unwrap();
        assert_eq!(alphabet.encode(0), "a");
        assert_eq!(alphabet.encode(1), "b");
        // 2 = 0b10: low digit 'a', then 'b'
        assert_eq!(alphabet.encode(2), "ab");
        assert_eq!(alphabet.encode(3), "bb");
        assert_eq!(alphabet.encode(4), "aab");
    }

    #[test]
    fn test_postscript_alphabet_boundaries() {
        let alphabet = Alphabet::postscript().unwrap();
        let base = alphabet.base();
        assert_eq!(base, PRIMARY_CHARS.chars().count());
        assert_eq!(alphabet.encode(0), "a");
        assert_eq!(alphabet.encode(25), "z");
        assert_eq!(alphabet.encode(26), "A");
        assert_eq!(alphabet.encode(base - 1), "!");
        assert_eq!(alphabet.encode(base), "ab");
        assert_eq!(alphabet.encode(base + 1), "bb");
    }

    #[test]
    fn test_generator_resumes_at_counter() {
        let alphabet = Alphabet::postscript().unwrap();
        let mut fresh = alphabet.generator();
        let skipped: Vec<_> = fresh.by_ref().take(5).collect();
        assert_eq!(skipped.len(), 5);
        let mut resumed = NameGenerator::starting_at(&alphabet, 5);
        assert_eq!(fresh.counter(), resumed.counter());
        assert_eq!(fresh.next_name(), resumed.next_name());
    }
}
