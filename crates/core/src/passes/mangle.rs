//! Identifier mangling.
//!
//! Two passes share one [`NameMap`] and one [`NameGenerator`]:
//!
//! 1. [`mangle_variables`] gives every `/name` literal a code, in order of
//!    first appearance, and rewrites bare references to those names.
//! 2. [`mangle_defaults`] reserves codes for the binding operators, gives
//!    every remaining operator word a code and prepends a prelude that
//!    defines each code in terms of the operator it replaces.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::format_smolstr;

use crate::error::{CompressError, Result};
use crate::lexer::{Token, TokenKind, literal_name};
use crate::names::NameGenerator;

/// Operators the prelude is built from, in code order.
const RESERVED: [&str; 5] = ["bind", "def", "binddef", "exch", "exchdef"];

/// Entries defining the reserved operators.
const COMBINATORS: usize = RESERVED.len();

/// Original identifier -> assigned code, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    codes: IndexMap<Token, Token>,
    assigned: FxHashSet<Token>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code assigned to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.codes.get(name)
    }

    /// Whether `token` is one of the assigned codes.
    pub fn is_code(&self, token: &str) -> bool {
        self.assigned.contains(token)
    }

    /// Map `name` to `code`, returning the code it replaces.
    pub fn insert(&mut self, name: Token, code: Token) -> Option<Token> {
        let previous = self.codes.insert(name, code.clone());
        if let Some(old) = &previous {
            self.assigned.remove(old);
        }
        self.assigned.insert(code);
        previous
    }

    /// Give `name` a fresh code, replacing any earlier assignment.
    pub fn assign(&mut self, name: &str, generator: &mut NameGenerator<'_>) -> Token {
        let code = generator.next_name();
        self.insert(Token::new(name), code.clone());
        code
    }

    /// Code for `name`, assigning a fresh one on first sight.
    pub fn code_for(&mut self, name: &str, generator: &mut NameGenerator<'_>) -> Token {
        match self.codes.get(name).cloned() {
            Some(code) => code,
            None => self.assign(name, generator),
        }
    }

    /// `(name, code)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(name, code)| (name.as_str(), code.as_str()))
    }
}

/// Rename every `/name` literal and every bare reference to a known name.
///
/// Returns the number of names assigned by this pass.
pub fn mangle_variables(
    body: &mut [Token],
    names: &mut NameMap,
    generator: &mut NameGenerator<'_>,
) -> usize {
    let before = names.len();
    for token in body.iter_mut() {
        if let Some(name) = literal_name(token) {
            let code = names.code_for(name, generator);
            *token = format_smolstr!("/{code}");
        } else if let Some(code) = names.get(token).cloned() {
            *token = code;
        }
    }
    let assigned = names.len() - before;
    tracing::debug!(assigned, "mangled variables");
    assigned
}

/// One `/code { ... } binder` statement of the prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreludeEntry {
    pub code: Token,
    /// Procedure tokens, braces included.
    pub procedure: Vec<Token>,
    /// Tokens that bind the procedure to `code`.
    pub binder: Vec<Token>,
}

impl PreludeEntry {
    fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        std::iter::once(format_smolstr!("/{}", self.code))
            .chain(self.procedure.iter().cloned())
            .chain(self.binder.iter().cloned())
    }
}

/// Ordered definitions injected ahead of Body.
///
/// Each entry may only use codes defined by earlier entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prelude {
    entries: Vec<PreludeEntry>,
}

impl Prelude {
    /// Define `code` as the braced procedure `words`, bound with `binder`.
    pub fn define(&mut self, code: &Token, words: &[&str], binder: &[&str]) {
        let procedure = std::iter::once("{")
            .chain(words.iter().copied())
            .chain(std::iter::once("}"))
            .map(Token::new)
            .collect();
        self.entries.push(PreludeEntry {
            code: code.clone(),
            procedure,
            binder: binder.iter().copied().map(Token::new).collect(),
        });
    }

    /// Alias `code` to the built-in `operator`. The procedure stays a single
    /// `{operator}` token so later passes never mistake the operator name
    /// for a code.
    pub fn alias(&mut self, code: &Token, operator: &str, binddef: &Token) {
        self.entries.push(PreludeEntry {
            code: code.clone(),
            procedure: vec![format_smolstr!("{{{operator}}}")],
            binder: vec![binddef.clone()],
        });
    }

    pub fn entries(&self) -> &[PreludeEntry] {
        &self.entries
    }

    /// Operator aliases, after the binding combinators.
    pub fn aliases(&self) -> &[PreludeEntry] {
        self.entries.get(COMBINATORS..).unwrap_or_default()
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.entries.iter().flat_map(|entry| entry.tokens())
    }
}

/// Rename built-in operators and prepend the prelude that defines them.
///
/// Codes for `bind`, `def`, `binddef`, `exch` and `exchdef` are reserved
/// first, in that order. Any other all-alphabetic token that is not already
/// a code is taken to be an operator. Returns the prelude that was
/// prepended.
///
/// Fails with [`CompressError::ReservedName`], leaving `body` untouched, if
/// an earlier pass already gave one of the reserved operators a code.
pub fn mangle_defaults(
    body: &mut Vec<Token>,
    names: &mut NameMap,
    generator: &mut NameGenerator<'_>,
) -> Result<Prelude> {
    if let Some(name) = RESERVED.into_iter().find(|name| names.get(name).is_some()) {
        return Err(CompressError::ReservedName(name.to_string()));
    }

    let bind = names.assign("bind", generator);
    let def = names.assign("def", generator);
    let binddef = names.assign("binddef", generator);
    let exch = names.assign("exch", generator);
    let exchdef = names.assign("exchdef", generator);

    let mut prelude = Prelude::default();
    prelude.define(&bind, &["bind"], &["bind", "def"]);
    prelude.define(&def, &["def"], &[bind.as_str(), "def"]);
    prelude.define(&binddef, &[bind.as_str(), def.as_str()], &[bind.as_str(), def.as_str()]);
    prelude.define(&exch, &["exch"], &[binddef.as_str()]);
    prelude.define(&exchdef, &[exch.as_str(), def.as_str()], &[binddef.as_str()]);

    for token in body.iter_mut() {
        if TokenKind::of(token) != TokenKind::Word || names.is_code(token) {
            continue;
        }
        let code = match names.get(token).cloned() {
            Some(code) => code,
            None => {
                let code = names.assign(token, generator);
                prelude.alias(&code, token, &binddef);
                code
            }
        };
        *token = code;
    }

    tracing::debug!(
        operators = prelude.aliases().len(),
        prelude_tokens = prelude.tokens().count(),
        "mangled default operators"
    );
    body.splice(0..0, prelude.tokens());
    Ok(prelude)
}
