//! Script tokens and their expansion into Makefile syntax.
//!
//! A [`Token`] is the smallest value a build script can pass to a DSL
//! operation. Symbolic references become Makefile macros, literals pass
//! through untouched and lists expand element by element:
//!
//! ```rust
//! use makegen::token::Token;
//!
//! assert_eq!(Token::parse(":OFILES").expand(), "$(OFILES)");
//! assert_eq!(Token::parse("main.c").expand(), "main.c");
//! let list = Token::List(vec![Token::parse(":CC"), Token::parse("-Wall")]);
//! assert_eq!(list.expand(), "$(CC) -Wall");
//! ```

use itertools::Itertools;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use std::fmt;

/// Leading character marking a symbolic reference in script text.
pub const SYMBOL_SIGIL: char = ':';

/// A single DSL token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare reference to a variable, stored without the leading sigil. The
    /// name may carry namespace qualifiers separated by `:`.
    Symbol(String),
    /// Text used verbatim.
    Literal(String),
    /// Ordered sequence of tokens.
    List(Vec<Token>),
}

impl Token {
    /// Classify script text as a symbol or a literal.
    ///
    /// Text is symbolic when it starts with `:`, has at least one character
    /// after the sigil and contains no whitespace.
    ///
    /// ```rust
    /// use makegen::token::Token;
    /// assert_eq!(Token::parse(":CC"), Token::Symbol("CC".into()));
    /// assert_eq!(Token::parse(": x"), Token::Literal(": x".into()));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix(SYMBOL_SIGIL) {
            Some(name) if !name.is_empty() && !name.chars().any(char::is_whitespace) => {
                Self::Symbol(name.to_owned())
            }
            _ => Self::Literal(text.to_owned()),
        }
    }

    /// Build a symbolic token from a bare name.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Build a literal token.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Expand the token into Makefile text.
    #[must_use]
    pub fn expand(&self) -> String {
        match self {
            Self::Symbol(name) => format!("$({})", local_name(name)),
            Self::Literal(text) => text.clone(),
            Self::List(items) => items.iter().map(Self::expand).join(" "),
        }
    }

    /// Bare text form, used where a symbol names something rather than
    /// referencing a macro (rule names, comments, variable keys).
    #[must_use]
    pub fn plain(&self) -> String {
        match self {
            Self::Symbol(name) | Self::Literal(name) => name.clone(),
            Self::List(items) => items.iter().map(Self::plain).join(" "),
        }
    }

    /// Form compared against keyword aliases: symbols keep their sigil.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Symbol(name) => format!("{SYMBOL_SIGIL}{name}"),
            Self::Literal(text) => text.clone(),
            Self::List(items) => items.iter().map(Self::canonical).join(" "),
        }
    }

    /// Iterate over the non-list tokens, flattening nested lists depth-first.
    #[must_use]
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        match self {
            Self::List(items) => Box::new(items.iter().flat_map(Self::leaves)),
            leaf => Box::new(std::iter::once(leaf)),
        }
    }
}

/// Strip namespace qualifiers, keeping the segment after the last `:`.
///
/// ```rust
/// use makegen::token::local_name;
/// assert_eq!(local_name("build:CC"), "CC");
/// assert_eq!(local_name("CC"), "CC");
/// ```
#[must_use]
pub fn local_name(name: &str) -> &str {
    name.rsplit(SYMBOL_SIGIL).next().unwrap_or(name)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expand())
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Token {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

struct TokenVisitor;

impl<'de> Visitor<'de> for TokenVisitor {
    type Value = Token;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, integer, boolean, null or list of tokens")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Token, E> {
        Ok(Token::parse(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Token, E> {
        Ok(Token::Literal(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Token, E> {
        Ok(Token::Literal(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Token, E> {
        Ok(Token::Literal(v.to_string()))
    }

    /// YAML has already rounded the value, so `1.10` would come back as
    /// `1.1`. Decimals must be quoted to keep their text.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Token, E> {
        Err(E::custom(format!(
            "decimal value {v} must be quoted to keep its digits, e.g. \"{v}\""
        )))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Token, E> {
        Ok(Token::Literal(String::new()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Token, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Token::List(items))
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenVisitor)
    }
}
