//! Keyword alias matching.
//!
//! Scripts may spell the same keyword several ways (`:input`, `:i` or
//! `input`). [`matches`] compares a token's canonical form against a fixed
//! alias set; the `dsl` options resolve their keywords through it once, at
//! the operation boundary.

use crate::token::Token;

/// Return `true` when `token` equals any accepted spelling in `aliases`.
///
/// Symbols are compared with their sigil, so `:i` and `i` are distinct
/// spellings.
///
/// ```rust
/// use makegen::{alias::matches, token::Token};
///
/// let aliases = [":input", ":i", "input"];
/// assert!(matches(&Token::parse(":i"), &aliases));
/// assert!(matches(&Token::parse("input"), &aliases));
/// assert!(!matches(&Token::parse("i"), &aliases));
/// ```
#[must_use]
pub fn matches(token: &Token, aliases: &[&str]) -> bool {
    let canonical = token.canonical();
    aliases.iter().any(|alias| *alias == canonical)
}
