//! Build script Abstract Syntax Tree structures.
//!
//! These types mirror the YAML schema of a `Makefile.yml` script. Scripts
//! are parsed by [`crate::manifest`] and interpreted step by step by
//! [`crate::dsl::evaluate`].
//!
//! ```rust
//! use makegen::ast::Step;
//!
//! let yaml = "makegen_version: \"1.0.0\"\nsteps:\n  - clean: \"*.o\"";
//! let script = makegen::manifest::from_str(yaml).expect("parse");
//! assert!(matches!(script.steps.first(), Some(Step::Clean(_))));
//! ```

use crate::token::Token;
use indexmap::IndexMap;
use semver::Version;
use serde::Deserialize;

/// Top-level structure of a build script.
///
/// ```yaml
/// makegen_version: "1.0.0"
/// steps:
///   - vars: { CFLAGS: -Wall }
///   - rule:
///       name: main
///       deps: [main.c, util.h]
///       steps:
///         - compile: [":debug", { output: main }]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Semantic version of the script format.
    pub makegen_version: Version,

    /// Operations evaluated in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One DSL operation.
///
/// Written as a single-key mapping whose key names the operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Comments, top-level or above the current rule.
    Comment(OneOrMany<Token>),
    /// Variable declarations in mapping order.
    Vars(IndexMap<String, Token>),
    /// Declare and populate a rule.
    Rule(RuleDecl),
    /// Dependencies of the current rule.
    #[serde(alias = "depends", alias = "d")]
    Depend(OneOrMany<Option<Token>>),
    /// A compilation directive on the current rule.
    Compile(OneOrMany<CompileArg>),
    /// A shell command on the current rule.
    #[serde(alias = "command")]
    Shell(OneOrMany<Token>),
    /// A silent `echo` on the current rule.
    Echo(OneOrMany<Token>),
    /// The `clean` rule and its targets.
    Clean(OneOrMany<Token>),
    /// A suffix pair and its implicit rule.
    Suffix(SuffixDecl),
}

impl Step {
    /// Keyword naming the step in scripts and diagnostics.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Comment(_) => "comment",
            Self::Vars(_) => "vars",
            Self::Rule(_) => "rule",
            Self::Depend(_) => "depend",
            Self::Compile(_) => "compile",
            Self::Shell(_) => "shell",
            Self::Echo(_) => "echo",
            Self::Clean(_) => "clean",
            Self::Suffix(_) => "suffix",
        }
    }
}

/// Declaration of a named rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDecl {
    /// Target name. Symbols name the target directly (`:all` → `all`);
    /// write `$(VAR)` for a macro target.
    pub name: Token,

    /// Dependencies recorded before the body runs. `null` entries are
    /// skipped.
    #[serde(default, alias = "depend", alias = "depends", alias = "d")]
    pub deps: OneOrMany<Option<Token>>,

    /// Body evaluated with this rule as the current rule.
    #[serde(default, alias = "do")]
    pub steps: Vec<Step>,
}

/// Declaration of a suffix pair.
///
/// ```yaml
/// suffix: { target: .o, source: .c, command: "gcc -c $< -o $@" }
/// # or positionally
/// suffix: [.o, .c, "gcc -c $< -o $@"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SuffixDecl {
    /// Named fields.
    Fields {
        /// Suffix of produced files.
        target: String,
        /// Suffix of consumed files.
        source: String,
        /// Command bound to the implicit rule.
        command: String,
    },
    /// `[target, source, command]`.
    Positional(String, String, String),
}

impl SuffixDecl {
    /// Split into `(target, source, command)`.
    #[must_use]
    pub fn parts(&self) -> (&str, &str, &str) {
        match self {
            Self::Fields {
                target,
                source,
                command,
            }
            | Self::Positional(target, source, command) => (target, source, command),
        }
    }
}

/// One positional argument of a compilation directive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompileArg {
    /// Keyed fields such as `input`, `output` and `compiler`.
    Options(IndexMap<String, Token>),
    /// A flag or flag shortcut.
    Flag(Token),
}

impl From<Token> for CompileArg {
    fn from(token: Token) -> Self {
        Self::Flag(token)
    }
}

/// A field accepting either a single value or a list of values.
///
/// `null` and a missing field both deserialise to `OneOrMany::Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// No value provided.
    Empty,
    /// A list of values.
    Many(Vec<T>),
    /// A single value.
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> OneOrMany<T> {
    /// Borrow the values in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Empty => &[],
            Self::Many(items) => items,
            Self::One(item) => std::slice::from_ref(item),
        }
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::Empty => Vec::new().into_iter(),
            Self::Many(items) => items.into_iter(),
            Self::One(item) => vec![item].into_iter(),
        }
    }
}
