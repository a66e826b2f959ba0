//! Build model entities.
//!
//! A [`BuildModel`] is created once per evaluation, populated by the `dsl`
//! operations and handed to [`crate::makefile_gen::render`]. It mirrors the
//! shape of a Makefile without embedding any Makefile syntax beyond the
//! already-expanded strings stored in each [`Rule`].
//!
//! ```
//! use makegen::model::{BuildModel, VarValue};
//!
//! let model = BuildModel::new();
//! assert_eq!(model.variables.get("CC").map(VarValue::render).as_deref(), Some("gcc"));
//! assert!(model.rules.is_empty());
//! ```

use crate::dsl::EvalWarning;
use crate::token::Token;
use indexmap::IndexMap;
use itertools::Itertools;

/// Suffix identifying header files, which never become compilation inputs.
pub const HEADER_SUFFIX: &str = ".h";

/// Value bound to a Makefile variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    /// A single pre-expanded string.
    Text(String),
    /// Tokens expanded and space-joined at render time.
    Tokens(Vec<Token>),
}

impl VarValue {
    /// Text written after `KEY = `.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Tokens(tokens) => tokens.iter().map(Token::expand).join(" "),
        }
    }
}

impl From<Token> for VarValue {
    fn from(token: Token) -> Self {
        match token {
            Token::List(items) => Self::Tokens(items),
            Token::Literal(text) => Self::Text(text),
            symbol @ Token::Symbol(_) => Self::Text(symbol.expand()),
        }
    }
}

impl From<&str> for VarValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<Token>> for VarValue {
    fn from(tokens: Vec<Token>) -> Self {
        Self::Tokens(tokens)
    }
}

/// Where a variable binding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Seeded into every fresh model.
    Default,
    /// Declared by the script.
    Declared,
}

/// A variable binding and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Bound value.
    pub value: VarValue,
    /// Whether the binding is a seed default or a script declaration.
    pub origin: Origin,
}

/// Insertion-ordered variable table. Redefining a key keeps its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(IndexMap<String, Variable>);

impl Variables {
    /// Bind `key`, returning the previous binding if one existed.
    pub fn insert(&mut self, key: String, value: VarValue, origin: Origin) -> Option<Variable> {
        self.0.insert(key, Variable { value, origin })
    }

    /// Look up the value bound to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&VarValue> {
        self.0.get(key).map(|var| &var.value)
    }

    /// Iterate over bindings in first-insertion order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
        self.0.iter().map(|(key, var)| (key.as_str(), &var.value))
    }
}

/// One recipe line invoking a compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// Compiler invocation, `$(CC)` unless overridden.
    pub compiler: String,
    /// Extra flags in declaration order.
    pub flags: Vec<String>,
    /// Space-separated input files.
    pub input: String,
    /// Empty, or an `-o <target>` fragment.
    pub output: String,
}

/// A `.SUFFIXES` entry: target suffix then source suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixPair {
    /// Suffix of the produced file, e.g. `.o`.
    pub target: String,
    /// Suffix of the consumed file, e.g. `.c`.
    pub source: String,
}

impl SuffixPair {
    /// Name of the implicit rule bound to this pair (`source` then `target`).
    #[must_use]
    pub fn rule_name(&self) -> String {
        format!("{}{}", self.source, self.target)
    }
}

/// A named target with its dependencies and recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    /// Target name, possibly containing a macro reference.
    pub name: String,
    /// Comments rendered above the rule header.
    pub comments: Vec<String>,
    /// Expanded dependency strings.
    pub dependencies: Vec<String>,
    /// Compilation directives in declaration order.
    pub compilations: Vec<Compilation>,
    /// Literal shell commands in declaration order.
    pub shells: Vec<String>,
}

impl Rule {
    /// Create an empty rule.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Dependencies recorded so far that are not header files, space-joined.
    #[must_use]
    pub fn derived_input(&self) -> String {
        self.dependencies
            .iter()
            .filter(|dep| !dep.ends_with(HEADER_SUFFIX))
            .join(" ")
    }
}

/// Everything needed to render one Makefile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildModel {
    /// Comments written at the top of the file.
    pub comments: Vec<String>,
    /// Global variables.
    pub variables: Variables,
    /// Declared suffix pairs.
    pub suffixes: Vec<SuffixPair>,
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
    /// Non-fatal problems found while populating the model.
    pub warnings: Vec<EvalWarning>,
}

impl BuildModel {
    /// Create a model seeded with `CC = gcc` and an empty `FLAGS`.
    #[must_use]
    pub fn new() -> Self {
        let mut variables = Variables::default();
        variables.insert("CC".to_owned(), VarValue::from("gcc"), Origin::Default);
        variables.insert("FLAGS".to_owned(), VarValue::from(""), Origin::Default);
        Self {
            comments: Vec::new(),
            variables,
            suffixes: Vec::new(),
            rules: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Look up a rule by name, returning the first declared match.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

impl Default for BuildModel {
    fn default() -> Self {
        Self::new()
    }
}
