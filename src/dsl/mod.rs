//! Builder operations that populate a [`BuildModel`].
//!
//! Model-level operations (variables, top-level comments, rule declarations)
//! are methods on [`BuildModel`]. Operations that need a current rule live on
//! [`RuleScope`], which [`BuildModel::open_rule`] hands to the population
//! closure. The scope exposes no way to open another rule, so nested rule
//! declarations cannot be expressed.
//!
//! ```
//! use makegen::{dsl::CompileArg, model::BuildModel, token::Token};
//!
//! let mut model = BuildModel::new();
//! model
//!     .open_rule("main", [Token::literal("main.c")], |rule| {
//!         rule.compile([CompileArg::Flag(Token::parse(":debug"))]);
//!         Ok(())
//!     })
//!     .expect("populate rule");
//! let rule = model.rule("main").expect("rule");
//! assert_eq!(rule.compilations[0].input, "main.c");
//! ```

mod error;
mod interpret;
mod options;

pub use crate::ast::CompileArg;
pub use error::{EvalError, EvalWarning};
pub use interpret::{SUPPORTED_MAJOR_VERSION, evaluate};
pub use options::{CompileFlag, CompileOption, DEFAULT_TARGET, ShellModifier};

use crate::model::{BuildModel, Compilation, Origin, Rule, SuffixPair, VarValue, Variables};
use crate::token::Token;
use itertools::Itertools;
use tracing::{debug, warn};

/// Compiler used when a directive does not name one.
pub const DEFAULT_COMPILER: &str = "$(CC)";
/// Name of the rule created by [`BuildModel::clean`].
pub const CLEAN_RULE: &str = "clean";

fn record_warning(warnings: &mut Vec<EvalWarning>, warning: EvalWarning) {
    warn!("{warning}");
    warnings.push(warning);
}

fn declare(
    variables: &mut Variables,
    warnings: &mut Vec<EvalWarning>,
    key: String,
    value: VarValue,
) {
    debug!(key = %key, "declare variable");
    let previous = variables.insert(key.clone(), value, Origin::Declared);
    if previous.is_some_and(|var| var.origin == Origin::Declared) {
        record_warning(warnings, EvalWarning::VariableRedefined { key });
    }
}

impl BuildModel {
    /// Bind a global variable, replacing any earlier value.
    ///
    /// Replacing a seeded default is silent; replacing a value the script
    /// declared earlier records [`EvalWarning::VariableRedefined`].
    pub fn declare_variable(&mut self, key: impl Into<String>, value: impl Into<VarValue>) {
        declare(
            &mut self.variables,
            &mut self.warnings,
            key.into(),
            value.into(),
        );
    }

    /// Bind several variables in order.
    pub fn declare_variables<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<VarValue>,
    {
        for (key, value) in pairs {
            self.declare_variable(key, value);
        }
    }

    /// Append top-level comments.
    pub fn comment<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments.extend(texts.into_iter().map(Into::<String>::into));
    }

    /// Declare a rule and populate it through `populate`.
    ///
    /// `dependencies` are recorded before `populate` runs, so compilation
    /// directives added by the closure see them. The rule is appended to
    /// the model once the closure returns successfully.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `populate`; the rule is discarded.
    pub fn open_rule<I, T, F>(
        &mut self,
        name: impl Into<String>,
        dependencies: I,
        populate: F,
    ) -> Result<(), EvalError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Token>>,
        F: FnOnce(&mut RuleScope<'_>) -> Result<(), EvalError>,
    {
        let (rule, outcome) = self.scoped(name.into(), |scope| {
            scope.depend(dependencies);
            populate(scope)
        });
        outcome?;
        self.rules.push(rule);
        Ok(())
    }

    /// Declare the `clean` rule removing each target with `-rm -rf`.
    pub fn clean<I>(&mut self, targets: I)
    where
        I: IntoIterator<Item = Token>,
    {
        let (rule, ()) = self.scoped(CLEAN_RULE.to_owned(), |scope| {
            for target in targets {
                scope.shell([Token::Literal(format!("-rm -rf {}", target.expand()))]);
            }
        });
        self.rules.push(rule);
    }

    /// Declare a suffix pair and the implicit rule converting `source` files
    /// into `target` files with `command`.
    pub fn suffix(
        &mut self,
        target: impl Into<String>,
        source: impl Into<String>,
        command: impl Into<String>,
    ) {
        let pair = SuffixPair {
            target: target.into(),
            source: source.into(),
        };
        let name = pair.rule_name();
        self.suffixes.push(pair);
        let command = Token::Literal(command.into());
        let (rule, ()) = self.scoped(name, |scope| scope.shell([command]));
        self.rules.push(rule);
    }

    fn scoped<R>(
        &mut self,
        name: String,
        populate: impl FnOnce(&mut RuleScope<'_>) -> R,
    ) -> (Rule, R) {
        let mut rule = Rule::new(name);
        debug!(rule = %rule.name, "open rule");
        let outcome = populate(&mut RuleScope {
            rule: &mut rule,
            variables: &mut self.variables,
            warnings: &mut self.warnings,
        });
        (rule, outcome)
    }
}

/// The rule currently being populated.
///
/// Variables declared through the scope remain global.
pub struct RuleScope<'m> {
    rule: &'m mut Rule,
    variables: &'m mut Variables,
    warnings: &'m mut Vec<EvalWarning>,
}

impl RuleScope<'_> {
    /// Name of the rule being populated.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.rule.name
    }

    /// Record dependencies, skipping `None` and flattening lists.
    pub fn depend<I, T>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Token>>,
    {
        for token in tokens.into_iter().filter_map(Into::<Option<Token>>::into) {
            self.rule
                .dependencies
                .extend(token.leaves().map(Token::expand));
        }
    }

    /// Append comments rendered above this rule.
    pub fn comment<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule.comments.extend(texts.into_iter().map(Into::<String>::into));
    }

    /// Bind a global variable from inside a rule body.
    pub fn declare_variable(&mut self, key: impl Into<String>, value: impl Into<VarValue>) {
        declare(self.variables, self.warnings, key.into(), value.into());
    }

    /// Add a compilation directive.
    ///
    /// Without an explicit input, the input is derived from the dependencies
    /// recorded so far, excluding header files.
    pub fn compile<I>(&mut self, args: I)
    where
        I: IntoIterator<Item = CompileArg>,
    {
        let mut compiler = DEFAULT_COMPILER.to_owned();
        let mut flags = Vec::new();
        let mut input = None;
        let mut output = String::new();

        for arg in args {
            match arg {
                CompileArg::Options(options) => {
                    for (key, value) in options {
                        match CompileOption::resolve(&Token::parse(&key)) {
                            Some(CompileOption::Input) => input = Some(value.expand()),
                            Some(CompileOption::Output) => output = value.expand(),
                            Some(CompileOption::Compiler) => compiler = value.expand(),
                            None => record_warning(
                                self.warnings,
                                EvalWarning::UnknownCompileOption {
                                    rule: self.rule.name.clone(),
                                    key,
                                },
                            ),
                        }
                    }
                }
                CompileArg::Flag(token) => match CompileFlag::resolve(&token) {
                    CompileFlag::DefaultOutput => output = DEFAULT_TARGET.to_owned(),
                    CompileFlag::Other(text) => flags.push(text),
                    shortcut => flags.extend(shortcut.shortcut().map(str::to_owned)),
                },
            }
        }

        let input = input.unwrap_or_else(|| self.rule.derived_input());
        let output = if output.is_empty() {
            output
        } else {
            format!("-o {output}")
        };
        self.rule.compilations.push(Compilation {
            compiler,
            flags,
            input,
            output,
        });
    }

    /// Add one shell command built from `args`.
    ///
    /// Modifier symbols add recipe prefixes; every other token is expanded
    /// and concatenated. The prefixes always appear as `@-`.
    pub fn shell<I>(&mut self, args: I)
    where
        I: IntoIterator<Item = Token>,
    {
        let mut silent = false;
        let mut suppress = false;
        let mut text = String::new();
        for arg in args {
            match ShellModifier::resolve(&arg) {
                Some(ShellModifier::Silent) => silent = true,
                Some(ShellModifier::Suppress) => suppress = true,
                None => text.push_str(&arg.expand()),
            }
        }
        let mut command = String::with_capacity(text.len() + 2);
        if silent {
            command.push('@');
        }
        if suppress {
            command.push('-');
        }
        command.push_str(&text);
        self.rule.shells.push(command);
    }

    /// Add a silent `echo` of the expanded tokens.
    pub fn echo<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Token>,
    {
        let message = tokens.into_iter().map(|token| token.expand()).join(" ");
        self.shell([Token::Literal(format!("@echo '{message}'"))]);
    }
}
