//! Script interpretation.
//!
//! Walks the steps of a parsed [`Script`] in textual order and applies the
//! matching DSL operation. Rule bodies run against the [`RuleScope`] of the
//! rule being declared.

use super::{EvalError, RuleScope};
use crate::ast::{RuleDecl, Script, Step};
use crate::model::{BuildModel, VarValue};
use crate::token::Token;
use indexmap::IndexMap;
use semver::Version;
use tracing::debug;

/// Major script format version understood by this build.
pub const SUPPORTED_MAJOR_VERSION: u64 = 1;

/// Apply every step of `script` to `model`.
///
/// # Errors
///
/// Returns [`EvalError::UnsupportedVersion`] for scripts targeting another
/// major version, [`EvalError::NoCurrentRule`] when a rule-only step appears
/// at the top level and [`EvalError::NestedRule`] when a rule is declared
/// inside another rule's body.
pub fn evaluate(script: Script, model: &mut BuildModel) -> Result<(), EvalError> {
    check_version(&script.makegen_version)?;
    debug!(steps = script.steps.len(), "evaluate script");
    script
        .steps
        .into_iter()
        .try_for_each(|step| top_level(step, model))
}

fn check_version(version: &Version) -> Result<(), EvalError> {
    if version.major == SUPPORTED_MAJOR_VERSION {
        Ok(())
    } else {
        Err(EvalError::UnsupportedVersion {
            found: version.clone(),
            supported: SUPPORTED_MAJOR_VERSION,
        })
    }
}

fn top_level(step: Step, model: &mut BuildModel) -> Result<(), EvalError> {
    match step {
        Step::Comment(texts) => model.comment(texts.into_iter().map(|text| text.plain())),
        Step::Vars(vars) => model.declare_variables(variables(vars)),
        Step::Rule(decl) => declare_rule(decl, model)?,
        Step::Clean(targets) => model.clean(targets),
        Step::Suffix(decl) => {
            let (target, source, command) = decl.parts();
            model.suffix(target, source, command);
        }
        Step::Depend(_) | Step::Compile(_) | Step::Shell(_) | Step::Echo(_) => {
            return Err(EvalError::NoCurrentRule {
                operation: step.keyword(),
            });
        }
    }
    Ok(())
}

fn declare_rule(decl: RuleDecl, model: &mut BuildModel) -> Result<(), EvalError> {
    let RuleDecl { name, deps, steps } = decl;
    model.open_rule(name.plain(), deps, |scope| {
        steps.into_iter().try_for_each(|step| in_rule(step, scope))
    })
}

fn in_rule(step: Step, scope: &mut RuleScope<'_>) -> Result<(), EvalError> {
    match step {
        Step::Comment(texts) => scope.comment(texts.into_iter().map(|text| text.plain())),
        Step::Vars(vars) => {
            for (key, value) in variables(vars) {
                scope.declare_variable(key, value);
            }
        }
        Step::Depend(tokens) => scope.depend(tokens),
        Step::Compile(args) => scope.compile(args),
        Step::Shell(args) => scope.shell(args),
        Step::Echo(tokens) => scope.echo(tokens),
        Step::Rule(_) | Step::Clean(_) | Step::Suffix(_) => {
            return Err(EvalError::NestedRule {
                operation: step.keyword(),
                outer: scope.name().to_owned(),
            });
        }
    }
    Ok(())
}

/// Keys may be written as symbols (`:CC`); the sigil is dropped.
fn variables(vars: IndexMap<String, Token>) -> impl Iterator<Item = (String, VarValue)> {
    vars.into_iter()
        .map(|(key, value)| (Token::parse(&key).plain(), VarValue::from(value)))
}
