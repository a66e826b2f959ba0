//! Evaluation errors and warnings.

use miette::Diagnostic;
use semver::Version;
use thiserror::Error;

/// Errors that abort script evaluation.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum EvalError {
    /// A rule-only step appeared outside any rule body.
    #[error("`{operation}` must appear inside a rule body")]
    #[diagnostic(
        code(makegen::eval::no_current_rule),
        help("move the step into the `steps` list of a `rule`")
    )]
    NoCurrentRule {
        /// Name of the offending step.
        operation: &'static str,
    },

    /// A rule-declaring step appeared inside another rule's body.
    #[error("`{operation}` cannot be nested inside rule `{outer}`")]
    #[diagnostic(
        code(makegen::eval::nested_rule),
        help("declare the rule at the top level of `steps`")
    )]
    NestedRule {
        /// Name of the offending step.
        operation: &'static str,
        /// Rule whose body contained the step.
        outer: String,
    },

    /// The script targets a format version this build does not understand.
    #[error("unsupported makegen_version {found}; expected {supported}.x")]
    #[diagnostic(code(makegen::eval::unsupported_version))]
    UnsupportedVersion {
        /// Version declared by the script.
        found: Version,
        /// Supported major version.
        supported: u64,
    },
}

/// Non-fatal problems recorded on the model and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalWarning {
    /// A compile option mapping used a key no alias resolves.
    #[error("ignoring unknown compile option `{key}` in rule `{rule}`")]
    UnknownCompileOption {
        /// Rule holding the directive.
        rule: String,
        /// Key as written in the script.
        key: String,
    },
    /// A script-declared variable was declared again.
    #[error("variable `{key}` redefined")]
    VariableRedefined {
        /// Variable name.
        key: String,
    },
}
