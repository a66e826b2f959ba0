//! Keyword enums for DSL operations.
//!
//! Each operation accepts a handful of keyword spellings. They are resolved
//! here, once, into closed enums so the operations themselves only match on
//! variants.

use crate::alias::matches;
use crate::token::Token;

const INPUT: &[&str] = &[":input", ":i", "input"];
const OUTPUT: &[&str] = &[":output", ":o", "output"];
const COMPILER: &[&str] = &[":compiler", ":c", "compiler"];

const TO_OBJECT: &[&str] = &[":to_obj", ":obj", "-c"];
const TO_ASSEMBLY: &[&str] = &[":to_asm", ":asm", "-S"];
const DEBUG: &[&str] = &[":debug", "-g"];
const DEFAULT_OUTPUT: &[&str] = &[":out", ":o", ":$@", "$@"];

const SILENT: &[&str] = &[":silent"];
const SUPPRESS: &[&str] = &[":suppress"];

/// Target of the automatic `$@` output.
pub const DEFAULT_TARGET: &str = "$@";

/// Field named by a key in a compile option mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOption {
    /// Explicit input files.
    Input,
    /// Output file passed with `-o`.
    Output,
    /// Compiler replacing `$(CC)`.
    Compiler,
}

impl CompileOption {
    /// Resolve a mapping key, or `None` for unknown keys.
    #[must_use]
    pub fn resolve(key: &Token) -> Option<Self> {
        [
            (INPUT, Self::Input),
            (OUTPUT, Self::Output),
            (COMPILER, Self::Compiler),
        ]
        .into_iter()
        .find_map(|(aliases, option)| matches(key, aliases).then_some(option))
    }
}

/// Positional compile argument after shortcut resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileFlag {
    /// Stop after producing an object file (`-c`).
    Object,
    /// Stop after producing assembly (`-S`).
    Assembly,
    /// Emit debug information (`-g`).
    Debug,
    /// Write output to the rule target (`-o $@`).
    DefaultOutput,
    /// Any other flag, already expanded.
    Other(String),
}

impl CompileFlag {
    /// Resolve a positional compile token.
    #[must_use]
    pub fn resolve(token: &Token) -> Self {
        if matches(token, TO_OBJECT) {
            Self::Object
        } else if matches(token, TO_ASSEMBLY) {
            Self::Assembly
        } else if matches(token, DEBUG) {
            Self::Debug
        } else if matches(token, DEFAULT_OUTPUT) {
            Self::DefaultOutput
        } else {
            Self::Other(token.expand())
        }
    }

    /// Command-line flag contributed by shortcut variants.
    #[must_use]
    pub const fn shortcut(&self) -> Option<&'static str> {
        match self {
            Self::Object => Some("-c"),
            Self::Assembly => Some("-S"),
            Self::Debug => Some("-g"),
            Self::DefaultOutput | Self::Other(_) => None,
        }
    }
}

/// Recipe-line prefix requested by a shell argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellModifier {
    /// Do not echo the command (`@`).
    Silent,
    /// Ignore the command's exit status (`-`).
    Suppress,
}

impl ShellModifier {
    /// Resolve a shell argument, or `None` when it is command text.
    #[must_use]
    pub fn resolve(token: &Token) -> Option<Self> {
        if matches(token, SILENT) {
            Some(Self::Silent)
        } else if matches(token, SUPPRESS) {
            Some(Self::Suppress)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(":input", Some(CompileOption::Input))]
    #[case(":i", Some(CompileOption::Input))]
    #[case("input", Some(CompileOption::Input))]
    #[case("output", Some(CompileOption::Output))]
    #[case(":o", Some(CompileOption::Output))]
    #[case(":c", Some(CompileOption::Compiler))]
    #[case("compiler", Some(CompileOption::Compiler))]
    #[case("i", None)]
    #[case("source", None)]
    fn resolves_compile_options(#[case] key: &str, #[case] expected: Option<CompileOption>) {
        assert_eq!(CompileOption::resolve(&Token::parse(key)), expected);
    }

    #[rstest]
    #[case(":to_obj", CompileFlag::Object)]
    #[case("-c", CompileFlag::Object)]
    #[case(":asm", CompileFlag::Assembly)]
    #[case(":debug", CompileFlag::Debug)]
    #[case("$@", CompileFlag::DefaultOutput)]
    #[case(":o", CompileFlag::DefaultOutput)]
    #[case(":RL_FLAG", CompileFlag::Other("$(RL_FLAG)".into()))]
    #[case("-O2", CompileFlag::Other("-O2".into()))]
    fn resolves_compile_flags(#[case] text: &str, #[case] expected: CompileFlag) {
        assert_eq!(CompileFlag::resolve(&Token::parse(text)), expected);
    }

    #[rstest]
    fn shell_modifiers_require_symbols() {
        assert_eq!(
            ShellModifier::resolve(&Token::parse(":silent")),
            Some(ShellModifier::Silent)
        );
        assert_eq!(
            ShellModifier::resolve(&Token::parse(":suppress")),
            Some(ShellModifier::Suppress)
        );
        assert_eq!(ShellModifier::resolve(&Token::parse("silent")), None);
    }
}
