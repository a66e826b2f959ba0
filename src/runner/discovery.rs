//! Script path resolution.
//!
//! Named scripts are resolved against `-C/--directory`. Without names, the
//! working directory is searched for a `Makefile.yml` in any letter case.

use super::RunnerError;
use crate::cli::Cli;
use anyhow::{Context, Result, anyhow};
use camino::Utf8Path;
use glob::{MatchOptions, Pattern};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pattern matched case-insensitively when no script is named.
pub const DEFAULT_SCRIPT_PATTERN: &str = "makefile.y*ml";

const SCRIPT_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Resolve `path` relative to the CLI working directory.
#[must_use]
pub(super) fn resolve_path<'a>(cli: &Cli, path: &'a Path) -> Cow<'a, Path> {
    if path.is_relative() {
        cli.directory
            .as_ref()
            .map_or_else(|| Cow::Borrowed(path), |dir| Cow::Owned(dir.join(path)))
    } else {
        Cow::Borrowed(path)
    }
}

/// Scripts to evaluate, in order. Empty when none were named and none was
/// discovered.
///
/// # Errors
///
/// Returns [`RunnerError::ScriptNotFound`] when a named script is missing,
/// or an error when the discovery pattern cannot be built.
pub(super) fn scripts(cli: &Cli) -> Result<Vec<PathBuf>> {
    if cli.scripts.is_empty() {
        let base = cli.directory.as_deref().unwrap_or_else(|| Path::new("."));
        return Ok(discover(base)?.into_iter().collect());
    }
    cli.scripts
        .iter()
        .map(|script| {
            let path = resolve_path(cli, script).into_owned();
            if path.is_file() {
                Ok(path)
            } else {
                Err(RunnerError::ScriptNotFound { path }.into())
            }
        })
        .collect()
}

/// First file in `dir` named like `Makefile.yml` or `makefile.YAML`.
///
/// # Errors
///
/// Returns an error if `dir` is not valid UTF-8.
pub fn discover(dir: &Path) -> Result<Option<PathBuf>> {
    let base = Utf8Path::from_path(dir)
        .ok_or_else(|| anyhow!("directory {} is not valid UTF-8", dir.display()))?;
    let pattern = format!("{}/{DEFAULT_SCRIPT_PATTERN}", Pattern::escape(base.as_str()));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::default()
    };
    let found = glob::glob_with(&pattern, options)
        .with_context(|| format!("invalid script pattern {pattern}"))?
        .filter_map(Result::ok)
        .find(|path| path.is_file() && has_script_extension(path));
    debug!(pattern = %pattern, found = ?found, "discover script");
    Ok(found)
}

fn has_script_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SCRIPT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
