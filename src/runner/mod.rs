//! CLI execution.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! locates scripts, evaluates them into a [`BuildModel`] and writes the
//! rendered Makefile.

mod discovery;
mod error;
mod output;

pub use discovery::{DEFAULT_SCRIPT_PATTERN, discover};
pub use error::RunnerError;
pub use output::{is_stdout_path, write_makefile, write_stdout};

use crate::cli::{Cli, ScriptMode};
use crate::model::BuildModel;
use crate::{dsl, makefile_gen, manifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Execute the parsed [`Cli`].
///
/// # Errors
///
/// Returns an error if a named script is missing, a script fails to parse or
/// evaluate, or the Makefile cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let scripts = discovery::scripts(cli)?;
    if scripts.is_empty() {
        warn!("no Makefile.yml found");
        return Ok(());
    }
    match cli.mode {
        ScriptMode::Cumulative => {
            let model = build_model(&scripts)?;
            emit(cli, &model)
        }
        ScriptMode::Independent => scripts.iter().try_for_each(|script| {
            let model = build_model(std::slice::from_ref(script))?;
            emit(cli, &model)
        }),
    }
}

/// Evaluate `scripts` in order against one fresh model.
///
/// # Errors
///
/// Returns an error if any script cannot be read, parsed or evaluated.
pub fn build_model(scripts: &[PathBuf]) -> Result<BuildModel> {
    let mut model = BuildModel::new();
    for script in scripts {
        evaluate_path(script, &mut model)?;
    }
    if !model.warnings.is_empty() {
        debug!(count = model.warnings.len(), "evaluation produced warnings");
    }
    Ok(model)
}

fn evaluate_path(path: &Path, model: &mut BuildModel) -> Result<()> {
    debug!(script = %path.display(), "evaluate");
    let script = manifest::from_path(path)?;
    dsl::evaluate(script, model)
        .with_context(|| format!("failed to evaluate {}", path.display()))
}

fn emit(cli: &Cli, model: &BuildModel) -> Result<()> {
    let text = makefile_gen::render(model);
    if is_stdout_path(&cli.output) {
        write_stdout(&text)
    } else {
        let path = discovery::resolve_path(cli, &cli.output);
        write_makefile(&path, &text)
    }
}

#[cfg(test)]
mod tests;
