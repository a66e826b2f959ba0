//! Build script loading.
//!
//! A script is parsed as YAML into a [`serde_json::Value`] first and then
//! deserialised into the typed [`Script`]. Syntax errors and schema
//! mismatches both surface as [`ManifestError::Parse`] diagnostics carrying
//! the script name.

use crate::ast::Script;
use anyhow::{Context, Result};
use std::{fs, path::Path};

mod diagnostics;
mod hints;

pub use diagnostics::{ManifestError, ScriptName, ScriptSource, map_data_error, map_yaml_error};

/// Name used for scripts parsed from memory.
pub const DEFAULT_SCRIPT_NAME: &str = "Makefile.yml";

/// Parse `yaml` and report errors against `name`.
///
/// # Errors
///
/// Returns [`ManifestError::Parse`] when the text is not valid YAML or does
/// not match the script schema.
pub fn from_str_named(yaml: &str, name: &ScriptName) -> Result<Script> {
    let doc: serde_json::Value =
        serde_saphyr::from_str(yaml).map_err(|e| ManifestError::Parse {
            source: map_yaml_error(e, &ScriptSource::from(yaml), name),
        })?;
    let script = serde_json::from_value(doc).map_err(|e| ManifestError::Parse {
        source: map_data_error(e, name),
    })?;
    Ok(script)
}

/// Parse a build script held in memory.
///
/// # Errors
///
/// Returns an error if the YAML fails to parse or has the wrong shape.
pub fn from_str(yaml: &str) -> Result<Script> {
    from_str_named(yaml, &ScriptName::new(DEFAULT_SCRIPT_NAME))
}

/// Load a [`Script`] from the given file path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML fails to parse.
pub fn from_path(path: impl AsRef<Path>) -> Result<Script> {
    let path_ref = path.as_ref();
    let data = fs::read_to_string(path_ref)
        .with_context(|| format!("failed to read {}", path_ref.display()))?;
    let name = ScriptName::new(path_ref.display().to_string());
    from_str_named(&data, &name)
}
