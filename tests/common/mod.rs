//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This module
//! is included via `mod common;` in individual test files.

use anyhow::{Context, Result};
use makegen::{dsl, makefile_gen, manifest, model::BuildModel};
use std::path::PathBuf;

/// Path of a script under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Evaluate a fixture script against a fresh model and render it.
pub fn render_fixture(name: &str) -> Result<String> {
    let path = fixture_path(name);
    let script = manifest::from_path(&path)?;
    let mut model = BuildModel::new();
    dsl::evaluate(script, &mut model)
        .with_context(|| format!("evaluate {}", path.display()))?;
    Ok(makefile_gen::render(&model))
}
