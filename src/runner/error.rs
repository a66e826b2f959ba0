//! Error types for the runner module.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating scripts.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// A script named on the command line does not exist.
    #[error("build script {} not found", path.display())]
    #[diagnostic(
        code(makegen::runner::script_not_found),
        help("check the path, or pass -C to change the working directory")
    )]
    ScriptNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },
}
