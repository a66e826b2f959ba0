//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure. Scripts are positional; with
//! none given, a `Makefile.yml` in the working directory is used.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Default path of the generated Makefile.
pub const DEFAULT_OUTPUT: &str = "Makefile";

/// How several scripts populate the build model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScriptMode {
    /// All scripts populate one model, rendered once.
    #[default]
    Cumulative,
    /// Each script renders from a fresh model, overwriting the output.
    Independent,
}

/// Generate Makefiles from YAML build scripts.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Build scripts to evaluate, in order.
    #[arg(value_name = "SCRIPTS")]
    pub scripts: Vec<PathBuf>,

    /// Write the Makefile to this path; `-` writes to stdout.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Change to this directory before doing anything.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Whether several scripts share one model.
    #[arg(long, value_enum, default_value_t = ScriptMode::Cumulative)]
    pub mode: ScriptMode,

    /// Enable verbose logging output.
    #[arg(long)]
    pub verbose: bool,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: (),
}
