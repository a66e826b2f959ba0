//! Makefile writing helpers.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Return `true` when `path` is the CLI sentinel indicating "write to stdout".
#[must_use]
pub fn is_stdout_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Write `content` to `path`, replacing any existing file atomically.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written or moved into place.
pub fn write_makefile(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create directory {}", parent.display()))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(content.as_bytes())
        .context("failed to write temporary Makefile")?;
    tmp.flush().context("failed to flush temporary Makefile")?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote Makefile to {}", path.display());
    Ok(())
}

fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

fn ignoring_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}

/// Write `content` to standard output, tolerating a closed pipe.
///
/// # Errors
///
/// Returns an error if writing to stdout fails for any other reason.
pub fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    ignoring_broken_pipe(stdout.write_all(content.as_bytes()))
        .context("failed to write Makefile to stdout")?;
    ignoring_broken_pipe(stdout.flush()).context("failed to flush stdout")?;
    Ok(())
}
