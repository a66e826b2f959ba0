//! Unit tests for script discovery and the run modes.

use super::*;
use anyhow::{Result, ensure};
use clap::Parser;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const FIRST: &str = "makegen_version: \"1.0.0\"\nsteps:\n  - vars: { A: one }\n";
const SECOND: &str = "makegen_version: \"1.0.0\"\nsteps:\n  - clean: \"*.o\"\n";

fn cli_in(dir: &TempDir, args: &[&str]) -> Cli {
    let base = dir.path().to_string_lossy().into_owned();
    let mut argv = vec!["makegen".to_owned(), "-C".to_owned(), base];
    argv.extend(args.iter().map(|arg| (*arg).to_owned()));
    Cli::try_parse_from(argv).expect("parse CLI")
}

fn write(dir: &TempDir, name: &str, content: &str) -> Result<()> {
    fs::write(dir.path().join(name), content)?;
    Ok(())
}

#[rstest]
#[case(None, "Makefile", "Makefile")]
#[case(Some("work"), "Makefile", "work/Makefile")]
#[case(Some("work"), "/tmp/Makefile", "/tmp/Makefile")]
fn resolve_path_respects_directory(
    #[case] directory: Option<&str>,
    #[case] input: &str,
    #[case] expected: &str,
) {
    let mut argv = vec!["makegen"];
    if let Some(dir) = directory {
        argv.extend(["-C", dir]);
    }
    let cli = Cli::try_parse_from(argv).expect("parse CLI");
    let resolved = discovery::resolve_path(&cli, Path::new(input));
    assert_eq!(resolved.as_ref(), Path::new(expected));
}

#[rstest]
#[case("Makefile.yml")]
#[case("makefile.yaml")]
#[case("MAKEFILE.YML")]
fn discover_ignores_case(#[case] name: &str) -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(&dir, name, FIRST)?;
    write(&dir, "Makefile.rb", "")?;
    let found = discover(dir.path())?;
    ensure!(
        found.as_deref() == Some(dir.path().join(name).as_path()),
        "unexpected discovery result {found:?}"
    );
    Ok(())
}

#[test]
fn discover_skips_other_extensions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(&dir, "makefile.yxml", FIRST)?;
    ensure!(discover(dir.path())?.is_none(), "unexpected discovery");
    Ok(())
}

#[test]
fn missing_named_script_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let cli = cli_in(&dir, &["absent.yml"]);
    let err = run(&cli).expect_err("missing script");
    ensure!(
        matches!(
            err.downcast_ref::<RunnerError>(),
            Some(RunnerError::ScriptNotFound { .. })
        ),
        "unexpected error {err:?}"
    );
    Ok(())
}

#[test]
fn no_script_writes_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    run(&cli_in(&dir, &[]))?;
    ensure!(!dir.path().join("Makefile").exists(), "Makefile written");
    Ok(())
}

#[test]
fn cumulative_mode_merges_scripts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(&dir, "a.yml", FIRST)?;
    write(&dir, "b.yml", SECOND)?;
    run(&cli_in(&dir, &["a.yml", "b.yml"]))?;
    let text = fs::read_to_string(dir.path().join("Makefile"))?;
    ensure!(text.contains("A = one\n"), "missing variable: {text}");
    ensure!(text.contains("clean: \n"), "missing rule: {text}");
    Ok(())
}

#[test]
fn independent_mode_keeps_last_script() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(&dir, "a.yml", FIRST)?;
    write(&dir, "b.yml", SECOND)?;
    run(&cli_in(&dir, &["--mode", "independent", "a.yml", "b.yml"]))?;
    let text = fs::read_to_string(dir.path().join("Makefile"))?;
    ensure!(!text.contains("A = one"), "first model leaked: {text}");
    ensure!(text.contains("clean: \n"), "missing rule: {text}");
    Ok(())
}

#[test]
fn evaluation_errors_name_the_script() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write(
        &dir,
        "bad.yml",
        "makegen_version: \"1.0.0\"\nsteps:\n  - shell: ls\n",
    )?;
    let err = build_model(&[dir.path().join("bad.yml")]).expect_err("eval error");
    ensure!(
        err.to_string().starts_with("failed to evaluate"),
        "unexpected error {err}"
    );
    ensure!(
        err.downcast_ref::<dsl::EvalError>().is_some(),
        "missing EvalError source"
    );
    Ok(())
}
