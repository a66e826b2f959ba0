//! Translates script parsing errors into actionable diagnostics.
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_saphyr::{Error as YamlError, Location};
use std::fmt;
use thiserror::Error;

use super::hints::YAML_HINTS;

/// YAML text of a build script.
///
/// ```rust
/// use makegen::manifest::ScriptSource;
/// let source = ScriptSource::from("steps: []");
/// assert_eq!(source.as_str(), "steps: []");
/// ```
#[derive(Debug, Clone)]
pub struct ScriptSource(String);

impl ScriptSource {
    /// Wrap script text.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// Borrow the script text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScriptSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Name of a script as shown in diagnostics, usually its path.
#[derive(Debug, Clone)]
pub struct ScriptName(String);

impl ScriptName {
    /// Wrap a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScriptName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Byte offset of a one-based line/column location, clamped to the source.
fn location_to_index(src: &ScriptSource, loc: Location) -> usize {
    line_column_to_index(
        src,
        saturating_usize(loc.line().saturating_sub(1)),
        saturating_usize(loc.column().saturating_sub(1)),
    )
}

/// Byte offset of a zero-based line/column pair, clamped to the line end.
fn line_column_to_index(src: &ScriptSource, target_line: usize, target_column: usize) -> usize {
    let mut offset = 0usize;
    for (idx, segment) in src.as_str().split_inclusive('\n').enumerate() {
        if idx == target_line {
            let line = segment.strip_suffix('\n').unwrap_or(segment);
            let line = line.strip_suffix('\r').unwrap_or(line);
            let byte_index = line
                .char_indices()
                .nth(target_column)
                .map_or(line.len(), |(byte_idx, _)| byte_idx);
            return offset + byte_index;
        }
        offset += segment.len();
    }
    src.as_str().len()
}

/// One-character span at `loc`, or the character before a line break.
/// Carriage returns count as part of the break.
fn to_span(src: &ScriptSource, loc: Location) -> SourceSpan {
    let at = location_to_index(src, loc);
    let bytes = src.as_str().as_bytes();
    let is_break = |b: u8| b == b'\n' || b == b'\r';
    let start = match bytes.get(at) {
        Some(&b) if !is_break(b) => at,
        _ if at > 0 && bytes.get(at - 1).is_some_and(|prev| !is_break(*prev)) => at - 1,
        _ => at,
    };
    let len = usize::from(start < at || bytes.get(at).is_some_and(|b| !is_break(*b)));
    SourceSpan::new(start.into(), len)
}

fn has_tab_indent(src: &ScriptSource, loc: Option<Location>) -> bool {
    let Some(loc) = loc else { return false };
    let line_idx = saturating_usize(loc.line().saturating_sub(1));
    src.as_str()
        .lines()
        .nth(line_idx)
        .is_some_and(|line| {
            line.chars()
                .take_while(|c| c.is_whitespace())
                .any(|c| c == '\t')
        })
}

fn hint_for(err_str: &str, src: &ScriptSource, loc: Option<Location>) -> Option<String> {
    if has_tab_indent(src, loc) {
        return Some("Use spaces for indentation; tabs are invalid in YAML.".into());
    }
    let lower = err_str.to_lowercase();
    YAML_HINTS
        .iter()
        .find(|(needle, _)| lower.contains(*needle))
        .map(|(_, hint)| (*hint).into())
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(makegen::yaml::parse))]
struct YamlDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("parse error here")]
    span: Option<SourceSpan>,
    #[help]
    help: Option<String>,
    #[source]
    source: YamlError,
    message: String,
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(makegen::manifest::structure))]
struct StructureDiagnostic {
    #[source]
    source: serde_json::Error,
    message: String,
}

/// Error raised when a build script cannot be parsed.
///
/// ```rust
/// use miette::MietteDiagnostic;
/// use makegen::manifest::ManifestError;
///
/// let err = ManifestError::Parse { source: Box::new(MietteDiagnostic::new("bad script")) };
/// assert_eq!(format!("{err}"), "build script parse error");
/// ```
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    /// YAML syntax or schema error.
    #[error("build script parse error")]
    #[diagnostic(code(makegen::manifest::parse))]
    Parse {
        /// Diagnostic locating the problem.
        #[source]
        #[diagnostic_source]
        source: Box<dyn Diagnostic + Send + Sync + 'static>,
    },
}

/// Convert a YAML syntax error into a diagnostic pointing into `src`.
#[must_use]
pub fn map_yaml_error(
    err: YamlError,
    src: &ScriptSource,
    name: &ScriptName,
) -> Box<dyn Diagnostic + Send + Sync + 'static> {
    let loc = err.location();
    let (line, col, span) = loc.map_or((1, 1, None), |l| {
        (l.line(), l.column(), Some(to_span(src, l)))
    });
    let err_str = err.to_string();
    let hint = hint_for(&err_str, src, loc);
    let mut message = format!("YAML parse error at line {line}, column {col}: {err_str}");
    if let Some(h) = &hint {
        message.push_str("\nhelp: ");
        message.push_str(h);
    }

    Box::new(YamlDiagnostic {
        src: NamedSource::new(name.as_str(), src.as_str().to_owned()),
        span,
        help: hint,
        source: err,
        message,
    })
}

/// Convert a schema mismatch into a diagnostic naming the script.
#[must_use]
pub fn map_data_error(
    err: serde_json::Error,
    name: &ScriptName,
) -> Box<dyn Diagnostic + Send + Sync + 'static> {
    let message = format!("build script structure error in {name}: {err}");
    Box::new(StructureDiagnostic {
        source: err,
        message,
    })
}
