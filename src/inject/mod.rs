//! Marker-based injection into previously generated files.
//!
//! Aggregator files (module lists, the router, the OpenAPI document) are generated once and then grow by one
//! fragment per entity. Fragments are inserted immediately before the line carrying the marker token, using
//! that line's indentation; every other byte of the file is preserved, including hand edits.
//!
//! The engine never deduplicates. Calling [`insert_before_marker`] twice with the same fragment yields two
//! copies; the orchestrator asks [`contains_fragment`] first and only injects fragments the file lacks.

pub mod markers;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use markers::{MarkerId, MarkerInfo};

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("marker '{marker}' not found in '{path}'")]
    MarkerNotFound { path: PathBuf, marker: String },

    #[error("cannot access injection target '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Insert `fragment` before the first line containing `marker`.
///
/// Each fragment line is prefixed with the marker line's leading whitespace. Returns `None` when the marker
/// does not occur in `content`.
pub fn insert_before_marker(content: &str, marker: &str, fragment: &str) -> Option<String> {
    let at = content.find(marker)?;
    let line_start = content[..at].rfind('\n').map_or(0, |nl| nl + 1);
    let indent: &str = {
        let line = &content[line_start..];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    };

    let mut inserted = String::new();
    for line in fragment.lines() {
        if !line.is_empty() {
            inserted.push_str(indent);
        }
        inserted.push_str(line);
        inserted.push('\n');
    }

    let mut updated = String::with_capacity(content.len() + inserted.len());
    updated.push_str(&content[..line_start]);
    updated.push_str(&inserted);
    updated.push_str(&content[line_start..]);
    Some(updated)
}

/// Whether every line of `fragment` already occurs, consecutively, in `content`.
///
/// Lines are compared with surrounding whitespace trimmed so re-indented hand edits still count; blank
/// fragment lines are ignored.
pub fn contains_fragment(content: &str, fragment: &str) -> bool {
    let wanted: Vec<&str> = fragment.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    if wanted.is_empty() {
        return true;
    }
    let lines: Vec<&str> = content.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    lines.windows(wanted.len()).any(|window| window == wanted.as_slice())
}

/// Result of one injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub content: String,
    /// Set when the marker was missing and the content was left unchanged.
    pub warning: Option<String>,
}

/// How a missing marker is handled.
pub trait Injector {
    fn inject(&self, path: &Path, content: &str, marker: &str, fragment: &str) -> Result<Injected, InjectError>;
}

/// Missing markers are fatal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictInjector;

impl Injector for StrictInjector {
    fn inject(&self, path: &Path, content: &str, marker: &str, fragment: &str) -> Result<Injected, InjectError> {
        match insert_before_marker(content, marker, fragment) {
            Some(content) => Ok(Injected { content, warning: None }),
            None => Err(InjectError::MarkerNotFound {
                path: path.to_path_buf(),
                marker: marker.to_string(),
            }),
        }
    }
}

/// Missing markers leave the content unchanged and produce a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TolerantInjector;

impl Injector for TolerantInjector {
    fn inject(&self, path: &Path, content: &str, marker: &str, fragment: &str) -> Result<Injected, InjectError> {
        match insert_before_marker(content, marker, fragment) {
            Some(content) => Ok(Injected { content, warning: None }),
            None => {
                let warning = format!("marker '{marker}' not found in '{}'; fragment skipped", path.display());
                tracing::warn!(path = %path.display(), marker, "injection marker missing, leaving file unchanged");
                Ok(Injected {
                    content: content.to_string(),
                    warning: Some(warning),
                })
            }
        }
    }
}

/// Inject into a file on disk whose current text is `content`. The file is only rewritten when it changed.
pub fn inject_file(
    injector: &dyn Injector,
    path: &Path,
    content: &str,
    marker: &str,
    fragment: &str,
) -> Result<Option<String>, InjectError> {
    let injected = injector.inject(path, content, marker, fragment)?;
    if injected.content != content {
        fs::write(path, &injected.content).map_err(|source| InjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(injected.warning)
}

/// Read an injection target.
pub fn read_target(path: &Path) -> Result<String, InjectError> {
    fs::read_to_string(path).map_err(|source| InjectError::Io {
        path: path.to_path_buf(),
        source,
    })
}
