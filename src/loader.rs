//! Mode definition discovery and parsing.
//!
//! Walks a source directory for `.json` documents and parses each one into
//! an opaque [`ModeDefinition`]. Individual parse failures are reported and
//! skipped; the loader only fails outright when the source directory is
//! missing or no file parses at all, both of which abort the run before the
//! target is touched.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::report::Reporter;

/// A single parsed mode document.
///
/// The document is deliberately opaque: apart from `slug`, no field is
/// interpreted, and field order survives aggregation unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeDefinition {
    pub slug: String,
    pub document: Map<String, Value>,
    /// File the document was read from, for reporting.
    pub origin: PathBuf,
}

/// Result of one loader pass over a source directory.
#[derive(Debug, Default)]
pub struct LoadedModes {
    /// Modes in discovery order (depth-first, file names sorted per level).
    pub modes: Vec<ModeDefinition>,
    /// Files that failed to parse and were skipped.
    pub parse_errors: usize,
}

/// Precondition failures that abort the run with no target mutation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source directory not found: {0}")]
    SourceMissing(PathBuf),
    #[error("no mode definitions found in {0}")]
    NoDefinitions(PathBuf),
}

/// Load every parseable mode definition under `source_dir`.
pub fn load_modes(source_dir: &Path, reporter: &dyn Reporter) -> Result<LoadedModes> {
    if !source_dir.is_dir() {
        return Err(LoadError::SourceMissing(source_dir.to_path_buf()).into());
    }

    let mut loaded = LoadedModes::default();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("failed to walk source directory {}", source_dir.display()))?;
        if !entry.file_type().is_file() || !has_json_extension(entry.path()) {
            continue;
        }

        match parse_mode_file(entry.path()) {
            Ok(mode) => {
                if loaded.modes.iter().any(|m| m.slug == mode.slug) {
                    reporter.warn(&format!(
                        "duplicate slug '{}' in {}",
                        mode.slug,
                        entry.path().display()
                    ));
                }
                reporter.detail(&format!(
                    "loaded mode '{}' from {}",
                    mode.slug,
                    entry.path().display()
                ));
                loaded.modes.push(mode);
            }
            Err(e) => {
                tracing::warn!(file = %entry.path().display(), error = %e, "skipping mode file");
                reporter.error(&format!("skipping {}: {e:#}", entry.path().display()));
                loaded.parse_errors += 1;
            }
        }
    }

    if loaded.modes.is_empty() {
        return Err(LoadError::NoDefinitions(source_dir.to_path_buf()).into());
    }

    Ok(loaded)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_mode_file(path: &Path) -> Result<ModeDefinition> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let Value::Object(document) = value else {
        anyhow::bail!("mode document is not a JSON object: {}", path.display());
    };

    let slug = document
        .get("slug")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .with_context(|| format!("missing or empty 'slug' in {}", path.display()))?
        .to_string();

    Ok(ModeDefinition {
        slug,
        document,
        origin: path.to_path_buf(),
    })
}
