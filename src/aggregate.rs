//! Aggregate mode configuration output.
//!
//! All loaded modes are merged into a single `.roomodes` document at the
//! target root. Each run fully replaces the previous aggregate; no merging
//! with prior content happens. Serialization is deterministic so an
//! unchanged source tree reproduces the file byte-for-byte.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::loader::ModeDefinition;
use crate::report::Reporter;

/// File name of the aggregate mode configuration at the target root.
pub const AGGREGATE_FILE_NAME: &str = ".roomodes";

/// The serialized aggregate document: `{ version?, customModes }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    custom_modes: Vec<Map<String, Value>>,
}

impl AggregateConfig {
    pub fn new(modes: &[ModeDefinition], version: Option<String>) -> Self {
        Self {
            version,
            custom_modes: modes.iter().map(|m| m.document.clone()).collect(),
        }
    }

    /// Render the document as pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)
            .context("failed to serialize aggregate mode config")?;
        out.push('\n');
        Ok(out)
    }
}

/// Write the aggregate file under `target_root`, replacing any previous one.
pub fn write_aggregate(
    target_root: &Path,
    modes: &[ModeDefinition],
    version: Option<String>,
    dry_run: bool,
    reporter: &dyn Reporter,
) -> Result<PathBuf> {
    let path = target_root.join(AGGREGATE_FILE_NAME);
    let content = AggregateConfig::new(modes, version).to_json()?;

    if dry_run {
        reporter.info(&format!(
            "would write {} modes to {}",
            modes.len(),
            path.display()
        ));
        return Ok(path);
    }

    fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(modes = modes.len(), file = %path.display(), "wrote aggregate mode config");
    reporter.info(&format!(
        "wrote {} modes to {}",
        modes.len(),
        path.display()
    ));

    Ok(path)
}
