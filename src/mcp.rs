//! MCP connection-config provisioning.
//!
//! Installs the bundled default MCP configuration at `.roo/mcp.json` in the
//! target project. An existing config is authoritative: it is never
//! rewritten, not even with identical bytes.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::report::Reporter;

/// Target-relative path of the MCP connection config.
pub const MCP_CONFIG_PATH: &str = ".roo/mcp.json";

/// What the provisioner did (or would do) to the connection config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpOutcome {
    /// Default template copied into place.
    Created,
    /// A config already existed and was left untouched.
    Preserved,
    /// No bundled template; nothing installed.
    TemplateMissing,
}

/// Ensure `<target>/.roo/mcp.json` exists, seeding it from `template` when
/// absent. A missing template is advisory.
pub fn provision_mcp_config(
    template: &Path,
    target_root: &Path,
    dry_run: bool,
    reporter: &dyn Reporter,
) -> Result<McpOutcome> {
    let dest = target_root.join(MCP_CONFIG_PATH);

    if dest.exists() {
        reporter.info(&format!(
            "existing MCP config preserved: {}",
            dest.display()
        ));
        return Ok(McpOutcome::Preserved);
    }

    if !template.is_file() {
        reporter.warn(&format!(
            "MCP config template not found, skipping: {}",
            template.display()
        ));
        return Ok(McpOutcome::TemplateMissing);
    }

    if dry_run {
        reporter.info(&format!("would install MCP config at {}", dest.display()));
        return Ok(McpOutcome::Created);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::copy(template, &dest).with_context(|| {
        format!(
            "failed to copy MCP config template {} to {}",
            template.display(),
            dest.display()
        )
    })?;

    tracing::info!(file = %dest.display(), "installed default MCP config");
    reporter.info(&format!("installed MCP config at {}", dest.display()));
    Ok(McpOutcome::Created)
}
