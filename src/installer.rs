//! Install pipeline.
//!
//! Wires the loader, aggregator, and the three target-file provisioners into
//! one sequential run against a target project directory. Precondition
//! failures (missing source directory, zero valid definitions) abort before
//! the target is touched.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate;
use crate::gitignore::{self, IgnoreOutcome};
use crate::loader;
use crate::mcp::{self, McpOutcome};
use crate::report::Reporter;
use crate::rules;

/// Default bundle subdirectory holding mode definitions.
pub const DEFAULT_MODES_DIR: &str = "modes";

/// Bundle subdirectory holding rule files.
pub const RULES_DIR: &str = "roorules";

/// Bundle-relative path of the default MCP config template.
pub const MCP_TEMPLATE_PATH: &str = "mcp-config/default.json";

/// Options for one install run.
#[derive(Debug, Default, Clone)]
pub struct InstallOptions {
    /// Emit a `version` field with this value in the aggregate file.
    pub schema_version: Option<String>,
    /// Report what would happen without writing anything.
    pub dry_run: bool,
}

/// Summary of one install run.
#[derive(Debug)]
pub struct InstallReport {
    pub modes_installed: usize,
    pub parse_errors: usize,
    pub rules_copied: usize,
    pub mcp: McpOutcome,
    pub ignore: IgnoreOutcome,
}

impl InstallReport {
    /// True when every discovered definition file parsed cleanly.
    pub fn is_clean(&self) -> bool {
        self.parse_errors == 0
    }
}

/// Resolved paths and options for an install run.
pub struct Installer {
    target_dir: PathBuf,
    source_dir: PathBuf,
    rules_dir: PathBuf,
    mcp_template: PathBuf,
    options: InstallOptions,
}

impl Installer {
    /// Resolve an installer against a bundle directory.
    ///
    /// `bundle_dir` defaults to the directory containing the running
    /// executable; `source_dir` defaults to `<bundle>/modes`.
    pub fn new(
        target_dir: PathBuf,
        source_dir: Option<PathBuf>,
        bundle_dir: Option<PathBuf>,
        options: InstallOptions,
    ) -> Result<Self> {
        let bundle_dir = match bundle_dir {
            Some(dir) => dir,
            None => default_bundle_dir()?,
        };

        Ok(Self {
            source_dir: source_dir.unwrap_or_else(|| bundle_dir.join(DEFAULT_MODES_DIR)),
            rules_dir: bundle_dir.join(RULES_DIR),
            mcp_template: bundle_dir.join(MCP_TEMPLATE_PATH),
            target_dir,
            options,
        })
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Run the full install pipeline: load modes, write the aggregate file,
    /// provision the MCP config, update the ignore list, copy rule files.
    pub fn install(&self, reporter: &dyn Reporter) -> Result<InstallReport> {
        let loaded = loader::load_modes(&self.source_dir, reporter)?;
        tracing::info!(
            modes = loaded.modes.len(),
            parse_errors = loaded.parse_errors,
            "loaded mode definitions"
        );

        if !self.options.dry_run {
            fs::create_dir_all(&self.target_dir).with_context(|| {
                format!(
                    "failed to create target directory {}",
                    self.target_dir.display()
                )
            })?;
        }

        aggregate::write_aggregate(
            &self.target_dir,
            &loaded.modes,
            self.options.schema_version.clone(),
            self.options.dry_run,
            reporter,
        )?;

        let mcp = mcp::provision_mcp_config(
            &self.mcp_template,
            &self.target_dir,
            self.options.dry_run,
            reporter,
        )?;

        let ignore = gitignore::ensure_ignore_entry(
            &self.target_dir,
            gitignore::IGNORE_PATTERN,
            self.options.dry_run,
            reporter,
        )?;

        let rules_copied = rules::propagate_rules(
            &self.rules_dir,
            &self.target_dir,
            self.options.dry_run,
            reporter,
        )?;

        Ok(InstallReport {
            modes_installed: loaded.modes.len(),
            parse_errors: loaded.parse_errors,
            rules_copied,
            mcp,
            ignore,
        })
    }
}

fn default_bundle_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("failed to locate the running executable")?;
    Ok(exe.parent().unwrap_or(Path::new(".")).to_path_buf())
}
