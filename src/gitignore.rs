//! Ignore-list management.
//!
//! Ensures the managed pattern appears exactly once in the target's
//! `.gitignore`, creating the file when absent and appending a single line
//! otherwise. Safe to run any number of times: a file that already carries
//! the pattern is not rewritten at all.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::report::Reporter;

/// Ignore pattern managed by the installer.
pub const IGNORE_PATTERN: &str = ".roo/mcp.json";

/// What the updater did (or would do) to the ignore list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreOutcome {
    /// File did not exist; created with the pattern as its only line.
    Created,
    /// Pattern appended as a new final line.
    Appended,
    /// Pattern already present; file untouched.
    AlreadyPresent,
}

/// Idempotently ensure `pattern` is a line of `<project_root>/.gitignore`.
///
/// A line matches when its trimmed content equals the pattern, so the check
/// is not fooled by surrounding whitespace or by longer paths that merely
/// contain the pattern. When appending, a newline separator is inserted
/// first if the current last line lacks its terminator.
pub fn ensure_ignore_entry(
    project_root: &Path,
    pattern: &str,
    dry_run: bool,
    reporter: &dyn Reporter,
) -> Result<IgnoreOutcome> {
    let path = project_root.join(".gitignore");

    if !path.exists() {
        if dry_run {
            reporter.info(&format!("would create .gitignore with '{pattern}'"));
            return Ok(IgnoreOutcome::Created);
        }
        fs::write(&path, format!("{pattern}\n"))
            .with_context(|| format!("failed to create {}", path.display()))?;
        reporter.info(&format!("created .gitignore with '{pattern}'"));
        return Ok(IgnoreOutcome::Created);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if content.lines().any(|line| line.trim() == pattern) {
        reporter.detail(&format!("'{pattern}' already in .gitignore"));
        return Ok(IgnoreOutcome::AlreadyPresent);
    }

    if dry_run {
        reporter.info(&format!("would add '{pattern}' to .gitignore"));
        return Ok(IgnoreOutcome::Appended);
    }

    let mut updated = content;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(pattern);
    updated.push('\n');

    fs::write(&path, updated)
        .with_context(|| format!("failed to update {}", path.display()))?;
    reporter.info(&format!("added '{pattern}' to .gitignore"));
    Ok(IgnoreOutcome::Appended)
}
