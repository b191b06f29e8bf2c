//! Rule file propagation.
//!
//! Copies bundled `.roorules-*` files flat into the target root, overwriting
//! same-named files. The bundle directory is optional. Every matching file
//! is attempted even after an earlier copy fails; any failure still aborts
//! the run once the sweep is done.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::report::Reporter;

/// File-name prefix that marks a bundled rule file.
pub const RULE_FILE_PREFIX: &str = ".roorules-";

/// Copy every `.roorules-*` file from `rules_dir` into `target_root`.
/// Returns the number of files copied.
pub fn propagate_rules(
    rules_dir: &Path,
    target_root: &Path,
    dry_run: bool,
    reporter: &dyn Reporter,
) -> Result<usize> {
    if !rules_dir.is_dir() {
        reporter.warn(&format!(
            "rules directory not found, skipping: {}",
            rules_dir.display()
        ));
        return Ok(0);
    }

    let mut entries: Vec<_> = fs::read_dir(rules_dir)
        .and_then(|iter| iter.collect::<std::io::Result<Vec<_>>>())
        .with_context(|| format!("failed to read rules directory {}", rules_dir.display()))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut copied = 0usize;
    let mut failed = 0usize;

    for entry in entries {
        let name = entry.file_name();
        let Some(name_str) = name.to_str() else {
            continue;
        };
        if !name_str.starts_with(RULE_FILE_PREFIX) || !entry.path().is_file() {
            continue;
        }

        let dest = target_root.join(&name);
        if dry_run {
            reporter.info(&format!("would copy rule file {name_str}"));
            copied += 1;
            continue;
        }

        match fs::copy(entry.path(), &dest) {
            Ok(_) => {
                reporter.detail(&format!("copied rule file {name_str}"));
                copied += 1;
            }
            Err(e) => {
                tracing::error!(file = %entry.path().display(), error = %e, "rule file copy failed");
                reporter.error(&format!(
                    "failed to copy rule file {} to {}: {e}",
                    entry.path().display(),
                    dest.display()
                ));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!(
            "{failed} rule file(s) could not be copied to {}",
            target_root.display()
        );
    }

    if copied > 0 {
        reporter.info(&format!("copied {copied} rule files"));
    }

    Ok(copied)
}
