//! End-to-End CLI Tests for ModeSync
//!
//! These tests verify the complete CLI behavior by running the binary
//! against a synthetic bundle and checking outputs and file system changes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn modesync_cmd() -> Command {
    Command::cargo_bin("modesync").unwrap()
}

/// Lay out a complete bundle: two mode definitions, one rule file, and the
/// default MCP config template.
fn setup_bundle(bundle: &TempDir) {
    let modes = bundle.path().join("modes");
    fs::create_dir_all(&modes).unwrap();
    fs::write(modes.join("a.json"), r#"{"slug":"po","name":"Product Owner"}"#).unwrap();
    fs::write(modes.join("b.json"), r#"{"slug":"dev","name":"Developer"}"#).unwrap();

    let roorules = bundle.path().join("roorules");
    fs::create_dir_all(&roorules).unwrap();
    fs::write(roorules.join(".roorules-code"), "# code rules\n").unwrap();

    let mcp_config = bundle.path().join("mcp-config");
    fs::create_dir_all(&mcp_config).unwrap();
    fs::write(
        mcp_config.join("default.json"),
        r#"{"mcpServers":{"git":{"command":"npx"}}}"#,
    )
    .unwrap();
}

fn read_aggregate(target: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(target.join(".roomodes")).unwrap()).unwrap()
}

// =============================================================================
// FULL INSTALL SCENARIOS
// =============================================================================

#[test]
fn test_cli_install_into_empty_target() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Install complete"));

    let aggregate = read_aggregate(target.path());
    let modes = aggregate["customModes"].as_array().unwrap();
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[0]["slug"], "po");
    assert_eq!(modes[1]["slug"], "dev");

    assert_eq!(
        fs::read_to_string(target.path().join(".roo/mcp.json")).unwrap(),
        r#"{"mcpServers":{"git":{"command":"npx"}}}"#
    );
    assert_eq!(
        fs::read_to_string(target.path().join(".gitignore")).unwrap(),
        ".roo/mcp.json\n"
    );
    assert_eq!(
        fs::read_to_string(target.path().join(".roorules-code")).unwrap(),
        "# code rules\n"
    );
}

#[test]
fn test_cli_rerun_is_idempotent() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    for _ in 0..2 {
        modesync_cmd()
            .arg("--target")
            .arg(target.path())
            .arg("--bundle-dir")
            .arg(bundle.path())
            .assert()
            .success();
    }

    let gitignore = fs::read_to_string(target.path().join(".gitignore")).unwrap();
    assert_eq!(gitignore, ".roo/mcp.json\n");

    let aggregate = read_aggregate(target.path());
    assert_eq!(aggregate["customModes"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_aggregate_is_byte_reproducible() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    let run = || {
        modesync_cmd()
            .arg("--target")
            .arg(target.path())
            .arg("--bundle-dir")
            .arg(bundle.path())
            .assert()
            .success();
        fs::read(target.path().join(".roomodes")).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn test_cli_schema_version_is_emitted() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .arg("--schema-version")
        .arg("1.0")
        .assert()
        .success();

    let aggregate = read_aggregate(target.path());
    assert_eq!(aggregate["version"], "1.0");
}

// =============================================================================
// PRESERVATION GUARANTEES
// =============================================================================

#[test]
fn test_cli_existing_mcp_config_is_preserved() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    let roo_dir = target.path().join(".roo");
    fs::create_dir_all(&roo_dir).unwrap();
    let custom = r#"{"mcpServers":{"mine":{"command":"custom","args":["--flag"]}}}"#;
    fs::write(roo_dir.join("mcp.json"), custom).unwrap();

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("preserved"));

    assert_eq!(
        fs::read_to_string(roo_dir.join("mcp.json")).unwrap(),
        custom
    );
}

#[test]
fn test_cli_gitignore_append_preserves_existing_lines() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    fs::write(target.path().join(".gitignore"), "node_modules\n").unwrap();

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(target.path().join(".gitignore")).unwrap(),
        "node_modules\n.roo/mcp.json\n"
    );
}

// =============================================================================
// FAILURE MODES
// =============================================================================

#[test]
fn test_cli_missing_source_fails_without_touching_target() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .arg("--source")
        .arg(bundle.path().join("no-such-dir"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("source directory not found"));

    assert!(!target.path().join(".roomodes").exists());
    assert!(!target.path().join(".gitignore").exists());
}

#[test]
fn test_cli_empty_source_fails_without_touching_target() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);
    let empty = bundle.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .arg("--source")
        .arg(&empty)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no mode definitions found"));

    assert!(!target.path().join(".roomodes").exists());
}

#[test]
fn test_cli_parse_error_reports_partial_completion() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);
    fs::write(bundle.path().join("modes/broken.json"), "{not json").unwrap();

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Install completed with 1 errors"))
        .stderr(predicate::str::contains("broken.json"));

    // The valid subset is still installed.
    let aggregate = read_aggregate(target.path());
    assert_eq!(aggregate["customModes"].as_array().unwrap().len(), 2);
}

// =============================================================================
// ADVISORY RESOURCES
// =============================================================================

#[test]
fn test_cli_missing_rules_and_template_are_advisory() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let modes = bundle.path().join("modes");
    fs::create_dir_all(&modes).unwrap();
    fs::write(modes.join("a.json"), r#"{"slug":"po"}"#).unwrap();

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("rules directory not found"))
        .stdout(predicate::str::contains("template not found"))
        .stdout(predicate::str::contains("Install complete"));

    assert!(target.path().join(".roomodes").exists());
    assert!(!target.path().join(".roo/mcp.json").exists());
}

// =============================================================================
// DRY RUN
// =============================================================================

#[test]
fn test_cli_dry_run_makes_no_changes() {
    let bundle = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    setup_bundle(&bundle);

    modesync_cmd()
        .arg("--target")
        .arg(target.path())
        .arg("--bundle-dir")
        .arg(bundle.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("would write"));

    assert!(fs::read_dir(target.path()).unwrap().next().is_none());
}
