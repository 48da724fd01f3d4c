//! CLI transaction integration tests
//!
//! Each test drives the built binary against a ledger in a temp directory.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn run(db: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_ledgerguard-cli");
    Command::new(cli_bin)
        .arg("--db")
        .arg(db)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn run_ok(db: &Path, args: &[&str]) -> Value {
    let output = run(db, args);
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_confidential_create_then_verify() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("ledger.db");

    let created = run_ok(
        &db,
        &[
            "--transient",
            "privateValue=42",
            "confidential",
            "create",
            "asset1",
        ],
    );
    assert_eq!(created["blockNum"], 1);
    assert!(created["result"].is_null());

    let matched = run_ok(
        &db,
        &[
            "--org",
            "Org2MSP",
            "confidential",
            "verify",
            "--msp-id",
            "Org1MSP",
            "asset1",
            "--candidate",
            "42",
        ],
    );
    assert_eq!(matched["result"], Value::Bool(true));

    let wrong = run_ok(
        &db,
        &[
            "confidential",
            "verify",
            "--msp-id",
            "Org1MSP",
            "asset1",
            "--candidate-b64",
            "NDM=",
        ],
    );
    assert_eq!(wrong["result"], Value::Bool(false));
}

#[test]
fn test_confidential_read_returns_secret_to_owner() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("ledger.db");

    run_ok(
        &db,
        &["--transient-b64", "privateValue=NDI=", "confidential", "create", "asset1"],
    );
    let read = run_ok(&db, &["confidential", "read", "asset1"]);
    assert_eq!(read["result"]["privateValue"], "42");
}

#[test]
fn test_missing_transient_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("ledger.db");

    let output = run(&db, &["confidential", "create", "asset1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("privateValue"));
}

#[test]
fn test_public_owner_policy_enforced_across_invocations() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("ledger.db");

    let created = run_ok(&db, &["public", "create", "z1", "hello"]);
    assert_eq!(created["result"]["outcome"]["status"], "applied");

    let read = run_ok(&db, &["public", "read", "z1"]);
    assert_eq!(read["result"]["payload"], "hello");
    assert_eq!(read["result"]["ownerOrg"], "Org1MSP");

    let policy = run_ok(&db, &["public", "policy", "z1"]);
    assert!(policy["result"].to_string().contains("Org1MSP"));

    let rejected = run(
        &db,
        &["--org", "Org2MSP", "public", "update", "z1", "stolen"],
    );
    assert!(!rejected.status.success());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("not satisfied"));

    let unchanged = run_ok(&db, &["public", "read", "z1"]);
    assert_eq!(unchanged["result"]["payload"], "hello");
}

#[test]
fn test_linkage_sees_both_stores() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("ledger.db");

    run_ok(&db, &["public", "create", "shared", "p"]);
    run_ok(
        &db,
        &["--transient", "privateValue=s", "confidential", "create", "shared"],
    );

    let linkage = run_ok(&db, &["linkage", "shared"]);
    assert_eq!(linkage["result"]["public"], true);
    assert_eq!(linkage["result"]["confidential"], true);
}

#[test]
fn test_config_file_selects_named_collection() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("ledger.db");
    let config = temp_dir.path().join("contract.toml");
    std::fs::write(&config, "[collection]\nstrategy = \"named\"\nname = \"shared\"\n").unwrap();
    let config = config.to_str().unwrap();

    run_ok(
        &db,
        &[
            "--config",
            config,
            "--transient",
            "privateValue=7",
            "confidential",
            "create",
            "a1",
        ],
    );
    let exists = run_ok(
        &db,
        &["--config", config, "--org", "Org2MSP", "confidential", "exists", "a1"],
    );
    assert_eq!(exists["result"], true);
}
