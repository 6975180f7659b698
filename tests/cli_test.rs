/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use common::{hello_export, realistic_export};
use predicates::prelude::*;

fn archive(store: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chat-archive"));
    cmd.env_remove("CHAT_ARCHIVE_DATA").env_remove("RUST_LOG").arg("--data").arg(store);
    cmd
}

#[test]
fn test_cli_import_reports_counts() {
    let export = realistic_export();

    archive(&export.store_path())
        .arg("import")
        .arg(export.export_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 conversations (2 new, 0 updated)"));

    archive(&export.store_path())
        .arg("import")
        .arg(export.export_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 conversations (0 new, 2 updated)"));
}

#[test]
fn test_cli_import_missing_file_fails() {
    let export = hello_export();

    archive(&export.store_path())
        .arg("import")
        .arg(export.dir().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse export"));
}

#[test]
fn test_cli_import_malformed_file_fails() {
    let export = hello_export();
    std::fs::write(export.export_path(), "{}").unwrap();

    archive(&export.store_path())
        .arg("import")
        .arg(export.export_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed export"));
}

#[test]
fn test_cli_import_names_conversation_that_failed_to_persist() {
    let export = hello_export();
    let mut blocker = export.store_path().into_os_string();
    blocker.push(".tmp");
    std::fs::create_dir_all(&blocker).unwrap();

    archive(&export.store_path())
        .arg("import")
        .arg(export.export_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to persist conversation c1"));
}

#[test]
fn test_cli_list_and_show() {
    let export = hello_export();
    archive(&export.store_path()).arg("import").arg(export.export_path()).assert().success();

    archive(&export.store_path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("c1\t1970-01-01 00:33:20\tHello"));

    archive(&export.store_path())
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"conversations\""))
        .stdout(predicate::str::contains("\"messages\"").not());

    archive(&export.store_path())
        .args(["show", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Hi there\""));
}

#[test]
fn test_cli_show_missing_fails() {
    let export = hello_export();

    archive(&export.store_path())
        .args(["show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conversation not found: ghost"));
}

#[test]
fn test_cli_create_edit_delete() {
    let export = hello_export();

    let output = archive(&export.store_path())
        .args(["create", "--title", "Notes", "--summary", "Handwritten", "--date-started", "2024-01-15"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = String::from_utf8(output.stdout).unwrap().trim().to_string();
    assert_eq!(id.len(), 32);

    archive(&export.store_path())
        .args(["edit", id.as_str(), "--title", "Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Renamed\""))
        .stdout(predicate::str::contains("\"dateStarted\": \"2024-01-15\""));

    archive(&export.store_path())
        .args(["delete", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {}", id)));

    archive(&export.store_path()).args(["delete", id.as_str()]).assert().failure();
}

#[test]
fn test_cli_create_requires_non_empty_title() {
    let export = hello_export();

    archive(&export.store_path())
        .args(["create", "--title", "  ", "--summary", "Something"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title cannot be empty"));
}

#[test]
fn test_cli_edit_without_fields_fails() {
    let export = hello_export();

    archive(&export.store_path())
        .args(["edit", "c1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to edit"));
}

#[test]
fn test_cli_delete_all() {
    let export = realistic_export();
    archive(&export.store_path()).arg("import").arg(export.export_path()).assert().success();

    archive(&export.store_path())
        .arg("delete-all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 conversations"));

    archive(&export.store_path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("0 conversations"));
}

#[test]
fn test_cli_data_path_from_env() {
    let export = hello_export();

    Command::new(env!("CARGO_BIN_EXE_chat-archive"))
        .env("CHAT_ARCHIVE_DATA", export.store_path())
        .arg("import")
        .arg(export.export_path())
        .assert()
        .success();

    assert!(export.store_path().exists());
}

#[test]
fn test_cli_verbose_logs_to_stderr() {
    let export = hello_export();

    archive(&export.store_path())
        .arg("--verbose")
        .arg("import")
        .arg(export.export_path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Converted export"));
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chat-archive"));
    cmd.assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chat-archive"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive exported chat conversations"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chat-archive"));
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chat-archive"));
    cmd.arg("invalid-command").assert().failure();
}
