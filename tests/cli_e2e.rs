//! End-to-end CLI tests for slackbook.
//!
//! These tests run the actual binary against export directories built in a
//! temp dir and check exit codes, console output and the files produced.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates `<tmp>/acme` holding a small, consistent export.
fn setup_export() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let root = dir.path().join("acme");

    write(
        &root,
        "users.json",
        r#"[{"id": "U1", "real_name": "Alice"}, {"id": "U2", "real_name": "Bob"}]"#,
    );
    write(
        &root,
        "channels.json",
        r#"[{"id": "C1", "name": "general"}, {"id": "C2", "name": "dev"}]"#,
    );
    write(
        &root,
        "general/2021-01-07.json",
        r#"[
  {"type": "message", "user": "U1", "text": "Ship it :rocket:", "ts": "1610000000.000100",
   "replies": [{"user": "U2", "ts": "1610000060.000200"}],
   "reactions": [{"name": "thumbsup", "users": ["U2"], "count": 1}]},
  {"type": "message", "user": "U2", "text": "Done", "ts": "1610000060.000200",
   "thread_ts": "1610000000.000100", "parent_user_id": "U1"}
]"#,
    );
    write(
        &root,
        "dev/2021-01-07.json",
        r#"[{"type": "message", "user": "U2", "text": "hello dev", "ts": "1610000100.000000"}]"#,
    );

    (dir, root)
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn slackbook_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_slackbook"));
    Command::from_std(cmd)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_default_output_next_to_export() {
        let (dir, root) = setup_export();

        slackbook_cmd()
            .arg(&root)
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("3 messages"));

        let output = dir.path().join("acme.xlsx");
        assert!(output.exists());
        let bytes = fs::read(output).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_explicit_output_path() {
        let (dir, root) = setup_export();
        let output = dir.path().join("report.xlsx");

        slackbook_cmd()
            .args([root.to_str().unwrap(), "-o", output.to_str().unwrap(), "--utc"])
            .assert()
            .success();

        assert!(output.exists());
        assert!(!dir.path().join("acme.xlsx").exists());
    }

    #[test]
    fn test_rows_layout() {
        let (dir, root) = setup_export();

        slackbook_cmd()
            .args([root.to_str().unwrap(), "--reactions", "rows"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reactions: rows"))
            .stdout(predicate::str::contains("4 rows"));

        assert!(dir.path().join("acme.xlsx").exists());
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_csv_directory() {
        let (dir, root) = setup_export();

        slackbook_cmd()
            .args([root.to_str().unwrap(), "-f", "csv", "--utc"])
            .assert()
            .success();

        let csv_dir = dir.path().join("acme_csv");
        let general = fs::read_to_string(csv_dir.join("general.csv")).unwrap();
        assert!(general.starts_with("index,user,text,thread,reactions,datetime"));
        assert!(general.contains("Ship it 🚀"));
        assert!(general.contains("Thread parent index: 1"));
        assert!(general.contains("👍(1) - [Bob]"));

        let dev = fs::read_to_string(csv_dir.join("dev.csv")).unwrap();
        assert!(dev.contains("1,Bob (U2),hello dev,,,2021-01-07 06:15:00"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let (_dir, root) = setup_export();

        slackbook_cmd()
            .args([root.to_str().unwrap(), "-f", "ods"])
            .assert()
            .failure();
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_export_dir_argument() {
        slackbook_cmd()
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "The export data directory must be specified.",
            ));
    }

    #[test]
    fn test_missing_users_file() {
        let (dir, root) = setup_export();
        fs::remove_file(root.join("users.json")).unwrap();

        slackbook_cmd()
            .arg(&root)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("❌ Error"))
            .stderr(predicate::str::contains("users.json"));

        assert!(!dir.path().join("acme.xlsx").exists());
    }

    #[test]
    fn test_thread_violation_writes_nothing() {
        let (dir, root) = setup_export();
        write(
            &root,
            "dev/2021-01-08.json",
            r#"[{"user": "U1", "text": "stray", "ts": "1610090000.000000", "thread_ts": "1610080000.000000", "parent_user_id": "U2"}]"#,
        );

        slackbook_cmd()
            .arg(&root)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Found invalid thread data"));

        assert!(!dir.path().join("acme.xlsx").exists());
    }

    #[test]
    fn test_malformed_timestamp() {
        let (_dir, root) = setup_export();
        write(
            &root,
            "dev/2021-01-08.json",
            r#"[{"user": "U1", "text": "bad", "ts": "not-a-ts"}]"#,
        );

        slackbook_cmd()
            .arg(&root)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not-a-ts"));
    }
}
