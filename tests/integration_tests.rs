//! Integration tests for sift
//!
//! These drive the binary end to end. The interactive review screen needs a
//! real terminal, so only its refusal paths are exercised here.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a sift Command with no ambient overrides
fn sift() -> Command {
    let mut cmd = cargo_bin_cmd!("sift");
    for var in ["SIFT_API_BASE", "SIFT_MANIFEST", "SIFT_RECORDS", "SIFT_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper to create a temporary project directory
fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

/// Helper to initialize a sift project in a temp directory
fn init_sift_project(dir: &TempDir) {
    sift()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
}

fn write_manifest(dir: &TempDir, names: &[&str]) {
    let entries: Vec<String> = names
        .iter()
        .map(|n| format!(r#"{{"name":"{n}","link":"https://en.wikipedia.org/wiki/{n}"}}"#))
        .collect();
    fs::write(
        dir.path().join(".sift/manifest.json"),
        format!("[{}]", entries.join(",")),
    )
    .unwrap();
}

const TWO_RECORDS: &str = concat!(
    r#"{"index":0,"name":"Julius Caesar","excerpt":" Julius","reviewed_at":"2026-03-01T10:00:00Z"}"#,
    "\n",
    r#"{"index":1,"name":"Augustus","excerpt":"first, \"Roman\" emperor","reviewed_at":"2026-03-01T10:05:00Z"}"#,
    "\n",
);

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_sift_help() {
        sift()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("review"));
    }

    #[test]
    fn test_sift_version() {
        sift().arg("--version").assert().success();
    }

    #[test]
    fn test_sift_init_creates_structure() {
        let dir = create_temp_project();

        sift()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized sift project"));

        assert!(dir.path().join(".sift").exists());
        assert!(dir.path().join(".sift/logs").exists());
        assert!(dir.path().join(".sift/sift.toml").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join(".sift/manifest.json")).unwrap(),
            "[]\n"
        );
    }

    #[test]
    fn test_sift_init_idempotent() {
        let dir = create_temp_project();
        init_sift_project(&dir);

        sift()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("already initialized"));
    }

    #[test]
    fn test_project_dir_flag() {
        let dir = create_temp_project();

        sift()
            .arg("--project-dir")
            .arg(dir.path())
            .arg("init")
            .assert()
            .success();

        assert!(dir.path().join(".sift").exists());
    }
}

// =============================================================================
// Status and Records Tests
// =============================================================================

mod records {
    use super::*;

    #[test]
    fn test_status_uninitialized() {
        let dir = create_temp_project();

        sift()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not initialized"));
    }

    #[test]
    fn test_status_fresh_project_starts_at_first_document() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        write_manifest(&dir, &["Julius_Caesar", "Augustus", "Tiberius"]);

        sift()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("3 documents"))
            .stdout(predicate::str::contains("0 saved"))
            .stdout(predicate::str::contains("Next document: 1 of 3"));
    }

    #[test]
    fn test_status_resumes_after_last_record() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        write_manifest(&dir, &["Julius_Caesar", "Augustus", "Tiberius", "Caligula"]);
        fs::write(dir.path().join(".sift/records.jsonl"), TWO_RECORDS).unwrap();

        sift()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("2 saved"))
            .stdout(predicate::str::contains("Next document: 3 of 4"));
    }

    #[test]
    fn test_status_finished_review_reports_final_document_pending() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        write_manifest(&dir, &["Julius_Caesar", "Augustus", "Tiberius"]);
        fs::write(dir.path().join(".sift/records.jsonl"), TWO_RECORDS).unwrap();

        sift()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Final document pending confirmation (3 of 3)"))
            .stdout(predicate::str::contains("Next document").not());
    }

    #[test]
    fn test_status_records_cover_shorter_manifest() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        write_manifest(&dir, &["Julius_Caesar", "Augustus"]);
        fs::write(dir.path().join(".sift/records.jsonl"), TWO_RECORDS).unwrap();

        sift()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Every document in the manifest has a record"));
    }

    #[test]
    fn test_status_ignores_torn_final_record() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        write_manifest(&dir, &["Julius_Caesar", "Augustus", "Tiberius"]);
        let torn = format!("{}{}", TWO_RECORDS, r#"{"index":2,"name":"Tib"#);
        fs::write(dir.path().join(".sift/records.jsonl"), torn).unwrap();

        sift()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("2 saved"));
    }

    #[test]
    fn test_records_empty() {
        let dir = create_temp_project();
        init_sift_project(&dir);

        sift()
            .current_dir(dir.path())
            .arg("records")
            .assert()
            .success()
            .stdout(predicate::str::contains("No records saved yet"));
    }

    #[test]
    fn test_records_lists_saved_excerpts() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        fs::write(dir.path().join(".sift/records.jsonl"), TWO_RECORDS).unwrap();

        sift()
            .current_dir(dir.path())
            .arg("records")
            .assert()
            .success()
            .stdout(predicate::str::contains("Julius Caesar"))
            .stdout(predicate::str::contains("Augustus"))
            .stdout(predicate::str::contains("2 record(s)"));
    }

    #[test]
    fn test_records_corrupt_middle_line_fails() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        let corrupt = format!("not json\n{}", TWO_RECORDS);
        fs::write(dir.path().join(".sift/records.jsonl"), corrupt).unwrap();

        sift()
            .current_dir(dir.path())
            .arg("records")
            .assert()
            .failure()
            .stderr(predicate::str::contains("line 1"));
    }

    #[test]
    fn test_export_writes_json_array() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        fs::write(dir.path().join(".sift/records.jsonl"), TWO_RECORDS).unwrap();
        let output = dir.path().join("excerpts.json");

        sift()
            .current_dir(dir.path())
            .arg("export")
            .arg("--output")
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Exported 2 record(s)"));

        let exported: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let rows = exported.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["excerpt"], " Julius");
        assert_eq!(rows[1]["excerpt"], "first, \"Roman\" emperor");
    }

    #[test]
    fn test_reset_force_removes_records() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        let records = dir.path().join(".sift/records.jsonl");
        fs::write(&records, TWO_RECORDS).unwrap();

        sift()
            .current_dir(dir.path())
            .args(["reset", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reset complete"));

        assert!(!records.exists());
    }

    #[test]
    fn test_records_path_from_environment() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        let elsewhere = dir.path().join("elsewhere.jsonl");
        fs::write(&elsewhere, TWO_RECORDS).unwrap();

        sift()
            .current_dir(dir.path())
            .env("SIFT_RECORDS", &elsewhere)
            .arg("records")
            .assert()
            .success()
            .stdout(predicate::str::contains("2 record(s)"));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = create_temp_project();

        sift()
            .current_dir(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("using defaults"))
            .stdout(predicate::str::contains(
                "https://en.wikipedia.org/api/rest_v1",
            ));
    }

    #[test]
    fn test_config_validate_clean() {
        let dir = create_temp_project();
        init_sift_project(&dir);

        sift()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        fs::write(
            dir.path().join(".sift/sift.toml"),
            "[source]\napi_base = \"ftp://example.org\"\ntimeout_secs = 0\n",
        )
        .unwrap();

        sift()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Invalid api_base"))
            .stdout(predicate::str::contains("timeout_secs is 0"));
    }

    #[test]
    fn test_config_init_refuses_to_overwrite() {
        let dir = create_temp_project();
        init_sift_project(&dir);

        sift()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }
}

// =============================================================================
// Review Tests
// =============================================================================

mod review {
    use super::*;

    #[test]
    fn test_review_requires_init() {
        let dir = create_temp_project();

        sift()
            .current_dir(dir.path())
            .arg("review")
            .assert()
            .failure()
            .stderr(predicate::str::contains("not initialized"));
    }

    #[test]
    fn test_review_empty_manifest() {
        let dir = create_temp_project();
        init_sift_project(&dir);

        sift()
            .current_dir(dir.path())
            .arg("review")
            .assert()
            .failure()
            .stderr(predicate::str::contains("has no entries"));
    }

    #[test]
    fn test_review_needs_terminal() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        write_manifest(&dir, &["Julius_Caesar"]);

        sift()
            .current_dir(dir.path())
            .arg("review")
            .assert()
            .failure()
            .stderr(predicate::str::contains("interactive terminal"));
    }

    #[test]
    fn test_review_rejects_malformed_manifest() {
        let dir = create_temp_project();
        init_sift_project(&dir);
        fs::write(
            dir.path().join(".sift/manifest.json"),
            r#"[{"name":"","link":"x"}]"#,
        )
        .unwrap();

        sift()
            .current_dir(dir.path())
            .arg("review")
            .assert()
            .failure()
            .stderr(predicate::str::contains("empty name or link"));
    }
}
