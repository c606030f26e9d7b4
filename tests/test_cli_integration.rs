//! CLI Integration Tests for code-collector
//!
//! These tests execute the binary and verify correct behavior for:
//! - Batch collection and the size gate
//! - Snippet extraction by name
//! - Append mode (no duplicates across runs)
//! - Error handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test directory with sample files
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    fs::write(
        temp_dir.path().join("main.py"),
        r#"import sys

def main():
    print("Hello, World!")
    return 0

if __name__ == "__main__":
    sys.exit(main())
"#,
    )
    .unwrap();

    // 20 lines; calculate_total spans lines 5-15
    fs::write(
        temp_dir.path().join("calc.py"),
        r#"# Billing helpers
import math

TAX = 0.2
def calculate_total(items):
    total = 0
    for item in items:
        price = item.price
        qty = item.qty
        total += price * qty

    if total < 0:
        raise ValueError("negative")
    total = total * (1 + TAX)
    return math.ceil(total)

def unrelated():
    return None

# end
"#,
    )
    .unwrap();

    temp_dir
}

fn collector() -> Command {
    let mut cmd = Command::cargo_bin("code-collector").unwrap();
    cmd.env_remove("CODE_COLLECTOR_LOG");
    cmd
}

#[test]
fn test_version_flag() {
    collector()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_batch_to_stdout() {
    let project = create_test_project();

    collector()
        .arg(project.path())
        .args(["--mode", "batch", "--files", "main.py", "calc.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Project: "))
        .stdout(predicate::str::contains("## 📁 Directory Structure"))
        .stdout(predicate::str::contains("### File: main.py"))
        .stdout(predicate::str::contains("### File: calc.py"))
        .stdout(predicate::str::contains("- Total files: 2"));
}

#[test]
fn test_batch_size_gate_skips_large_file() {
    let project = create_test_project();
    let line = "x = 1  # padding padding padding padding padding padding\n";
    fs::write(project.path().join("big.py"), line.repeat(600 * 1024 / line.len())).unwrap();

    collector()
        .arg(project.path())
        .args(["--mode", "batch", "--files", "main.py", "big.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Total files: 1"))
        .stdout(predicate::str::contains("## ⚠️ Skipped Files"))
        .stdout(predicate::str::contains("### big.py"))
        .stdout(predicate::str::contains("too large"))
        .stdout(predicate::str::contains("### File: big.py").not())
        .stderr(predicate::str::contains("big.py: too large"));
}

#[test]
fn test_snippets_extracts_named_function() {
    let project = create_test_project();

    collector()
        .arg(project.path())
        .args([
            "--mode",
            "snippets",
            "--target",
            "calc.py",
            "--ranges",
            r#"[{"type":"function","name":"calculate_total"}]"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 🧩 Snippets: calc.py"))
        .stdout(predicate::str::contains("### Function: calculate_total"))
        .stdout(predicate::str::contains("    return math.ceil(total)\n```"))
        .stdout(predicate::str::contains("def unrelated").not())
        .stdout(predicate::str::contains("- Total lines: 11"));
}

#[test]
fn test_append_twice_has_no_duplicates() {
    let project = create_test_project();
    let output = project.path().join("context.md");

    for _ in 0..2 {
        collector()
            .arg(project.path())
            .args(["--mode", "batch", "--files", "main.py", "calc.py", "--append", "-o"])
            .arg(&output)
            .assert()
            .success();
    }

    let doc = fs::read_to_string(&output).unwrap();
    assert_eq!(doc.matches("### File: main.py").count(), 1);
    assert_eq!(doc.matches("### File: calc.py").count(), 1);
    assert!(doc.contains("- Total files: 2"));
}

#[test]
fn test_append_snippets_to_batch_document() {
    let project = create_test_project();
    let output = project.path().join("context.md");

    collector()
        .arg(project.path())
        .args(["--mode", "batch", "--files", "main.py", "-o"])
        .arg(&output)
        .assert()
        .success();

    collector()
        .arg(project.path())
        .args([
            "--mode",
            "snippets",
            "--target",
            "calc.py",
            "--ranges",
            r#"[{"type":"lines","start":1,"end":2}]"#,
            "--intent",
            "review billing",
            "--append",
            "-o",
        ])
        .arg(&output)
        .assert()
        .success();

    let doc = fs::read_to_string(&output).unwrap();
    assert!(doc.contains("### File: main.py"));
    assert!(doc.contains("### Lines 1-2"));
    assert!(doc.contains("- Total files: 2"));
    assert!(doc.ends_with("## 💡 Collection Intent\n\n```text\nreview billing\n```\n"));
}

#[test]
fn test_malformed_ranges_fail() {
    let project = create_test_project();

    collector()
        .arg(project.path())
        .args(["--mode", "snippets", "--target", "calc.py", "--ranges", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid extraction ranges"));
}

#[test]
fn test_missing_target_fails() {
    let project = create_test_project();

    collector()
        .arg(project.path())
        .args([
            "--mode",
            "snippets",
            "--target",
            "nope.py",
            "--ranges",
            r#"[{"type":"lines","start":1}]"#,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_batch_without_files_fails() {
    let project = create_test_project();

    collector()
        .arg(project.path())
        .args(["--mode", "batch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--files"));
}

#[test]
fn test_clean_comments_flag() {
    let project = create_test_project();

    collector()
        .arg(project.path())
        .args(["--mode", "batch", "--files", "calc.py", "--clean", "comments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Billing helpers").not())
        .stdout(predicate::str::contains("def calculate_total(items):"));
}
