//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn docshot(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docshot"));
    cmd.current_dir(dir)
        .env_remove("DOCSHOT_OUTPUT_DIR")
        .env_remove("DOCSHOT_DENSITY")
        .env_remove("DOCSHOT_FONT")
        .env_remove("DOCSHOT_CHAT_PROGRAM")
        .env_remove("RUST_LOG");
    cmd
}

fn write_lines(path: &Path, count: usize) {
    let body: String = (1..=count).map(|i| format!("const line{i} = {i};\n")).collect();
    fs::write(path, body).expect("write input");
}

fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_cli_version() {
    let tmp = TempDir::new().expect("tmp");
    docshot(tmp.path()).arg("--version").assert().success().stdout(predicate::str::contains("docshot"));
}

#[test]
fn test_cli_help() {
    let tmp = TempDir::new().expect("tmp");
    docshot(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("refs"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn test_render_250_lines_into_nine_pages() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("input.ts"), 250);

    docshot(tmp.path())
        .args(["render", "input.ts", "--lines", "30", "--width", "600", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9 page(s)"))
        .stdout(predicate::str::contains("@docshot/page_001.png"))
        .stdout(predicate::str::contains("@docshot/page_009.png"));

    let expected: Vec<String> = (1..=9).map(|i| format!("page_{i:03}.png")).collect();
    assert_eq!(png_names(&tmp.path().join("docshot")), expected);

    let bytes = fs::read(tmp.path().join("docshot/page_001.png")).expect("read page");
    assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn test_render_rejects_invalid_density() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("a.txt"), 3);

    docshot(tmp.path())
        .args(["render", "a.txt", "--density", "ultra"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid density"));
}

#[test]
fn test_render_rejects_non_numeric_flag() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("a.txt"), 3);

    docshot(tmp.path()).args(["render", "a.txt", "--font-size", "big"]).assert().code(1);
    docshot(tmp.path()).args(["render", "a.txt", "--lines", "0"]).assert().code(1);
}

#[test]
fn test_render_rejects_oversized_canvas() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("a.txt"), 3);

    docshot(tmp.path())
        .args(["render", "a.txt", "--lines", "1000000000", "--no-progress"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds the limit"));
    assert!(!tmp.path().join("docshot").exists());
}

#[test]
fn test_output_dir_env_is_shared_by_render_refs_and_chat() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("a.txt"), 3);

    docshot(tmp.path())
        .env("DOCSHOT_OUTPUT_DIR", "shots")
        .args(["render", "a.txt", "--no-progress"])
        .assert()
        .success();
    assert_eq!(png_names(&tmp.path().join("shots")), vec!["page_001.png"]);

    docshot(tmp.path())
        .env("DOCSHOT_OUTPUT_DIR", "shots")
        .arg("refs")
        .assert()
        .success()
        .stdout("@shots/page_001.png\n");

    docshot(tmp.path())
        .env("DOCSHOT_OUTPUT_DIR", "shots")
        .args(["chat", "--program", "mychat", "--dry-run"])
        .assert()
        .success()
        .stdout("mychat @shots/page_001.png\n");
}

#[test]
fn test_render_batch_removes_top_level_pages() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("one.txt"), 3);
    write_lines(&tmp.path().join("two.txt"), 3);

    docshot(tmp.path()).args(["render", "one.txt", "--no-progress"]).assert().success();
    assert_eq!(png_names(&tmp.path().join("docshot")), vec!["page_001.png"]);

    docshot(tmp.path())
        .args(["render", "one.txt", "two.txt", "--no-progress"])
        .assert()
        .success();
    assert!(png_names(&tmp.path().join("docshot")).is_empty());
    assert_eq!(png_names(&tmp.path().join("docshot/one")), vec!["page_001.png"]);
    assert_eq!(png_names(&tmp.path().join("docshot/two")), vec!["page_001.png"]);
}

#[test]
fn test_render_missing_input() {
    let tmp = TempDir::new().expect("tmp");
    docshot(tmp.path())
        .args(["render", "missing.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("input not found"));
}

#[test]
fn test_render_batch_uses_subdirectories() {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir(tmp.path().join("notes")).expect("mkdir");
    write_lines(&tmp.path().join("notes/alpha.md"), 5);
    write_lines(&tmp.path().join("notes/beta.md"), 45);

    docshot(tmp.path())
        .args(["render", "notes/*.md", "--lines", "20", "--no-progress", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@out/beta/page_003.png"));

    assert_eq!(png_names(&tmp.path().join("out/alpha")), vec!["page_001.png"]);
    assert_eq!(png_names(&tmp.path().join("out/beta")).len(), 3);
}

#[test]
fn test_render_keep_going_reports_aggregate_failure() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("a.txt"), 5);
    write_lines(&tmp.path().join("bad.txt"), 5);
    fs::create_dir(tmp.path().join("docshot")).expect("mkdir");
    // A plain file where the per-input directory should go.
    fs::write(tmp.path().join("docshot/bad"), "blocker").expect("write blocker");

    docshot(tmp.path())
        .args(["render", "a.txt", "bad.txt", "--keep-going", "--no-progress"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 input(s) failed"));

    assert_eq!(png_names(&tmp.path().join("docshot/a")), vec!["page_001.png"]);
}

#[test]
fn test_render_uses_config_file() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("docshot.toml"),
        "output_dir = 'shots'\nlines_per_page = 10\nimage_width = 500\n",
    )
    .expect("write config");
    write_lines(&tmp.path().join("doc.txt"), 25);

    docshot(tmp.path()).args(["render", "doc.txt", "--no-progress"]).assert().success();
    assert_eq!(png_names(&tmp.path().join("shots")).len(), 3);
}

#[test]
fn test_render_writes_manifest() {
    let tmp = TempDir::new().expect("tmp");
    write_lines(&tmp.path().join("doc.txt"), 12);

    docshot(tmp.path())
        .args(["render", "doc.txt", "-l", "5", "--manifest", "--no-timestamp", "--no-progress"])
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("docshot/manifest.json")).expect("manifest");
    let doc: serde_json::Value = serde_json::from_str(&manifest).expect("json");
    assert_eq!(doc["line_count"], serde_json::json!(12));
    assert_eq!(doc["pages"].as_array().map(|p| p.len()), Some(3));
    assert!(doc.get("generated_at").is_none());
}

#[test]
fn test_refs_lists_images_in_order() {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir(tmp.path().join("shots")).expect("mkdir");
    fs::write(tmp.path().join("shots/page_002.png"), b"png").expect("write");
    fs::write(tmp.path().join("shots/page_001.png"), b"png").expect("write");

    docshot(tmp.path())
        .args(["refs", "shots"])
        .assert()
        .success()
        .stdout("@shots/page_001.png @shots/page_002.png\n");
}

#[test]
fn test_refs_errors() {
    let tmp = TempDir::new().expect("tmp");
    docshot(tmp.path())
        .args(["refs", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("directory not found"));

    fs::create_dir(tmp.path().join("empty")).expect("mkdir");
    docshot(tmp.path())
        .args(["refs", "empty"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no images found"));

    fs::write(tmp.path().join("file.png"), b"png").expect("write");
    docshot(tmp.path())
        .args(["refs", "file.png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_chat_dry_run_appends_references() {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir(tmp.path().join("docshot")).expect("mkdir");
    fs::write(tmp.path().join("docshot/page_001.png"), b"png").expect("write");
    fs::write(tmp.path().join("docshot/page_002.png"), b"png").expect("write");

    docshot(tmp.path())
        .args(["chat", "--program", "mychat", "--dry-run", "--", "--model", "fast"])
        .assert()
        .success()
        .stdout("mychat --model fast '@docshot/page_001.png @docshot/page_002.png'\n");
}

#[test]
fn test_chat_help_passthrough_needs_no_images() {
    let tmp = TempDir::new().expect("tmp");
    docshot(tmp.path())
        .args(["chat", "--program", "mychat", "--dry-run", "--", "--help"])
        .assert()
        .success()
        .stdout("mychat --help\n");
}

#[test]
fn test_chat_without_images_fails() {
    let tmp = TempDir::new().expect("tmp");
    docshot(tmp.path())
        .args(["chat", "--program", "mychat", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("directory not found"));
}

#[cfg(unix)]
#[test]
fn test_chat_propagates_exit_code() {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir(tmp.path().join("docshot")).expect("mkdir");
    fs::write(tmp.path().join("docshot/page_001.png"), b"png").expect("write");

    docshot(tmp.path())
        .args(["chat", "--program", "sh", "--", "-c", "exit 4"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("exited with status 4"));
}

#[test]
fn test_chat_missing_program() {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir(tmp.path().join("docshot")).expect("mkdir");
    fs::write(tmp.path().join("docshot/page_001.png"), b"png").expect("write");

    docshot(tmp.path())
        .args(["chat", "--program", "docshot-no-such-chat-program"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("external process error"));
}

#[test]
fn test_presets_lists_all_densities() {
    let tmp = TempDir::new().expect("tmp");
    docshot(tmp.path())
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("high    100 lines/page, 12px font"))
        .stdout(predicate::str::contains("medium  80 lines/page, 14px font"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("low     60 lines/page, 16px font"));
}
