// tests/integration_test.rs
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const MANIFEST: &str = "{\n  \"name\": \"demo\",\n  \"version\": \"0.9.4\"\n}\n";

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/manifest.json"), MANIFEST).unwrap();
    // An empty local config keeps the run independent of the user's config dir
    fs::write(dir.path().join("releasebump.toml"), "").unwrap();
    dir
}

fn release_bump(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .args(args)
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute release-bump")
}

fn release_bump_with_input(dir: &TempDir, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .args(args)
        .current_dir(dir.path())
        // Keep the user's and the system's git configuration out of the run
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute release-bump");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

/// Initialise a repository at `dir` and commit everything currently in it
fn commit_all(dir: &Path) -> git2::Repository {
    let repo = git2::Repository::init(dir).unwrap();
    {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }
    repo
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn test_help() {
    let dir = workspace();
    let output = release_bump(&dir, &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-bump"));
    assert!(stdout.contains("Bump the manifest version"));
}

#[test]
fn test_version_flag() {
    let dir = workspace();
    let output = release_bump(&dir, &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_directive_fails_without_touching_manifest() {
    let dir = workspace();
    let output = release_bump(&dir, &["major"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("got 'major'"));
    assert_eq!(
        fs::read_to_string(dir.path().join("src/manifest.json")).unwrap(),
        MANIFEST
    );
}

#[test]
fn test_missing_directive_fails() {
    let dir = workspace();
    let output = release_bump(&dir, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("got None"));
}

#[test]
fn test_dry_run_reports_plan() {
    let dir = workspace();
    let output = release_bump(&dir, &["minor", "--dry-run"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("0.9.4"));
    assert!(stdout.contains("0.10.0"));
    assert!(stdout.contains("release-0.10.0"));
    assert_eq!(
        fs::read_to_string(dir.path().join("src/manifest.json")).unwrap(),
        MANIFEST
    );
}

#[test]
fn test_malformed_manifest_version_fails() {
    let dir = workspace();
    fs::write(
        dir.path().join("src/manifest.json"),
        "{\"version\": \"0.9\"}",
    )
    .unwrap();
    let output = release_bump(&dir, &["patch", "--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Version parsing error"));
}

#[test]
fn test_declined_prompt_exits_255_without_changes() {
    let dir = workspace();
    fs::write(dir.path().join("releasebump.toml"), "backend = \"git2\"\n").unwrap();
    let repo = commit_all(dir.path());
    let head_before = repo.head().unwrap().target();
    fs::write(dir.path().join("notes.txt"), "work in progress").unwrap();

    let output = release_bump_with_input(&dir, &["patch"], "n\n");

    assert_eq!(output.status.code(), Some(255));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Uncommitted changes detected"));
    assert!(stdout.trim_end().ends_with("Release cancelled by user."));
    assert_eq!(
        fs::read_to_string(dir.path().join("src/manifest.json")).unwrap(),
        MANIFEST
    );
    assert_eq!(repo.head().unwrap().target(), head_before);
}

#[cfg(unix)]
#[test]
fn test_failed_commit_exits_1_and_keeps_rewrite() {
    use std::os::unix::fs::PermissionsExt;

    if !git_available() {
        eprintln!("git executable not found, skipping");
        return;
    }

    let dir = workspace();
    let repo = commit_all(dir.path());
    let hooks = dir.path().join(".git/hooks");
    fs::create_dir_all(&hooks).unwrap();
    let hook = hooks.join("pre-commit");
    fs::write(&hook, "#!/bin/sh\nexit 1\n").unwrap();
    fs::set_permissions(&hook, fs::Permissions::from_mode(0o755)).unwrap();

    let output = release_bump_with_input(&dir, &["patch"], "");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("git commit"), "stderr: {}", stderr);
    assert_eq!(
        fs::read_to_string(dir.path().join("src/manifest.json")).unwrap(),
        MANIFEST.replace("0.9.4", "0.9.5")
    );
    // Branch creation and staging stay in place
    assert_eq!(repo.head().unwrap().shorthand(), Some("release-0.9.5"));
}

#[test]
fn test_current_version_shown_before_bump_failure() {
    let dir = workspace();
    fs::write(
        dir.path().join("src/manifest.json"),
        "{\"version\": \"0.0.4294967295\"}",
    )
    .unwrap();
    let output = release_bump(&dir, &["patch", "--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Current version"));
    assert!(stdout.contains("0.0.4294967295"));
    assert!(!stdout.contains("Bumped version"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("overflow"));
}
