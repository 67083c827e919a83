use assert_cmd::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init", "-q"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn commit_file(dir: &Path, name: &str, content: &str, author: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "."]);
    let name_cfg = format!("user.name={author}");
    let email_cfg = format!("user.email={}@example.com", author.to_lowercase().replace(' ', "."));
    git(
        dir,
        &[
            "-c",
            &name_cfg,
            "-c",
            &email_cfg,
            "commit",
            "-q",
            "-m",
            &format!("add {name}"),
        ],
    );
}

fn blametally() -> Command {
    let mut cmd = Command::cargo_bin("blametally").unwrap();
    cmd.arg("--no-progress").env_remove("RUST_LOG");
    cmd
}

#[test]
fn report_ranks_authors_and_skips_blank_lines() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(
        dir.path(),
        "main.go",
        "package main\n\nfunc main() {\n}\n",
        "Alice Smith",
    );
    commit_file(dir.path(), "pkg/util.go", "package pkg\n", "Bob");

    let out = blametally()
        .arg("--repo")
        .arg(dir.path())
        .args(["--ext", ".go"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = format!(
        "---------------------\n\
         Project: {}\n\
         ---------------------\n\
         Alice Smith: 3 lines\n\
         Bob: 1 lines\n\
         \n\
         ---------------------\n\
         Project: Total\n\
         ---------------------\n\
         Alice Smith: 3 lines\n\
         Bob: 1 lines\n",
        dir.path().display()
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn forbidden_names_and_other_extensions_are_ignored() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "main.go", "package main\n", "Alice");
    commit_file(dir.path(), "settings.go", "package main\nvar x = 1\n", "Mallory");
    commit_file(dir.path(), "config/db.go", "package config\n", "Mallory");
    commit_file(dir.path(), "notes.txt", "hello\n", "Mallory");

    blametally()
        .arg("--repo")
        .arg(dir.path())
        .args(["--ext", ".go", "--forbid", "config", "--forbid", "settings.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice: 1 lines"))
        .stdout(predicate::str::contains("Mallory").not());
}

#[test]
fn totals_sum_across_repositories() {
    if !has_git() {
        return;
    }
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    init_git_repo(first.path());
    init_git_repo(second.path());
    commit_file(first.path(), "a.go", "a\nb\n", "Alice");
    commit_file(second.path(), "b.go", "c\n", "Alice");
    commit_file(second.path(), "c.go", "d\ne\nf\n", "Carol");

    blametally()
        .arg("--repo")
        .arg(first.path())
        .arg("--repo")
        .arg(second.path())
        .args(["--ext", ".go", "--sorted"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Project: Total\n---------------------\nAlice: 3 lines\nCarol: 3 lines\n",
        ));
}

#[test]
fn missing_and_unversioned_roots_do_not_fail_the_run() {
    if !has_git() {
        return;
    }
    let repo = tempdir().unwrap();
    init_git_repo(repo.path());
    commit_file(repo.path(), "main.go", "package main\n", "Alice");
    let plain = tempdir().unwrap();
    fs::write(plain.path().join("main.go"), "package main\n").unwrap();
    let missing = repo.path().join("nope");

    blametally()
        .arg("--repo")
        .arg(&missing)
        .arg("--repo")
        .arg(plain.path())
        .arg("--repo")
        .arg(repo.path())
        .args(["--ext", ".go"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Project: {}\n---------------------\n\n",
            missing.display()
        )))
        .stdout(predicate::str::contains(format!(
            "Project: {}\n---------------------\n\n",
            plain.path().display()
        )))
        .stdout(predicate::str::contains("Alice: 1 lines"))
        .stderr(predicate::str::contains("Error reading directory"));
}

#[test]
fn future_since_date_counts_nothing() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file(dir.path(), "main.go", "package main\n", "Alice");

    blametally()
        .arg("--repo")
        .arg(dir.path())
        .args(["--ext", ".go", "--since", "2999-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice").not());
}

#[test]
fn reversed_date_range_is_an_error() {
    blametally()
        .args(["--repo", ".", "--since", "2022-01-01", "--until", "2021-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("since"));
}
