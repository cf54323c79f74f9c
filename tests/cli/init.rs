//! Tests for `veil init`, `veil version` and `veil completions`.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_init_prints_usable_key() {
    let t = Test::new();

    let output = t
        .cmd_without_key()
        .args(["init", "--no-banner"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "SAVE THIS KEY");

    let out = stdout(&output);
    let key = out
        .lines()
        .find_map(|l| l.strip_prefix("export MASTER_KEY="))
        .expect("no export line");
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));

    // The printed key works
    let output = t
        .cmd_without_key()
        .env("MASTER_KEY", key)
        .args(["set", "prod", "A", "1"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_init_keys_differ() {
    let t = Test::new();

    let first = stdout(&t.run(&["init", "--no-banner"]));
    let second = stdout(&t.run(&["init", "--no-banner"]));
    assert_ne!(first, second);
}

#[test]
fn test_init_touches_nothing() {
    let t = Test::new();

    assert_success(&t.run(&["init", "--no-banner"]));
    assert!(!t.db_path().exists());
}

#[test]
fn test_init_warns_about_existing_database() {
    let t = Test::with_secrets("prod", &[("A", "1")]);

    t.cmd()
        .args(["init", "--no-banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a database already exists"))
        .stdout(predicate::str::contains("UNREADABLE"));
}

#[test]
fn test_init_with_banner() {
    let t = Test::new();

    t.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("behind the veil"));
}

#[test]
fn test_version_command() {
    let t = Test::new();

    t.cmd_without_key()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("veil version {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions() {
    let t = Test::new();

    for shell in ["bash", "zsh", "fish", "power-shell"] {
        t.cmd_without_key()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("veil"));
    }
}
