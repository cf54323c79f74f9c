//! Tests for `veil reset`.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_reset_with_yes() {
    let t = Test::with_secrets("prod", STANDARD_SECRETS);

    t.cmd()
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database wiped successfully."));

    assert_eq!(stdout(&t.run(&["vaults", "--json"])).trim(), "[]");
}

#[test]
fn test_reset_confirmed_on_stdin() {
    let t = Test::with_secrets("prod", &[("A", "1")]);

    t.cmd()
        .arg("reset")
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("type 'yes' to confirm"));

    assert_failure(&t.get("prod", "A"));
}

#[test]
fn test_reset_aborts_without_yes() {
    let t = Test::with_secrets("prod", &[("A", "1")]);

    for answer in ["no\n", "y\n", ""] {
        t.cmd()
            .arg("reset")
            .write_stdin(answer)
            .assert()
            .success()
            .stdout(predicate::str::contains("Aborted."));
    }

    assert_stdout_contains(&t.get("prod", "A"), "1");
}

#[test]
fn test_reset_needs_no_master_key() {
    let t = Test::with_secrets("prod", &[("A", "1")]);

    t.cmd_without_key()
        .args(["reset", "--yes"])
        .assert()
        .success();

    assert_failure(&t.get("prod", "A"));
}
