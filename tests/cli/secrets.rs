//! Tests for `veil set/get/delete/list/vaults/search`.

use crate::support::*;

#[test]
fn test_set_and_get_roundtrip() {
    let t = Test::new();

    let output = t.set("prod", "DATABASE_URL", "postgres://localhost/db");
    assert_success(&output);
    assert_stdout_contains(&output, "stored prod/DATABASE_URL");

    let output = t.get("prod", "DATABASE_URL");
    assert_success(&output);
    assert_eq!(stdout(&output), "postgres://localhost/db\n");
}

#[test]
fn test_roundtrip_awkward_values() {
    let t = Test::new();

    assert_roundtrip(&t, "prod", "SPACES", "hello world");
    assert_roundtrip(&t, "prod", "QUOTES", r#"say "hi""#);
    assert_roundtrip(&t, "prod", "SYMBOLS", "p@ssw0rd!#$%^&*()");
    assert_roundtrip(&t, "prod", "UNICODE", "pässwörd-日本");
}

#[test]
fn test_set_overwrites() {
    let t = Test::with_secrets("prod", &[("KEY", "original")]);

    assert_success(&t.set("prod", "KEY", "replacement"));

    assert_stdout_contains(&t.get("prod", "KEY"), "replacement");
}

#[test]
fn test_vaults_are_separate_namespaces() {
    let t = Test::new();
    assert_success(&t.set("prod", "KEY", "prod-value"));
    assert_success(&t.set("dev", "KEY", "dev-value"));

    assert_stdout_contains(&t.get("prod", "KEY"), "prod-value");
    assert_stdout_contains(&t.get("dev", "KEY"), "dev-value");
}

#[test]
fn test_secrets_persist_in_database() {
    let t = Test::with_secrets("prod", STANDARD_SECRETS);

    assert!(t.db_path().exists());
    for (name, value) in STANDARD_SECRETS {
        assert_stdout_contains(&t.get("prod", name), value);
    }
}

#[test]
fn test_database_holds_no_plaintext() {
    let t = Test::with_secrets("prod", &[("TOKEN", "very-recognisable-plaintext")]);

    let bytes = std::fs::read(t.db_path()).unwrap();
    let haystack = String::from_utf8_lossy(&bytes);
    assert!(!haystack.contains("very-recognisable-plaintext"));
}

#[cfg(unix)]
#[test]
fn test_database_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_secrets("prod", &[("A", "1")]);

    let mode = std::fs::metadata(t.db_path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_get_missing_secret() {
    let t = Test::new();

    let output = t.get("prod", "NOPE");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found: prod/NOPE");
}

#[test]
fn test_delete() {
    let t = Test::with_secrets("prod", &[("A", "1"), ("B", "2")]);

    let output = t.delete("prod", "A");
    assert_success(&output);
    assert_stdout_contains(&output, "deleted prod/A");

    assert_failure(&t.get("prod", "A"));
    assert_success(&t.get("prod", "B"));
}

#[test]
fn test_delete_missing_fails() {
    let t = Test::new();

    let output = t.delete("prod", "GHOST");
    assert_failure(&output);
    assert_stderr_contains(&output, "not found");
}

#[test]
fn test_list_is_sorted() {
    let t = Test::with_secrets("prod", &[("ZED", "1"), ("ALPHA", "2"), ("MIDDLE", "3")]);

    let output = t.list("prod");
    assert_success(&output);
    assert_eq!(stdout(&output), "ALPHA\nMIDDLE\nZED\n");
}

#[test]
fn test_list_empty_vault() {
    let t = Test::new();

    let output = t.list("nothing");
    assert_success(&output);
    assert_stdout_contains(&output, "no secrets in 'nothing'");
}

#[test]
fn test_list_json() {
    let t = Test::with_secrets("prod", &[("B", "1"), ("A", "2")]);

    let output = t.run(&["list", "prod", "--json"]);
    assert_success(&output);

    let names: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_vaults() {
    let t = Test::new();
    assert_success(&t.set("prod", "A", "1"));
    assert_success(&t.set("dev", "A", "1"));
    assert_success(&t.set("staging", "A", "1"));

    let output = t.run(&["vaults"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "dev\nprod\nstaging\n");

    let output = t.run(&["vaults", "--json"]);
    let vaults: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(vaults.len(), 3);
}

#[test]
fn test_search_across_vaults() {
    let t = Test::new();
    assert_success(&t.set("prod", "DB_HOST", "x"));
    assert_success(&t.set("dev", "DB_HOST", "x"));
    assert_success(&t.set("prod", "API_KEY", "x"));

    let output = t.run(&["search", "db_*"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Found 2 matches:");
    assert_stdout_contains(&output, "  dev/DB_HOST");
    assert_stdout_contains(&output, "  prod/DB_HOST");
    assert_stdout_excludes(&output, "API_KEY");
}

#[test]
fn test_search_single_and_no_match() {
    let t = Test::with_secrets("prod", &[("API_KEY", "x")]);

    assert_stdout_contains(&t.run(&["search", "API_?EY"]), "Found 1 match:");
    assert_stdout_contains(&t.run(&["search", "NOTHING*"]), "No matches found");
}

#[test]
fn test_empty_vault_name_rejected() {
    let t = Test::new();

    let output = t.set("", "A", "1");
    assert_failure(&output);
    assert_stderr_contains(&output, "vault cannot be empty");
}
