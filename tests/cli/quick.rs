//! Tests for `veil quick`.

use std::process::Output;

use crate::support::*;

fn quick_without_key(t: &Test, args: &[&str]) -> Output {
    t.cmd_without_key()
        .arg("quick")
        .args(args)
        .output()
        .expect("failed to run veil quick")
}

#[test]
fn test_quick_needs_no_master_key() {
    let t = Test::new();

    let output = quick_without_key(&t, &[]);
    assert_success(&output);

    let out = stdout(&output);
    let value = out.trim_end().strip_prefix("Generated password: ").unwrap();
    assert_eq!(value.chars().count(), 32);
    assert!(!t.db_path().exists());
}

#[test]
fn test_quick_shorthand_types() {
    let t = Test::new();

    let out = stdout(&t.quick(&["uuid"]));
    let value = out.trim_end().strip_prefix("Generated uuid: ").unwrap();
    assert_eq!(value.len(), 36);

    let out = stdout(&t.quick(&["hex", "--length", "8"]));
    let value = out.trim_end().strip_prefix("Generated hex: ").unwrap();
    assert_eq!(value.len(), 16);
    assert!(value.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_quick_type_flag() {
    let t = Test::new();

    let output = t.quick(&["--type", "jwt", "--bits", "128"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Generated jwt: ");
}

#[test]
fn test_quick_count() {
    let t = Test::new();

    let output = t.quick(&["password", "--count", "3", "--length", "10"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Generated 3 passwords:");
    assert_stdout_contains(&output, "1. ");
    assert_stdout_contains(&output, "3. ");
    assert_stdout_excludes(&output, "4. ");
}

#[test]
fn test_quick_count_out_of_range() {
    let t = Test::new();

    for count in ["0", "101"] {
        let output = t.quick(&["--count", count]);
        assert_failure(&output);
        assert_stderr_contains(&output, "invalid count");
    }
}

#[test]
fn test_quick_template() {
    let t = Test::new();

    let output = t.quick(&["hex", "--template", "export TOKEN={value} # {type}"]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.starts_with("export TOKEN="));
    assert!(out.trim_end().ends_with("# hex"));
}

#[test]
fn test_quick_to_creates_env_file() {
    let t = Test::new();

    let output = t.quick(&["hex", "--to", ".env", "--name", "TOKEN"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Appended TOKEN to .env");

    let contents = t.read(".env");
    assert!(contents.starts_with("# Added by veil on "));
    assert!(contents.contains("TOKEN="));
}

#[test]
fn test_quick_to_existing_key() {
    let t = Test::new();
    t.write(".env", "TOKEN=old\n");

    let output = t.quick(&["--to", ".env", "--name", "TOKEN"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "TOKEN already exists in .env");
    assert_eq!(t.read(".env"), "TOKEN=old\n");

    let output = t.quick(&["hex", "--to", ".env", "--name", "TOKEN", "--force"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Updated TOKEN in .env");
    assert!(!t.read(".env").contains("TOKEN=old"));
}

#[test]
fn test_quick_to_requires_name() {
    let t = Test::new();

    let output = t.quick(&["--to", ".env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--name cannot be empty");
    assert!(!t.path(".env").exists());
}

#[test]
fn test_quick_count_conflicts_with_to() {
    let t = Test::new();

    let output = t.quick(&["--count", "2", "--to", ".env", "--name", "X"]);
    assert_failure(&output);
}

#[test]
fn test_quick_batch() {
    let t = Test::new();
    t.write("batch.json", SAMPLE_BATCH);

    let output = quick_without_key(&t, &["--batch", "batch.json"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Generated 3 secrets:");
    assert_stdout_contains(&output, "DB_PASSWORD: ");
    assert_stdout_contains(&output, "API_TOKEN: sk_");
    assert_stdout_contains(&output, "JWT_SECRET: ");
}

#[test]
fn test_quick_batch_to_env() {
    let t = Test::new();
    t.write("batch.json", SAMPLE_BATCH);
    t.write(".env", "DB_PASSWORD=keep\n");

    let output = t.quick(&["--batch", "batch.json", "--to", ".env"]);
    assert_success(&output);
    assert_stdout_contains(&output, "+ API_TOKEN");
    assert_stdout_contains(&output, "- DB_PASSWORD (already present)");

    let contents = t.read(".env");
    assert!(contents.starts_with("DB_PASSWORD=keep\n\n# Added by veil on "));
    assert!(contents.contains("API_TOKEN=sk_"));
    assert!(contents.contains("JWT_SECRET="));
}

#[test]
fn test_quick_batch_invalid_entry_generates_nothing() {
    let t = Test::new();
    t.write(
        "batch.json",
        r#"{"secrets": [{"name": "OK", "type": "password"}, {"name": "BAD", "type": "nope"}]}"#,
    );

    let output = t.quick(&["--batch", "batch.json", "--to", ".env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown generator type: nope");
    assert!(!t.path(".env").exists());
}

#[test]
fn test_quick_batch_malformed_json() {
    let t = Test::new();
    t.write("batch.json", "{not json");

    let output = t.quick(&["--batch", "batch.json"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "json error");
}
