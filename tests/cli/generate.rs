//! Tests for `veil generate`.

use crate::support::*;

/// The value printed after `Generated secret: `.
fn generated_value(output: &std::process::Output) -> String {
    stdout(output)
        .lines()
        .find_map(|l| l.strip_prefix("Generated secret: "))
        .expect("no generated value in output")
        .to_string()
}

#[test]
fn test_generate_password_is_stored() {
    let t = Test::new();

    let output = t.run(&["generate", "prod", "DB_PASSWORD"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Stored in prod/DB_PASSWORD");

    let value = generated_value(&output);
    assert_eq!(value.chars().count(), 32);

    let stored = stdout(&t.get("prod", "DB_PASSWORD"));
    assert_eq!(stored.trim_end(), value);
}

#[test]
fn test_generate_password_options() {
    let t = Test::new();

    let output = t.run(&["generate", "prod", "PIN", "--length", "12", "--no-symbols"]);
    assert_success(&output);

    let value = generated_value(&output);
    assert_eq!(value.len(), 12);
    assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_generate_apikey_hex_with_prefix() {
    let t = Test::new();

    let output = t.run(&[
        "generate", "prod", "API_KEY", "--type", "apikey", "--format", "hex", "--length", "16",
        "--prefix", "sk_live_",
    ]);
    assert_success(&output);

    let value = generated_value(&output);
    let hex = value.strip_prefix("sk_live_").expect("missing prefix");
    assert_eq!(hex.len(), 32);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_generate_uuid() {
    let t = Test::new();

    let output = t.run(&["generate", "prod", "ID", "--type", "apikey", "--format", "uuid"]);
    assert_success(&output);

    let value = generated_value(&output);
    assert_eq!(value.len(), 36);
    assert_eq!(value.matches('-').count(), 4);
}

#[test]
fn test_generate_jwt_bits_out_of_range() {
    let t = Test::new();

    let output = t.run(&["generate", "prod", "JWT", "--type", "jwt", "--bits", "64"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid JWT bits 64");

    assert_failure(&t.get("prod", "JWT"));
}

#[test]
fn test_generate_unknown_type() {
    let t = Test::new();

    let output = t.run(&["generate", "prod", "X", "--type", "passphrase"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown generator type: passphrase");
}

#[test]
fn test_generate_to_env_appends() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.run(&["generate", "prod", "SESSION_KEY", "--to-env", ".env"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Appended SESSION_KEY to .env");

    let value = generated_value(&output);
    let contents = t.read(".env");
    assert!(contents.starts_with(SAMPLE_ENV));
    assert!(contents.contains("# Added by veil on "));
    assert!(contents.contains("SESSION_KEY="));
    assert!(contents.contains(&value.replace('"', "\\\"")));
}

#[test]
fn test_generate_to_env_existing_key_warns() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.run(&["generate", "prod", "DEBUG", "--to-env", ".env"]);
    assert_success(&output);
    assert_stdout_contains(&output, "DEBUG already exists in .env, use --force to overwrite");

    // Stored regardless, file untouched
    assert_success(&t.get("prod", "DEBUG"));
    assert_eq!(t.read(".env"), SAMPLE_ENV);
}

#[test]
fn test_generate_to_env_force_updates() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.run(&[
        "generate", "prod", "DEBUG", "--no-symbols", "--to-env", ".env", "--force",
    ]);
    assert_success(&output);
    assert_stdout_contains(&output, "Updated DEBUG in .env");

    let value = generated_value(&output);
    let contents = t.read(".env");
    assert!(contents.contains(&format!("DEBUG={}\n", value)));
    assert_eq!(contents.matches("DEBUG=").count(), 1);
}

#[test]
fn test_generate_to_missing_env_fails_before_storing() {
    let t = Test::new();

    let output = t.run(&["generate", "prod", "TOKEN", "--to-env", ".env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, ".env does not exist");

    assert_failure(&t.get("prod", "TOKEN"));
}
