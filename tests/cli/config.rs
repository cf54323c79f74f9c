//! Tests for configuration through the config file and environment.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_db_path_from_env() {
    let t = Test::new();
    let db = t.path("custom.db");

    t.cmd()
        .env("VEIL_DB_PATH", &db)
        .args(["set", "prod", "A", "1"])
        .assert()
        .success();

    assert!(db.exists());
    assert!(!t.db_path().exists());
}

#[test]
fn test_db_path_from_config_file() {
    let t = Test::new();
    let db = t.path("from-file.db");
    let config = t.write(
        "veil.toml",
        &format!("db_path = {:?}\nstore = \"sqlite\"\n", db.display().to_string()),
    );

    t.cmd()
        .env("VEIL_CONFIG", &config)
        .args(["set", "prod", "A", "1"])
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn test_default_config_location() {
    let t = Test::new();
    let db = t.path("home-config.db");
    let dir = t.home.path().join(".veil");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!("db_path = {:?}\n", db.display().to_string()),
    )
    .unwrap();

    assert_success(&t.set("prod", "A", "1"));
    assert!(db.exists());
}

#[test]
fn test_env_beats_config_file() {
    let t = Test::new();
    let from_file = t.path("file.db");
    let from_env = t.path("env.db");
    let config = t.write(
        "veil.toml",
        &format!("db_path = {:?}\n", from_file.display().to_string()),
    );

    t.cmd()
        .env("VEIL_CONFIG", &config)
        .env("VEIL_DB_PATH", &from_env)
        .args(["set", "prod", "A", "1"])
        .assert()
        .success();

    assert!(from_env.exists());
    assert!(!from_file.exists());
}

#[test]
fn test_unknown_config_key_rejected() {
    let t = Test::new();
    let config = t.write("veil.toml", "database = \"x\"\n");

    t.cmd()
        .env("VEIL_CONFIG", &config)
        .args(["list", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn test_unsupported_store() {
    let t = Test::new();

    t.cmd()
        .env("VEIL_STORE", "postgres")
        .args(["list", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported store type: postgres"));
}
