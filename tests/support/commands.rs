//! Command helper methods for Test.

use std::process::Output;

use assert_cmd::Command;

use super::{Test, MASTER_KEY};

impl Test {
    /// A veil command with the test master key.
    ///
    /// Configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test working directory
    /// - MASTER_KEY set, every other veil variable cleared
    /// - NO_COLOR set for stable output
    pub fn cmd(&self) -> Command {
        let mut cmd = self.cmd_without_key();
        cmd.env("MASTER_KEY", MASTER_KEY);
        cmd
    }

    /// A veil command with no master key in its environment.
    pub fn cmd_without_key(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("veil").expect("failed to find veil binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in ["MASTER_KEY", "VEIL_DB_PATH", "VEIL_STORE", "VEIL_CONFIG", "VEIL_LOG"] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run a veil command with the test master key.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("failed to run veil")
    }

    /// Shortcut for `veil set`.
    pub fn set(&self, vault: &str, name: &str, value: &str) -> Output {
        self.run(&["set", vault, name, value])
    }

    /// Shortcut for `veil get`.
    pub fn get(&self, vault: &str, name: &str) -> Output {
        self.run(&["get", vault, name])
    }

    /// Shortcut for `veil delete`.
    pub fn delete(&self, vault: &str, name: &str) -> Output {
        self.run(&["delete", vault, name])
    }

    /// Shortcut for `veil list`.
    pub fn list(&self, vault: &str) -> Output {
        self.run(&["list", vault])
    }

    /// Shortcut for `veil export` with extra flags.
    pub fn export(&self, vault: &str, flags: &[&str]) -> Output {
        let mut args = vec!["export", vault];
        args.extend_from_slice(flags);
        self.run(&args)
    }

    /// Shortcut for `veil quick` with extra flags.
    pub fn quick(&self, flags: &[&str]) -> Output {
        let mut args = vec!["quick"];
        args.extend_from_slice(flags);
        self.run(&args)
    }
}
