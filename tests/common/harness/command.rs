//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since each test binary uses a different subset
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `folio` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
/// Spawned commands never see the caller's `FOLIO_DB` or `FOLIO_LOG`.
pub struct FolioCommand {
    args: Vec<String>,
    config_home: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl FolioCommand {
    /// Creates a new command for the `folio` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_home: None,
            envs: Vec::new(),
        }
    }

    /// Sets the `--db` option.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points the config lookup at `dir` instead of the user's config.
    pub fn config_home(mut self, dir: &Path) -> Self {
        self.config_home = Some(dir.to_path_buf());
        self
    }

    /// Sets an environment variable for the spawned process.
    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("folio").expect("Failed to find folio binary");
        cmd.env_remove("FOLIO_DB").env_remove("FOLIO_LOG");
        if let Some(dir) = &self.config_home {
            cmd.env("XDG_CONFIG_HOME", dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `new` command with a topic.
    pub fn new_note(self, topic: &str) -> Self {
        self.args(["new", topic])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `show` command.
    pub fn show(self, note: &str) -> Self {
        self.args(["show", note])
    }

    /// Configures for the `edit` command.
    pub fn edit(self, note: &str) -> Self {
        self.args(["edit", note])
    }

    /// Configures for the `rm` command.
    pub fn rm(self, note: &str) -> Self {
        self.args(["rm", note])
    }

    /// Configures for the `find` command.
    pub fn find(self) -> Self {
        self.args(["find"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for FolioCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        FolioCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_db() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("x.db");
        let cmd = FolioCommand::new().db(&db);
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], db.to_string_lossy());
    }

    #[test]
    fn test_command_output_success() {
        let output = FolioCommand::new().args(["--help"]).output_success();
        assert!(output.contains("folio") || output.contains("notes"));
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = FolioCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"ls".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
