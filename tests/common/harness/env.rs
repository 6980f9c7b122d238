//! Isolated test environment with temp directory.

use super::{FolioCommand, TestNote};
use folio::domain::{BookEdition, Note};
use folio::store::{NoteRepository, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database and config home.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Notes added through the library land in the same database the CLI
/// commands from [`TestEnv::cmd`] operate on.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Root of the environment
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("folio.db")
    }

    /// Returns the directory used as `XDG_CONFIG_HOME` for spawned commands.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Opens the environment's store directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open store")
    }

    /// Stores a test note and returns it with its assigned index.
    pub fn add_note(&self, test_note: &TestNote) -> Note {
        self.store()
            .create_note(&test_note.to_draft())
            .expect("Failed to create test note")
    }

    /// Adds a book edition to the catalog.
    pub fn add_edition(&self, title: &str) -> BookEdition {
        self.store()
            .add_edition(title)
            .expect("Failed to add edition")
    }

    /// Writes `config.toml` under the environment's config home.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.config_home().join("folio");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Creates a FolioCommand configured for this test environment.
    pub fn cmd(&self) -> FolioCommand {
        FolioCommand::new()
            .config_home(&self.config_home())
            .db(&self.db_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.root().is_dir(), "root should be a directory");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], env.db_path().to_string_lossy());
    }

    #[test]
    fn test_env_add_note_assigns_index() {
        let env = TestEnv::new();
        let first = env.add_note(&TestNote::new("First"));
        let child = env.add_note(&TestNote::new("Child").under(&first));

        assert_eq!(first.index().to_string(), "1");
        assert_eq!(child.index().to_string(), "1.1");
        assert!(env.db_path().exists(), "database should be created");
    }
}
