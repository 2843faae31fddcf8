use essaydesk::workspace::SessionManager;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        env::set_var("ESSAYDESK_HOME", workspace.path());
        Self { workspace }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn session_manager(&self) -> SessionManager {
        SessionManager::new().expect("failed to initialize SessionManager for tests")
    }

    /// Writes a `.txt` essay into the workspace and returns its path.
    pub fn write_essay(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.workspace.path().join("essays");
        fs::create_dir_all(&dir).expect("failed to create essays dir");
        let path = dir.join(name);
        fs::write(&path, content).expect("failed to write essay fixture");
        path
    }
}

mod loader_formats;
mod edit_accept_reject;
mod selection_flow;
mod save_naming;
mod undo_history;
mod session_events;
mod consent_remote;
pub mod support;
