mod config;
mod layout;

pub use config::{
    config_dir, config_file_path, ensure_workspace_structure, load_or_default, save,
    workspace_root, AppConfig, EditorSettings, ModelSettings, WorkspacePaths,
};
pub use layout::SessionLayout;

use crate::orchestration::{log_event, EventType};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Represents one editing session over one essay file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub slug: String,
    /// File name of the loaded essay (no directory components).
    pub source_name: String,
    /// Full path the essay was loaded from.
    pub source_path: PathBuf,
    /// Directory holding state, undo checkpoints, events, and consent manifests.
    pub session_path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
}

/// Manages sessions, configuration, and storage.
pub struct SessionManager {
    pub config: AppConfig,
    pub paths: WorkspacePaths,
    pub config_path: PathBuf,
}

impl SessionManager {
    pub fn new() -> Result<Self> {
        let paths = ensure_workspace_structure()?;
        let mut config = config::load_or_default()?;
        let config_path = config::config_file_path()?;

        // If no last active session, try to pick the most recent existing one.
        if config.last_active_session_id.is_none() {
            if let Some(last) = Self::discover_sessions(&paths)?.last() {
                config.last_active_session_id = Some(last.id.to_string());
                config::save(&config)?;
            }
        }

        Ok(Self {
            config,
            paths,
            config_path,
        })
    }

    fn discover_sessions(paths: &WorkspacePaths) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        if paths.sessions_dir.exists() {
            for entry in fs::read_dir(&paths.sessions_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    let metadata_path = entry.path().join("session.json");
                    if metadata_path.exists() {
                        let session: Session =
                            serde_json::from_slice(&fs::read(&metadata_path)?)?;
                        sessions.push(session);
                    }
                }
            }
        }
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }

    pub fn list_sessions(&self) -> Result<Vec<Session>> {
        Self::discover_sessions(&self.paths)
    }

    pub fn get_session(&self, session_id: &Uuid) -> Result<Option<Session>> {
        Ok(self
            .list_sessions()?
            .into_iter()
            .find(|s| &s.id == session_id))
    }

    /// Opens a new session for an essay file. The slug is derived from the
    /// file stem with a short random suffix so repeated runs over the same
    /// essay stay distinct on disk.
    pub fn create_session(&mut self, source_path: &Path) -> Result<Session> {
        let source_name = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .context("Essay path is missing a file name")?
            .to_string();
        let stem = source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("essay");
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(|c| (c as char).to_ascii_lowercase())
            .collect();
        let slug = format!("{}-{}", slugify(stem), suffix);
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let session_path = self.paths.session_dir(&slug);
        fs::create_dir_all(&session_path)?;
        let session = Session {
            id,
            slug,
            source_name,
            source_path: source_path.to_path_buf(),
            session_path,
            created_at,
            last_active_at: Some(created_at),
        };
        layout::ensure_session_dirs(&session)?;
        self.persist_session(&session)?;
        log_event(
            self,
            &session,
            EventType::SessionCreated,
            serde_json::json!({ "session_id": session.id, "source": session.source_name }),
        )?;
        self.set_active_session(&session.id)?;
        Ok(session)
    }

    fn persist_session(&self, session: &Session) -> Result<()> {
        let metadata_path = session.session_path.join("session.json");
        fs::create_dir_all(&session.session_path)?;
        fs::write(metadata_path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    pub fn set_active_session(&mut self, session_id: &Uuid) -> Result<()> {
        self.config.last_active_session_id = Some(session_id.to_string());
        // update last_active_at in metadata
        if let Some(mut session) = self.get_session(session_id)? {
            session.last_active_at = Some(Utc::now());
            self.persist_session(&session)?;
        }
        config::save(&self.config)?;
        Ok(())
    }

    pub fn active_session(&self) -> Result<Option<Session>> {
        match &self.config.last_active_session_id {
            Some(id) => {
                let uuid =
                    Uuid::parse_str(id).context("Invalid last_active_session_id in config")?;
                self.get_session(&uuid)
            }
            None => Ok(None),
        }
    }
}

fn slugify(name: &str) -> String {
    let mut slug = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    slug.trim_matches('-').to_string()
}
