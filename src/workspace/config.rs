//! Configuration primitives for EssayDesk workspaces.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/EssayDesk/config.toml on Windows
//!   $XDG_DATA_HOME/EssayDesk/config.toml on Linux
//!   ~/Library/Application Support/EssayDesk/config.toml on macOS
//!
//! The config tracks the last active editing session and per-install
//! editor and model preferences.

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Identifier of the session that was active when the app last exited.
    pub last_active_session_id: Option<String>,
    /// Editor behavior defaults (selection rules, undo retention).
    #[serde(default)]
    pub editor: EditorSettings,
    /// Text-generation model preferences.
    #[serde(default)]
    pub model: ModelSettings,
}

/// Editor-related preferences tied to the local install.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Minimum length for a pasted literal passage selection.
    #[serde(default = "default_min_literal_selection")]
    pub min_literal_selection: usize,
    /// Number of undo checkpoints retained per session.
    #[serde(default = "default_undo_retention")]
    pub undo_retention: usize,
    /// Number of leading lines shown when prompting for a selection.
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_literal_selection: default_min_literal_selection(),
            undo_retention: default_undo_retention(),
            preview_lines: default_preview_lines(),
        }
    }
}

const fn default_min_literal_selection() -> usize {
    6
}

const fn default_undo_retention() -> usize {
    20
}

const fn default_preview_lines() -> usize {
    5
}

/// Text-generation settings for the suggestion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Whether remote inference is enabled for this install.
    #[serde(default = "default_remote_allowed")]
    pub remote_allowed: bool,
    /// Provider/model label recorded on consent manifests and events.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Sampling temperature recorded for remote requests.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            remote_allowed: default_remote_allowed(),
            model_name: default_model_name(),
            temperature: default_temperature(),
        }
    }
}

const fn default_remote_allowed() -> bool {
    false
}

fn default_model_name() -> String {
    "local-drafting".to_string()
}

const fn default_temperature() -> f32 {
    0.3
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Returns the root directory where EssayDesk stores data.
///
/// Order of precedence:
/// 1. `ESSAYDESK_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("ESSAYDESK_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("EssayDesk"))
}

/// Returns the config directory under the workspace root.
pub fn config_dir() -> Result<PathBuf> {
    let root = workspace_root()?;
    Ok(root.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

/// Ensures the workspace structure exists (sessions/ and documents/).
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let root = workspace_root()?;
    let sessions_dir = root.join("sessions");
    let documents_dir = root.join("documents");
    fs::create_dir_all(&sessions_dir)?;
    fs::create_dir_all(&documents_dir)?;
    Ok(WorkspacePaths {
        root,
        sessions_dir,
        documents_dir,
    })
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub sessions_dir: PathBuf,
    pub documents_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn session_dir(&self, slug: &str) -> PathBuf {
        self.sessions_dir.join(slug)
    }
}
