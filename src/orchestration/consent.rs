use crate::workspace::{Session, SessionLayout, SessionManager};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Manifest recorded before any remote-classed generation leaves the machine.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentManifest {
    pub manifest_id: Uuid,
    pub session_id: Uuid,
    pub operation: ConsentOperation,
    pub approval_text: String,
    pub approved_at: DateTime<Utc>,
    pub prompt_manifest: serde_json::Value,
    pub prompt_excerpt: Option<String>,
    pub provider: Option<String>,
    #[serde(default)]
    pub data_categories: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ConsentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    Approved,
    Rejected,
    Revoked,
}

impl Default for ConsentStatus {
    fn default() -> Self {
        Self::Approved
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsentOperation {
    FullRewrite,
    PassageRewrite,
    PassageRephrase,
    PassageExpand,
    PassageRefine,
}

/// File-backed store for consent manifests scoped to a session.
pub struct ConsentStore {
    root: PathBuf,
}

impl ConsentStore {
    pub fn for_session(session: &Session) -> Self {
        let layout = SessionLayout::new(session);
        Self {
            root: layout.consent_manifests_dir,
        }
    }

    /// Writes the manifest to disk and returns the file path.
    pub fn record(&self, manifest: &ConsentManifest) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(format!("{}.json", manifest.manifest_id));
        let data = serde_json::to_vec_pretty(manifest)?;
        fs::write(&path, data)?;
        Ok(path)
    }

    pub fn get(&self, manifest_id: &Uuid) -> Result<Option<ConsentManifest>> {
        let path = self.root.join(format!("{}.json", manifest_id));
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(&path)?;
        let manifest = serde_json::from_slice(&data)?;
        Ok(Some(manifest))
    }

    pub fn latest_for_operation(
        &self,
        operation: ConsentOperation,
    ) -> Result<Option<ConsentManifest>> {
        let mut manifests = self.load_all()?;
        manifests.retain(|m| m.operation == operation);
        manifests.sort_by_key(|m| m.approved_at);
        Ok(manifests.pop())
    }

    pub fn load_all(&self) -> Result<Vec<ConsentManifest>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut manifests = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let manifest = read_manifest(entry.path())?;
            manifests.push(manifest);
        }
        Ok(manifests)
    }
}

fn read_manifest(path: PathBuf) -> Result<ConsentManifest> {
    let data =
        fs::read(&path).with_context(|| format!("Failed reading consent manifest {:?}", path))?;
    let manifest = serde_json::from_slice(&data)
        .with_context(|| format!("Failed parsing consent manifest {:?}", path))?;
    Ok(manifest)
}

/// Convenience helper that validates remote permissions before recording consent.
pub fn require_remote_generation_consent(
    manager: &SessionManager,
    session: &Session,
    operation: ConsentOperation,
    approval_text: &str,
    prompt_manifest: serde_json::Value,
) -> Result<ConsentManifest> {
    if !manager.config.model.remote_allowed {
        anyhow::bail!(
            "Remote inference is disabled for this install. Enable model.remote_allowed in config before proceeding."
        );
    }

    let manifest = ConsentManifest {
        manifest_id: Uuid::new_v4(),
        session_id: session.id,
        operation,
        approval_text: approval_text.to_string(),
        approved_at: Utc::now(),
        prompt_manifest,
        prompt_excerpt: None,
        provider: Some(manager.config.model.model_name.clone()),
        data_categories: vec!["essay_text".into()],
        expires_at: None,
        status: ConsentStatus::Approved,
    };
    let store = ConsentStore::for_session(session);
    store.record(&manifest)?;
    Ok(manifest)
}
