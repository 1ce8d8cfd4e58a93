//! Persistence of created entries
//!
//! The flow only produces a [`ConfigEntry`]; storing it is up to the host.
//! [`JsonEntryStore`] keeps every entry in a single JSON array file.

use crate::flow::ConfigEntry;
use crate::schema::places::{DOMAIN, ENTRY_VERSION};
use crate::schema::NormalizedValues;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// An entry as written to storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub entry_id: Uuid,
    pub domain: String,
    pub version: u32,
    pub title: String,
    pub data: NormalizedValues,
    pub created_at: DateTime<Utc>,
}

impl StoredEntry {
    pub fn new(entry: ConfigEntry) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            domain: DOMAIN.to_string(),
            version: ENTRY_VERSION,
            title: entry.title,
            data: entry.data,
            created_at: Utc::now(),
        }
    }
}

/// Durable home for created entries
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Store a newly created entry
    async fn create(&self, entry: ConfigEntry) -> Result<StoredEntry>;

    /// All stored entries, oldest first
    async fn list(&self) -> Result<Vec<StoredEntry>>;
}

/// Entry store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonEntryStore {
    path: PathBuf,
}

impl JsonEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location in the per-user data directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "places", "places-setup")
            .map(|dirs| dirs.data_dir().join("entries.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<StoredEntry>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed entry file {}", self.path.display()))
    }
}

#[async_trait]
impl EntryStore for JsonEntryStore {
    async fn create(&self, entry: ConfigEntry) -> Result<StoredEntry> {
        let mut entries = self.read_all().await?;
        let stored = StoredEntry::new(entry);
        entries.push(stored.clone());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::info!(
            "Stored entry {} ({:?}) in {}",
            stored.entry_id,
            stored.title,
            self.path.display()
        );
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<StoredEntry>> {
        self.read_all().await
    }
}
