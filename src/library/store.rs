//! Content library storage.
//!
//! Libraries are addressed by dotted namespace (e.g. `pf2e.ancestries`).
//! The filesystem store keeps one `<namespace>.json` file per library,
//! each holding a JSON array of entries in lookup order.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::entry::ContentEntry;

/// Indexed content store collaborator.
///
/// Entry order within a library defines named-lookup order: first match
/// wins. Entries are never mutated after load, so concurrent readers are
/// safe.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load all entries of the named library. An unknown library yields an
    /// empty collection, not an error.
    async fn get_library(&self, name: &str) -> Result<Vec<ContentEntry>>;

    /// Fetch a single entry by key, if present.
    async fn get_document(&self, name: &str, key: &str) -> Result<Option<ContentEntry>>;
}

/// Filesystem-backed content store.
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Create a store rooted at the given content directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn library_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// List library namespaces present in the store, sorted.
    pub async fn list_libraries(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root)
            .await
            .with_context(|| format!("Failed to read content directory: {}", self.root.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if let Some(stem) = name.strip_suffix(".json") {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl ContentSource for FsContentStore {
    async fn get_library(&self, name: &str) -> Result<Vec<ContentEntry>> {
        let path = self.library_path(name);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read library: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse library JSON: {}", path.display()))
    }

    async fn get_document(&self, name: &str, key: &str) -> Result<Option<ContentEntry>> {
        let entries = self.get_library(name).await?;
        Ok(entries.into_iter().find(|e| e.key == key))
    }
}
