//! Import orchestration.
//!
//! One import is a single-shot, linear operation: validate the build id,
//! fetch the build, assemble the document, hand it to the record store.
//! There is no retry, no rollback, and no mid-flight cancellation; the
//! caller either gets a report or an error.

pub mod builder;
pub mod resolver;

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::adapters::BuildSource;
use crate::domain::build::BuildId;
use crate::domain::document::OutputDocument;
use crate::domain::report::ImportReport;
use crate::library::ContentSource;

pub use builder::{map_build, DocumentBuilder};
pub use resolver::ContentResolver;

/// Host record store collaborator.
///
/// Replacing or merging the serialized document into an existing record is
/// owned entirely by the host.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write the serialized document into the target record.
    async fn import_document(&self, record_id: &str, document: &str) -> Result<()>;
}

/// Filesystem-backed record store: one JSON file per record.
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    /// Create a store rooted at the given records directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the record file for an id.
    pub fn record_path(&self, record_id: &str) -> PathBuf {
        self.root.join(format!("{record_id}.json"))
    }
}

#[async_trait]
impl RecordStore for FsRecordStore {
    async fn import_document(&self, record_id: &str, document: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create records directory: {}", self.root.display()))?;

        let path = self.record_path(record_id);
        fs::write(&path, document)
            .await
            .with_context(|| format!("Failed to write record: {}", path.display()))?;

        Ok(())
    }
}

/// Single-shot import service.
///
/// [`Importer::import`] is the surface a host wires its own confirmation
/// UI into: one call per confirmed user request.
pub struct Importer<B, C, R> {
    builds: B,
    content: C,
    records: R,
}

impl<B, C, R> Importer<B, C, R>
where
    B: BuildSource,
    C: ContentSource,
    R: RecordStore,
{
    /// Create an importer over the three collaborators.
    pub fn new(builds: B, content: C, records: R) -> Self {
        Self {
            builds,
            content,
            records,
        }
    }

    /// Fetch the build and assemble its document without writing anything.
    pub async fn preview(&self, build_id: &BuildId) -> Result<OutputDocument> {
        let build = self
            .builds
            .fetch_build(build_id)
            .await
            .with_context(|| format!("Failed to fetch build {build_id}"))?;

        Ok(DocumentBuilder::new(&self.content).build_document(&build).await)
    }

    /// Fetch the build, assemble the document, write it to the target
    /// record. Content lookup misses are skipped silently; fetch and
    /// store failures abort.
    pub async fn import(&self, record_id: &str, build_id: &BuildId) -> Result<ImportReport> {
        let run_id = Uuid::new_v4();
        info!(%run_id, %build_id, record_id, "starting import");

        let build = self
            .builds
            .fetch_build(build_id)
            .await
            .with_context(|| format!("Failed to fetch build {build_id}"))?;

        let document = DocumentBuilder::new(&self.content).build_document(&build).await;
        let items = document.items.len();

        let json = serde_json::to_string(&document).context("Failed to serialize document")?;
        self.records
            .import_document(record_id, &json)
            .await
            .with_context(|| format!("Failed to import into record {record_id}"))?;

        info!(%run_id, items, "import complete");
        Ok(ImportReport::new(run_id, record_id, build.name, items))
    }
}
