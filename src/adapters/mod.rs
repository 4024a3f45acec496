//! Adapter interfaces for external services.
//!
//! Adapters provide a unified interface for fetching character builds
//! from export services.

pub mod pathbuilder;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::build::{Build, BuildId};

// Re-export the Pathbuilder adapter
pub use pathbuilder::PathbuilderClient;

/// Source of character builds.
#[async_trait]
pub trait BuildSource: Send + Sync {
    /// Fetch the build exported under the given id.
    ///
    /// Any transport, HTTP, or parse failure is a hard error for the whole
    /// import; there is no partial recovery at this layer.
    async fn fetch_build(&self, id: &BuildId) -> Result<Build>;
}
