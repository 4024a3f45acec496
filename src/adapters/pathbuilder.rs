//! HTTP client for the Pathbuilder export service.
//!
//! The service exposes a single unauthenticated endpoint returning a JSON
//! envelope with the exported build under a `build` field.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::BuildSource;
use crate::domain::build::{Build, BuildId};

/// Default export endpoint.
pub const DEFAULT_SERVICE_URL: &str = "https://www.pathbuilder2e.com/json.php";

/// Client for the build export endpoint.
pub struct PathbuilderClient {
    /// Endpoint URL without the id query parameter
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

/// Response envelope around the exported build.
#[derive(Debug, Deserialize)]
struct ExportEnvelope {
    build: Build,
}

impl PathbuilderClient {
    /// Create a client against a specific endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the export URL for an id.
    fn export_url(&self, id: &BuildId) -> String {
        format!("{}?id={}", self.base_url, id)
    }
}

impl Default for PathbuilderClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}

#[async_trait]
impl BuildSource for PathbuilderClient {
    async fn fetch_build(&self, id: &BuildId) -> Result<Build> {
        let url = self.export_url(id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach build service at {url}"))?
            .error_for_status()
            .with_context(|| format!("Build service rejected request for build {id}"))?;

        let envelope: ExportEnvelope = response
            .json()
            .await
            .context("Failed to parse build service response")?;

        Ok(envelope.build)
    }
}
