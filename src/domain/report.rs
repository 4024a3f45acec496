//! Import outcome reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of one completed import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Correlation id for this import run.
    pub run_id: Uuid,

    /// Target record that received the document.
    pub record_id: String,

    /// Character name from the imported build.
    pub build_name: String,

    /// Number of items written into the document.
    pub items: usize,

    /// When the import completed.
    pub imported_at: DateTime<Utc>,
}

impl ImportReport {
    /// Create a report stamped with the current time.
    pub fn new(run_id: Uuid, record_id: impl Into<String>, build_name: impl Into<String>, items: usize) -> Self {
        Self {
            run_id,
            record_id: record_id.into(),
            build_name: build_name.into(),
            items,
            imported_at: Utc::now(),
        }
    }
}
