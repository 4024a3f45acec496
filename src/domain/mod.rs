//! Domain types for the importer.
//!
//! This module contains the core data structures:
//! - Build: the external character record fetched from the export service
//! - OutputDocument: the record assembled for the host store
//! - ImportReport: outcome of a completed import

pub mod build;
pub mod document;
pub mod report;

// Re-export commonly used types
pub use build::{is_valid_build_id, Build, BuildId, InvalidBuildId};
pub use document::{ItemId, ItemIdSeq, OutputDocument, OutputItem};
pub use report::ImportReport;
