//! pbimport - Pathbuilder build importer
//!
//! Imports character builds exported from the Pathbuilder web service into
//! a tabletop-simulation character-record store.
//!
//! # Architecture
//!
//! One import is a single-shot extract-map-load operation:
//! - Fetch the build JSON by six-digit id
//! - Map the flat fields into the record schema
//! - Resolve named content references (ancestry, background, class,
//!   heritage, deity) against local content libraries, expanding sub-items
//!   granted at level 1 or lower
//! - Hand the serialized document to the record store
//!
//! Content lookup misses contribute nothing and never abort the import.
//!
//! # Modules
//!
//! - `adapters`: External service integrations (Pathbuilder)
//! - `import`: Orchestration (Importer, ContentResolver, DocumentBuilder)
//! - `domain`: Data structures (Build, OutputDocument, ImportReport)
//! - `library`: Indexed content libraries
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Import a build into a record
//! pbimport import 123456 --record actor-17
//!
//! # Inspect the mapped document without writing
//! pbimport preview 123456
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod import;
pub mod library;

// Re-export main types at crate root for convenience
pub use adapters::{BuildSource, PathbuilderClient};
pub use domain::{is_valid_build_id, Build, BuildId, ImportReport, InvalidBuildId, OutputDocument};
pub use import::{ContentResolver, DocumentBuilder, FsRecordStore, Importer, RecordStore};
pub use library::{ContentEntry, ContentSource, EntryRef, FsContentStore};
