//! Indexed game-content libraries.
//!
//! A library is a named, append-only collection of content entries,
//! addressable by exact-match name or by `Compendium.<namespace>.<key>`
//! structured identifier.
//!
//! # Storage Layout
//!
//! ```text
//! <content dir>/
//! ├── pf2e.ancestries.json      # JSON array of entries
//! ├── pf2e.backgrounds.json
//! ├── pf2e.classes.json
//! ├── pf2e.classfeatures.json
//! └── ...
//! ```

pub mod entry;
pub mod store;

pub use entry::{ContentEntry, EntryRef, Grant};
pub use store::{ContentSource, FsContentStore};
