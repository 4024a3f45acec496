//! Named and id-addressed content resolution.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::document::{ItemIdSeq, OutputItem};
use crate::library::{ContentEntry, ContentSource, EntryRef};

/// Resolves build references against a content source.
///
/// Owns a per-session library cache: each library is loaded at most once
/// for the lifetime of the resolver. The cache is append-only and never
/// shared across import sessions.
///
/// Every lookup failure — absent library, absent entry, malformed
/// identifier — degrades to "contributes nothing". A partial import is the
/// accepted outcome, never a reason to abort.
pub struct ContentResolver<'a, S: ContentSource> {
    source: &'a S,
    cache: HashMap<String, Arc<Vec<ContentEntry>>>,
}

impl<'a, S: ContentSource> ContentResolver<'a, S> {
    /// Create a resolver with an empty cache.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Load a library, reusing the session cache.
    ///
    /// Failed loads are not cached, so a later lookup may retry.
    async fn library(&mut self, name: &str) -> Option<Arc<Vec<ContentEntry>>> {
        if let Some(entries) = self.cache.get(name) {
            return Some(Arc::clone(entries));
        }

        match self.source.get_library(name).await {
            Ok(entries) => {
                let entries = Arc::new(entries);
                self.cache.insert(name.to_string(), Arc::clone(&entries));
                Some(entries)
            }
            Err(err) => {
                warn!(library = name, error = %err, "library load failed, skipping lookup");
                None
            }
        }
    }

    /// First entry whose name matches exactly, in library storage order.
    ///
    /// Case-sensitive, no fuzzy matching; duplicates are not disambiguated.
    pub async fn resolve_named(&mut self, library: &str, name: &str) -> Option<ContentEntry> {
        let entries = self.library(library).await?;
        let found = entries.iter().find(|e| e.name == name).cloned();
        if found.is_none() {
            debug!(library, name, "no entry with that name");
        }
        found
    }

    /// Resolve a structured identifier, yielding `None` for malformed ids
    /// or absent documents.
    pub async fn resolve_uuid(&mut self, uuid: &str) -> Option<ContentEntry> {
        let Some(entry_ref) = EntryRef::parse(uuid) else {
            debug!(uuid, "not a compendium identifier, skipping");
            return None;
        };

        match self
            .source
            .get_document(&entry_ref.library, &entry_ref.key)
            .await
        {
            Ok(found) => {
                if found.is_none() {
                    debug!(%entry_ref, "referenced document not found");
                }
                found
            }
            Err(err) => {
                warn!(%entry_ref, error = %err, "document fetch failed, skipping");
                None
            }
        }
    }

    /// Copy an entry into the output item shape, then resolve every
    /// sub-item granted at level 1 or lower and append its copy.
    ///
    /// Expansion is exactly one level deep: grants of a granted item are
    /// never followed. That cutoff mirrors the game rule that only
    /// level-1-or-lower grants apply at character creation.
    pub async fn expand(&mut self, entry: &ContentEntry, ids: &mut ItemIdSeq) -> Vec<OutputItem> {
        let mut items = vec![OutputItem::from_entry(entry, ids.mint())];

        for grant in entry.grants() {
            if grant.level > 1 {
                continue;
            }
            if let Some(sub) = self.resolve_uuid(&grant.uuid).await {
                items.push(OutputItem::from_entry(&sub, ids.mint()));
            }
        }

        items
    }
}
