//! Content store
//!
//! Read-only after construction; share it behind an `Arc` and look up from
//! any number of tasks without locking.

use std::collections::HashMap;

use super::catalog;
use super::model::{ContentInfo, ContentType};
use crate::error::ContentError;

#[derive(Debug, Clone)]
pub struct ContentStore {
    entries: HashMap<String, ContentInfo>,
}

impl ContentStore {
    /// Build the built-in catalog with media URLs rooted at `base_url`
    pub fn initialize(base_url: &str) -> Result<Self, ContentError> {
        Self::from_entries(catalog::build(base_url)?)
    }

    /// Index entries by id, rejecting duplicates and self-containing entries
    pub fn from_entries(entries: impl IntoIterator<Item = ContentInfo>) -> Result<Self, ContentError> {
        let mut indexed = HashMap::new();
        for entry in entries {
            let id = entry.id().to_string();
            if entry.nests(&id) {
                return Err(ContentError::SelfReference(id));
            }
            if indexed.contains_key(&id) {
                return Err(ContentError::DuplicateId(id));
            }
            indexed.insert(id, entry);
        }
        Ok(Self { entries: indexed })
    }

    /// Entry with this id, but only if it also has the stated type
    pub fn lookup(&self, id: &str, content_type: ContentType) -> Option<&ContentInfo> {
        self.entries
            .get(id)
            .filter(|entry| entry.content_type() == content_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
