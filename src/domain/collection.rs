//! Collection descriptors returned by document sources

use super::ids::{CollectionKey, DocumentId};
use serde::{Deserialize, Serialize};

/// Maximum length of a collection's short label
const SHORT_LABEL_CHARS: usize = 16;

/// A collection offered for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Stable key used to resolve the collection
    pub key: CollectionKey,

    /// Human-facing label (falls back to the key)
    pub label: String,
}

impl CollectionInfo {
    /// Create a descriptor; a blank label falls back to the key
    pub fn new(key: CollectionKey, label: Option<String>) -> Self {
        let label = match label {
            Some(label) if !label.trim().is_empty() => label,
            _ => key.as_str().to_string(),
        };
        Self { key, label }
    }

    /// First 16 characters of the label, for compact listings
    pub fn short_label(&self) -> String {
        self.label.chars().take(SHORT_LABEL_CHARS).collect()
    }
}

/// The ordered document index of a resolved collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionIndex {
    /// Document ids in index order
    pub document_ids: Vec<DocumentId>,
}

impl CollectionIndex {
    /// Create an index from ordered ids
    pub fn new(document_ids: Vec<DocumentId>) -> Self {
        Self { document_ids }
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.document_ids.len()
    }

    /// Whether the collection has no documents
    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_key() {
        let info = CollectionInfo::new(CollectionKey::new("world.items").unwrap(), None);
        assert_eq!(info.label, "world.items");

        let info = CollectionInfo::new(
            CollectionKey::new("world.items").unwrap(),
            Some("  ".to_string()),
        );
        assert_eq!(info.label, "world.items");
    }

    #[test]
    fn test_short_label_truncates() {
        let info = CollectionInfo::new(
            CollectionKey::new("srd").unwrap(),
            Some("System Reference Document Monsters".to_string()),
        );
        assert_eq!(info.short_label(), "System Reference");
    }

    #[test]
    fn test_index_len() {
        let index = CollectionIndex::new(vec![DocumentId::new("a").unwrap()]);
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
        assert!(CollectionIndex::default().is_empty());
    }
}
