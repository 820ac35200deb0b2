//! Filesystem-backed document source
//!
//! Layout under the root directory:
//!
//! ```text
//! collections/
//!   dnd5e.items/
//!     collection.json      optional: {"label": "Items", "document_kind": "Item"}
//!     longsword.json       one document per file
//!     dagger.json
//!   world.journal/
//!     ...
//! ```
//!
//! Each sub-directory is a collection keyed by its directory name. Every other
//! `*.json` file is a document; its id is the `_id` field, falling back to the
//! file stem, and its display name is the `name` field. Index order is the
//! sorted file-name order.

use super::traits::DocumentSource;
use crate::domain::{
    CollectionIndex, CollectionInfo, CollectionKey, Document, DocumentId, QuireError, Result,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// File holding a collection's metadata
pub const COLLECTION_MANIFEST: &str = "collection.json";

/// Optional per-collection metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CollectionManifest {
    label: Option<String>,
    document_kind: Option<String>,
}

/// Resolved collection: manifest plus id-to-file map
#[derive(Debug, Clone)]
struct ResolvedCollection {
    document_kind: Option<String>,
    files: HashMap<DocumentId, PathBuf>,
}

/// Document source reading JSON files from a directory tree
#[derive(Debug)]
pub struct FilesystemSource {
    root: PathBuf,
    resolved: Mutex<HashMap<CollectionKey, ResolvedCollection>>,
}

impl FilesystemSource {
    /// Open a source rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Source`] if `root` is not a readable directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let metadata = tokio::fs::metadata(&root).await.map_err(|e| {
            QuireError::Source(format!("cannot open {}: {e}", root.display()))
        })?;

        if !metadata.is_dir() {
            return Err(QuireError::Source(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        tracing::debug!(root = %root.display(), "Opened filesystem document source");

        Ok(Self {
            root,
            resolved: Mutex::new(HashMap::new()),
        })
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, key: &CollectionKey) -> Option<PathBuf> {
        let name = key.as_str();
        if name == "." || name == ".." || name.contains(&['/', '\\'][..]) {
            return None;
        }
        Some(self.root.join(name))
    }

    async fn read_manifest(dir: &Path) -> Result<CollectionManifest> {
        let path = dir.join(COLLECTION_MANIFEST);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                QuireError::Resolution(format!("invalid manifest {}: {e}", path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CollectionManifest::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Sorted paths of every document file in a collection directory
    async fn document_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let is_manifest = path.file_name().is_some_and(|name| name == COLLECTION_MANIFEST);
            if is_json && !is_manifest && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    async fn read_fields(path: &Path) -> std::result::Result<Map<String, Value>, String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
        match serde_json::from_slice::<Value>(&bytes).map_err(|e| e.to_string())? {
            Value::Object(map) => Ok(map),
            _ => Err("document is not a JSON object".to_string()),
        }
    }
}

/// Whether an `_id` can appear in an archive entry name without escaping it
fn is_path_safe_id(id: &str) -> bool {
    !id.contains(&['/', '\\'][..]) && !id.contains("..")
}

/// The id a document file is indexed under
///
/// `_id` values that could escape the archive root fall back to the file stem.
fn document_id_for(path: &Path, fields: &Map<String, Value>) -> Option<DocumentId> {
    if let Some(id) = fields.get("_id").and_then(Value::as_str) {
        if !is_path_safe_id(id) {
            tracing::warn!(
                path = %path.display(),
                document_id = id,
                "Ignoring _id with path separators, using file stem"
            );
        } else if let Ok(id) = DocumentId::new(id) {
            return Some(id);
        }
    }
    let stem = path.file_stem()?.to_str()?;
    DocumentId::new(stem).ok()
}

#[async_trait]
impl DocumentSource for FilesystemSource {
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let mut collections = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "Skipping non-UTF-8 directory");
                continue;
            };
            let Ok(key) = CollectionKey::new(name) else {
                continue;
            };

            let manifest = match Self::read_manifest(&entry.path()).await {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::warn!(
                        collection = %key,
                        error = %e,
                        "Ignoring unreadable collection manifest"
                    );
                    CollectionManifest::default()
                }
            };
            collections.push(CollectionInfo::new(key, manifest.label));
        }

        collections.sort_by(|a, b| a.key.as_str().cmp(b.key.as_str()));
        Ok(collections)
    }

    async fn resolve_collection(&self, key: &CollectionKey) -> Result<Option<CollectionIndex>> {
        let Some(dir) = self.collection_dir(key) else {
            return Ok(None);
        };

        match tokio::fs::metadata(&dir).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let manifest = Self::read_manifest(&dir).await?;
        let mut document_ids = Vec::new();
        let mut files = HashMap::new();

        for path in Self::document_files(&dir).await? {
            let fields = match Self::read_fields(&path).await {
                Ok(fields) => fields,
                Err(e) => {
                    tracing::warn!(
                        collection = %key,
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable document file"
                    );
                    continue;
                }
            };

            let Some(id) = document_id_for(&path, &fields) else {
                continue;
            };

            if files.contains_key(&id) {
                tracing::warn!(
                    collection = %key,
                    document_id = %id,
                    path = %path.display(),
                    "Duplicate document id, keeping first file"
                );
                continue;
            }

            document_ids.push(id.clone());
            files.insert(id, path);
        }

        tracing::debug!(
            collection = %key,
            documents = document_ids.len(),
            "Resolved collection"
        );

        self.resolved.lock().await.insert(
            key.clone(),
            ResolvedCollection {
                document_kind: manifest.document_kind,
                files,
            },
        );

        Ok(Some(CollectionIndex::new(document_ids)))
    }

    async fn fetch_document(&self, key: &CollectionKey, id: &DocumentId) -> Result<Document> {
        let resolved = {
            let cache = self.resolved.lock().await;
            cache.get(key).cloned()
        };

        let resolved = match resolved {
            Some(resolved) => resolved,
            None => {
                if self.resolve_collection(key).await?.is_none() {
                    return Err(QuireError::fetch(
                        key.as_str(),
                        id.as_str(),
                        "collection not found",
                    ));
                }
                self.resolved
                    .lock()
                    .await
                    .get(key)
                    .cloned()
                    .ok_or_else(|| QuireError::fetch(key.as_str(), id.as_str(), "collection not found"))?
            }
        };

        let path = resolved
            .files
            .get(id)
            .ok_or_else(|| QuireError::fetch(key.as_str(), id.as_str(), "not in collection index"))?;

        let fields = Self::read_fields(path)
            .await
            .map_err(|e| QuireError::fetch(key.as_str(), id.as_str(), e))?;

        let mut builder = Document::builder().id(id.clone());
        if let Some(name) = fields.get("name").and_then(Value::as_str) {
            builder = builder.name(name);
        }
        if let Some(kind) = &resolved.document_kind {
            builder = builder.kind(kind.clone());
        }

        builder
            .fields(Value::Object(fields))
            .build()
            .map_err(|e| QuireError::fetch(key.as_str(), id.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use serde_json::json;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn store() -> TempDir {
        let root = TempDir::new().unwrap();

        let items = root.path().join("dnd5e.items");
        std::fs::create_dir(&items).unwrap();
        write(
            &items,
            COLLECTION_MANIFEST,
            r#"{"label": "Items (SRD)", "document_kind": "Item"}"#,
        );
        write(&items, "b-dagger.json", r#"{"_id": "dag1", "name": "Dagger"}"#);
        write(&items, "a-sword.json", r#"{"name": "Longsword", "system": {"weight": 3}}"#);
        write(&items, "notes.txt", "not a document");
        write(&items, "broken.json", "{not json");

        std::fs::create_dir(root.path().join("world.journal")).unwrap();
        write(root.path(), "stray.json", "{}");

        root
    }

    fn key(value: &str) -> CollectionKey {
        CollectionKey::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_list_collections() {
        let root = store();
        let source = FilesystemSource::open(root.path()).await.unwrap();

        let collections = source.list_collections().await.unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].key.as_str(), "dnd5e.items");
        assert_eq!(collections[0].label, "Items (SRD)");
        assert_eq!(collections[1].label, "world.journal");
    }

    #[tokio::test]
    async fn test_resolve_orders_by_file_name() {
        let root = store();
        let source = FilesystemSource::open(root.path()).await.unwrap();

        let index = source.resolve_collection(&key("dnd5e.items")).await.unwrap().unwrap();
        let ids: Vec<&str> = index.document_ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a-sword", "dag1"]);
    }

    #[tokio::test]
    async fn test_resolve_unknown_and_empty() {
        let root = store();
        let source = FilesystemSource::open(root.path()).await.unwrap();

        assert!(source.resolve_collection(&key("missing")).await.unwrap().is_none());
        assert!(source.resolve_collection(&key("../etc")).await.unwrap().is_none());

        let empty = source.resolve_collection(&key("world.journal")).await.unwrap().unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_document() {
        let root = store();
        let source = FilesystemSource::open(root.path()).await.unwrap();
        let items = key("dnd5e.items");
        source.resolve_collection(&items).await.unwrap();

        let doc = source
            .fetch_document(&items, &DocumentId::new("dag1").unwrap())
            .await
            .unwrap();
        assert_eq!(doc.display_name(), "Dagger");
        assert_eq!(doc.display_kind(), "Item");
        assert_eq!(doc.fields.get("_id").and_then(Value::as_str), Some("dag1"));
    }

    #[tokio::test]
    async fn test_fetch_without_prior_resolve() {
        let root = store();
        let source = FilesystemSource::open(root.path()).await.unwrap();

        let doc = source
            .fetch_document(&key("dnd5e.items"), &DocumentId::new("a-sword").unwrap())
            .await
            .unwrap();
        assert_eq!(doc.display_name(), "Longsword");
    }

    #[tokio::test]
    async fn test_fetch_unknown_id_is_fetch_error() {
        let root = store();
        let source = FilesystemSource::open(root.path()).await.unwrap();

        let err = source
            .fetch_document(&key("dnd5e.items"), &DocumentId::new("nope").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, QuireError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_bad_manifest_does_not_hide_other_collections() {
        let root = TempDir::new().unwrap();
        let good = root.path().join("good");
        let bad = root.path().join("bad");
        std::fs::create_dir(&good).unwrap();
        std::fs::create_dir(&bad).unwrap();
        write(&good, "a.json", r#"{"name": "A"}"#);
        write(&bad, COLLECTION_MANIFEST, "{oops");
        write(&bad, "b.json", r#"{"name": "B"}"#);

        let source = FilesystemSource::open(root.path()).await.unwrap();
        let collections = source.list_collections().await.unwrap();
        let keys: Vec<&str> = collections.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["bad", "good"]);
        assert_eq!(collections[0].label, "bad");

        let err = source.resolve_collection(&key("bad")).await.unwrap_err();
        assert!(matches!(err, QuireError::Resolution(_)));
        assert!(source.resolve_collection(&key("good")).await.unwrap().is_some());
    }

    #[test]
    fn test_path_like_ids_fall_back_to_file_stem() {
        let path = Path::new("/store/items/rope.json");
        for id in ["../../x", "a/b", "a\\b", "..", "x..y"] {
            let fields = json!({"_id": id});
            let resolved = document_id_for(path, fields.as_object().unwrap()).unwrap();
            assert_eq!(resolved.as_str(), "rope", "id {id:?}");
        }

        let fields = json!({"_id": "Abc.123"});
        let resolved = document_id_for(path, fields.as_object().unwrap()).unwrap();
        assert_eq!(resolved.as_str(), "Abc.123");
    }

    #[tokio::test]
    async fn test_open_rejects_missing_root() {
        let root = TempDir::new().unwrap();
        let err = FilesystemSource::open(root.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, QuireError::Source(_)));
    }
}
