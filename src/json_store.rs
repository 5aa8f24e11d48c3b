//! JSON snapshot [`Store`] backend.
//!
//! The whole corpus lives in one pretty-printed JSON file:
//!
//! ```json
//! { "documents": [ { "id": "…", "name": "…", "original_content": "…", … } ] }
//! ```
//!
//! The file is loaded on [`JsonStore::open`] and rewritten after every
//! mutation (write to a sibling temp file, then rename). Document order in
//! the file is insertion order.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use docsift_core::models::{Document, DocumentStatus};
use docsift_core::store::Store;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    documents: Vec<Document>,
}

/// File-backed document store.
pub struct JsonStore {
    path: PathBuf,
    docs: RwLock<Vec<Document>>,
}

impl JsonStore {
    /// Create an empty store file if none exists. Returns `true` if created.
    pub fn init(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        write_snapshot(path, &[])?;
        Ok(true)
    }

    /// Load an existing store file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "store not found: {} (run `dsift init` first)",
                path.display()
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read store file: {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse store file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            docs: RwLock::new(snapshot.documents),
        })
    }
}

fn write_snapshot(path: &Path, documents: &[Document]) -> Result<()> {
    #[derive(Serialize)]
    struct SnapshotRef<'a> {
        documents: &'a [Document],
    }

    let json = serde_json::to_string_pretty(&SnapshotRef { documents })?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("Failed to write store file: {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace store file: {}", path.display()))?;
    Ok(())
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("json store lock poisoned")
}

#[async_trait]
impl Store for JsonStore {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        let docs = self.docs.read().map_err(poisoned)?;
        Ok(docs.clone())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let docs = self.docs.read().map_err(poisoned)?;
        Ok(docs.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_document(&self, doc: &Document) -> Result<String> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        if docs.iter().any(|d| d.id == doc.id) {
            bail!("document already exists: {}", doc.id);
        }
        docs.push(doc.clone());
        if let Err(e) = write_snapshot(&self.path, &docs) {
            docs.pop();
            return Err(e);
        }
        Ok(doc.id.clone())
    }

    async fn set_status(&self, id: &str, status: DocumentStatus) -> Result<bool> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        let Some(doc) = docs.iter_mut().find(|d| d.id == id) else {
            return Ok(false);
        };
        doc.status = status;
        doc.updated_at = Utc::now();
        write_snapshot(&self.path, &docs)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data/store.json");
        assert!(JsonStore::init(&path).unwrap());
        assert!(!JsonStore::init(&path).unwrap());
        let store = JsonStore::open(&path).unwrap();
        assert!(store.list_documents().await.unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_store_errors() {
        let tmp = TempDir::new().unwrap();
        let err = JsonStore::open(&tmp.path().join("missing.json")).err().unwrap();
        assert!(err.to_string().contains("dsift init"));
    }

    #[tokio::test]
    async fn test_mutations_persist_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        JsonStore::init(&path).unwrap();

        let store = JsonStore::open(&path).unwrap();
        let first = Document::new("first.txt", "one", ["a".to_string()]);
        let second = Document::new("second.txt", "two", Vec::<String>::new());
        store.insert_document(&first).await.unwrap();
        store.insert_document(&second).await.unwrap();
        assert!(store
            .set_status(&first.id, DocumentStatus::Approved)
            .await
            .unwrap());

        let reopened = JsonStore::open(&path).unwrap();
        let docs = reopened.list_documents().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "first.txt");
        assert_eq!(docs[0].status, DocumentStatus::Approved);
        assert_eq!(docs[1].status, DocumentStatus::Pending);
        assert!(docs[0].labels.contains("a"));
        assert_eq!(docs[1].content_hash, second.content_hash);
    }

    #[tokio::test]
    async fn test_unknown_id_status_update() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        JsonStore::init(&path).unwrap();
        let store = JsonStore::open(&path).unwrap();
        assert!(!store.set_status("nope", DocumentStatus::Ready).await.unwrap());
    }
}
