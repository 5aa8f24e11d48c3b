//! In-memory [`Store`] implementation for tests and embedding.
//!
//! Uses a `Vec` behind `std::sync::RwLock`, so listing order is insertion
//! order.

use std::sync::RwLock;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Document, DocumentStatus};

use super::Store;

/// In-memory document store.
pub struct InMemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Seed a store with existing documents.
    pub fn with_documents(docs: Vec<Document>) -> Self {
        Self {
            docs: RwLock::new(docs),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

#[async_trait]
impl Store for InMemoryStore {
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
        Ok(doc.id.clone())
    }

    async fn set_status(&self, id: &str, status: DocumentStatus) -> Result<bool> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.status = status;
                doc.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
