//! Storage abstraction for Docsift.
//!
//! The [`Store`] trait is the engine's view of the document store: list the
//! accepted corpus, persist a newly accepted document, and record review
//! decisions. Backends are pluggable (in-memory here, a JSON snapshot file
//! in the host crate).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.
//! Listing methods return snapshots in stable insertion order, which keeps
//! duplicate detection deterministic.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Document, DocumentStatus};

/// Abstract document store.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_documents`](Store::list_documents) | Every stored document, any status |
/// | [`accepted_documents`](Store::accepted_documents) | Corpus for duplicate checks (not rejected) |
/// | [`get_document`](Store::get_document) | Fetch one document by ID |
/// | [`insert_document`](Store::insert_document) | Persist a newly accepted document |
/// | [`set_status`](Store::set_status) | Record a human review decision |
#[async_trait]
pub trait Store: Send + Sync {
    /// Snapshot of all documents in insertion order.
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Snapshot of documents that count as accepted: every status except
    /// [`DocumentStatus::Rejected`].
    async fn accepted_documents(&self) -> Result<Vec<Document>> {
        let mut docs = self.list_documents().await?;
        docs.retain(|d| d.status != DocumentStatus::Rejected);
        Ok(docs)
    }

    /// Retrieve a document by ID.
    async fn get_document(&self, id: &str) -> Result<Option<Document>>;

    /// Insert a document, returning its ID. Fails if the ID already exists.
    async fn insert_document(&self, doc: &Document) -> Result<String>;

    /// Update a document's review status. Returns `false` for unknown IDs.
    async fn set_status(&self, id: &str, status: DocumentStatus) -> Result<bool>;
}
