//! Host-side data models.
//!
//! Engine types (`Document`, `DuplicateResult`, `DocumentAnalysis`, …) live
//! in [`docsift_core::models`] and are re-exported here.

use chrono::{DateTime, Utc};

pub use docsift_core::models::{
    Document, DocumentAnalysis, DocumentStatus, DuplicateCheckOptions, DuplicateResult,
};

/// A candidate document produced by a connector, before the duplicate
/// check.
#[derive(Debug, Clone)]
pub struct IncomingDocument {
    /// File name, used for filename duplicate checks and classification.
    pub name: String,
    /// Path relative to the connector root.
    pub relative_path: String,
    pub content: String,
    pub modified_at: DateTime<Utc>,
}
