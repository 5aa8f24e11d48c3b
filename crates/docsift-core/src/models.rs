//! Core data models shared by the engine and its hosts.
//!
//! [`Document`] is owned by the document store; the engine only reads it.
//! The remaining types are produced fresh by each engine call and are
//! serialized in the camelCase JSON shape consumed by review dashboards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Review status of a stored document.
///
/// Transitions are driven by human review, never by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Ready,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "ready" => Ok(Self::Ready),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => anyhow::bail!(
                "Unknown document status: '{}'. Use pending, ready, approved, or rejected.",
                other
            ),
        }
    }
}

/// A document accepted into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub original_content: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// SHA-256 of `original_content`, hex-encoded.
    #[serde(default)]
    pub content_hash: String,
}

impl Document {
    /// Build a new `pending` document with a fresh UUID and content hash.
    pub fn new(name: &str, content: &str, labels: impl IntoIterator<Item = String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            original_content: content.to_string(),
            labels: labels.into_iter().collect(),
            status: DocumentStatus::Pending,
            created_at: now,
            updated_at: now,
            content_hash: content_hash(content),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == DocumentStatus::Approved
    }
}

/// Hex-encoded SHA-256 of a document body.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Per-invocation duplicate check policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicateCheckOptions {
    pub check_name: bool,
    pub check_content: bool,
    /// Jaccard similarity above which two bodies are duplicates.
    pub content_threshold: f64,
    /// Normalized edit similarity above which two filenames are duplicates.
    pub name_threshold: f64,
    pub case_sensitive: bool,
    /// Bodies shorter than this (in characters) skip the content check.
    pub min_content_length: usize,
}

impl Default for DuplicateCheckOptions {
    fn default() -> Self {
        Self {
            check_name: true,
            check_content: true,
            content_threshold: 0.8,
            name_threshold: 0.85,
            case_sensitive: false,
            min_content_length: 100,
        }
    }
}

/// Outcome of a single duplicate check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateResult {
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DuplicateResult {
    pub fn unique() -> Self {
        Self::default()
    }

    pub fn duplicate_of(existing_file: &str, reason: String) -> Self {
        Self {
            is_duplicate: true,
            existing_file: Some(existing_file.to_string()),
            reason: Some(reason),
        }
    }
}

/// Classification and scoring of one document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    /// Up to eight labels, in pattern-table order.
    pub detected_labels: Vec<String>,
    /// Label → integer percent, for every label scoring above 10%.
    pub confidence: BTreeMap<String, u8>,
    pub document_type: String,
    pub quality_score: u8,
}
