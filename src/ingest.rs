//! Ingestion pipeline orchestration.
//!
//! Coordinates the full ingest flow: connector → duplicate check →
//! classification → storage. Documents accepted earlier
//! in the same run take part in the duplicate check of later ones, so two
//! copies of a file in one inbox yield one stored document.

use anyhow::Result;
use docsift_core::classify::PatternClassifier;
use docsift_core::dedup::check_against_documents;
use docsift_core::models::{
    content_hash, Document, DocumentAnalysis, DuplicateCheckOptions, DuplicateResult,
};
use docsift_core::patterns::PatternTable;
use docsift_core::store::Store;
use tracing::{debug, info};

use crate::config::Config;
use crate::connector_fs;
use crate::json_store::JsonStore;

/// Result of offering one document to the store.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// Stored as `pending` with the classifier's labels.
    Accepted {
        document: Document,
        analysis: DocumentAnalysis,
    },
    /// Not stored.
    Duplicate(DuplicateResult),
}

impl IngestOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Classifier over `custom` when a pattern file is configured, else the
/// built-in table.
pub fn classifier_for(custom: &Option<PatternTable>) -> PatternClassifier<'_> {
    match custom {
        Some(table) => PatternClassifier::new(table),
        None => PatternClassifier::builtin(),
    }
}

/// Duplicate check over `accepted`, followed by an exact-content fallback.
///
/// The engine's name/content scan decides first, so its reasons and its
/// short-body exclusion always win. When it finds nothing and content
/// checks are enabled, a byte-identical body of at least
/// `min_content_length` characters is still reported as `identical content`
/// (this only matters when `content_threshold` is 1.0, where Jaccard must
/// strictly exceed the threshold).
pub fn screen(
    accepted: &[Document],
    name: &str,
    content: &str,
    options: &DuplicateCheckOptions,
) -> DuplicateResult {
    let result = check_against_documents(name, content, accepted, options);
    if result.is_duplicate || !options.check_content {
        return result;
    }
    if content.chars().count() < options.min_content_length {
        return result;
    }

    let hash = content_hash(content);
    let identical = accepted.iter().find(|d| {
        d.content_hash == hash && d.original_content.chars().count() >= options.min_content_length
    });
    match identical {
        Some(existing) => {
            debug!(name, existing = %existing.name, "identical content hash");
            DuplicateResult::duplicate_of(&existing.name, "identical content".to_string())
        }
        None => result,
    }
}

/// Check, classify, and store a single document.
pub async fn ingest_document(
    store: &dyn Store,
    classifier: &PatternClassifier<'_>,
    options: &DuplicateCheckOptions,
    name: &str,
    content: &str,
) -> Result<IngestOutcome> {
    let accepted = store.accepted_documents().await?;
    let result = screen(&accepted, name, content, options);
    if result.is_duplicate {
        return Ok(IngestOutcome::Duplicate(result));
    }

    let analysis = classifier.classify(name, content);
    let document = Document::new(name, content, analysis.detected_labels.iter().cloned());
    store.insert_document(&document).await?;
    Ok(IngestOutcome::Accepted { document, analysis })
}

/// Run `dsift ingest`: scan the filesystem connector and offer every file
/// to the store.
pub async fn run_ingest(config: &Config, dry_run: bool, limit: Option<usize>) -> Result<()> {
    let store = JsonStore::open(&config.store.path)?;
    let custom = config.load_patterns()?;
    let classifier = classifier_for(&custom);
    let options = config.dedup.options();

    let mut items = connector_fs::scan_filesystem(config)?;

    // Apply --limit
    if let Some(lim) = limit {
        items.truncate(lim);
    }

    let mut accepted = store.accepted_documents().await?;
    let mut accepted_count = 0u64;
    let mut duplicate_count = 0u64;

    for item in &items {
        debug!(path = %item.relative_path, modified_at = %item.modified_at, "screening");
        let result = screen(&accepted, &item.name, &item.content, &options);
        if result.is_duplicate {
            info!(
                path = %item.relative_path,
                existing = result.existing_file.as_deref().unwrap_or(""),
                reason = result.reason.as_deref().unwrap_or(""),
                "duplicate skipped"
            );
            duplicate_count += 1;
            continue;
        }

        let analysis = classifier.classify(&item.name, &item.content);
        let document = Document::new(
            &item.name,
            &item.content,
            analysis.detected_labels.iter().cloned(),
        );
        info!(
            path = %item.relative_path,
            id = %document.id,
            document_type = %analysis.document_type,
            quality_score = analysis.quality_score,
            "accepted"
        );
        if !dry_run {
            store.insert_document(&document).await?;
        }
        accepted.push(document);
        accepted_count += 1;
    }

    if dry_run {
        println!("ingest filesystem (dry-run)");
    } else {
        println!("ingest filesystem");
    }
    println!("  fetched: {} items", items.len());
    println!("  accepted: {}", accepted_count);
    println!("  duplicates: {}", duplicate_count);
    println!("ok");

    Ok(())
}
