//! Keyword-pattern document classification.
//!
//! # Algorithm
//!
//! 1. Lower-case the filename and content.
//! 2. For each label in the [`PatternTable`] (in table order), count the
//!    keywords found as substrings of either string. The label's score is
//!    `found × 100 / total`.
//! 3. Labels scoring above 10% are reported in `confidence` (rounded).
//! 4. Labels scoring above 20% are detected; the first eight in table
//!    order become `detected_labels`. Higher-scoring labels later in the
//!    table can be cut off.
//! 5. `document_type` is the highest-scoring detected label outside the
//!    quality-indicator set, or `general-document`.
//! 6. `quality_score` uses [`ScoringProfile::Classification`].

use std::collections::BTreeMap;

use tracing::trace;

use crate::models::DocumentAnalysis;
use crate::patterns::PatternTable;
use crate::quality::ScoringProfile;

/// Scores above this percentage appear in `confidence`.
pub const REPORT_THRESHOLD: f64 = 10.0;
/// Scores above this percentage become detected labels.
pub const DETECTION_THRESHOLD: f64 = 20.0;
/// Maximum length of `detected_labels`.
pub const MAX_DETECTED_LABELS: usize = 8;
/// Fallback `document_type` when no eligible label is detected.
pub const GENERAL_DOCUMENT: &str = "general-document";
/// Quality-indicator labels that never become the document type.
pub const RESERVED_TYPE_LABELS: &[&str] = &["high-quality", "educational", "reference-material"];

/// Classifier bound to a pattern table.
#[derive(Debug, Clone, Copy)]
pub struct PatternClassifier<'a> {
    table: &'a PatternTable,
}

impl PatternClassifier<'static> {
    /// Classifier over the built-in table.
    pub fn builtin() -> Self {
        Self {
            table: PatternTable::builtin(),
        }
    }
}

impl Default for PatternClassifier<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> PatternClassifier<'a> {
    pub fn new(table: &'a PatternTable) -> Self {
        Self { table }
    }

    /// Raw per-label scores in table order, as percentages.
    pub fn label_scores(&self, filename: &str, content: &str) -> Vec<(&'a str, f64)> {
        let name = filename.to_lowercase();
        let body = content.to_lowercase();

        self.table
            .patterns()
            .iter()
            .map(|p| {
                let found = p
                    .keywords
                    .iter()
                    .filter(|k| body.contains(k.as_str()) || name.contains(k.as_str()))
                    .count();
                let score = found as f64 * 100.0 / p.keywords.len() as f64;
                (p.label.as_str(), score)
            })
            .collect()
    }

    /// Classify and score one document.
    pub fn classify(&self, filename: &str, content: &str) -> DocumentAnalysis {
        let scores = self.label_scores(filename, content);

        let mut confidence = BTreeMap::new();
        let mut detected_labels = Vec::new();
        let mut best_type: Option<(&str, f64)> = None;

        for (label, score) in &scores {
            if *score > REPORT_THRESHOLD {
                confidence.insert(label.to_string(), score.round() as u8);
            }
            if *score <= DETECTION_THRESHOLD {
                continue;
            }
            if detected_labels.len() < MAX_DETECTED_LABELS {
                detected_labels.push(label.to_string());
            }
            if RESERVED_TYPE_LABELS.contains(label) {
                continue;
            }
            match best_type {
                Some((_, best)) if best >= *score => {}
                _ => best_type = Some((*label, *score)),
            }
        }

        let document_type = best_type
            .map(|(label, _)| label.to_string())
            .unwrap_or_else(|| GENERAL_DOCUMENT.to_string());

        let quality_score =
            ScoringProfile::Classification.score(content, &detected_labels, &confidence);

        trace!(
            filename,
            document_type = %document_type,
            labels = detected_labels.len(),
            quality_score,
            "classified document"
        );

        DocumentAnalysis {
            detected_labels,
            confidence,
            document_type,
            quality_score,
        }
    }
}

/// Classify with the built-in pattern table.
pub fn classify_document(filename: &str, content: &str) -> DocumentAnalysis {
    PatternClassifier::builtin().classify(filename, content)
}
