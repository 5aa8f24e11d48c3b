//! Per-document quality scoring.
//!
//! Two scoring profiles share one interface, `(content, labels, confidence)
//! -> 0..=100`, but use different breakpoints and caps:
//!
//! | Component | [`ScoringProfile::Classification`] | [`ScoringProfile::Corpus`] |
//! |-----------|------------------|--------|
//! | Length | >5000→25, >2000→20, >1000→15, >500→10, else 5 | >5000→35, >2000→30, >1000→20, >500→15, >100→10, else 5 |
//! | Labels | `min(count × 5, 25)` | distinct: 3+→20, 2→15, 1→10, 0→0 |
//! | Quality indicators | Σ confidence/4, cap 25 | Σ confidence/4 (or 10 if only labeled), cap 20 |
//! | Structure | 3 per marker, cap 25 | 4 per marker, cap 25 |
//!
//! The classification profile scores freshly classified uploads; the corpus
//! profile scores stored documents for [`metrics`](crate::metrics). They
//! are kept separate so neither silently changes the other's scores.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Labels whose classifier confidence earns a quality bonus.
pub const HIGH_SIGNAL_LABELS: &[&str] = &[
    "high-quality",
    "peer-reviewed-journal",
    "clinical-guideline",
    "research-paper",
];

/// Section and layout words that indicate a structured document.
pub const STRUCTURAL_MARKERS: &[&str] = &[
    "abstract",
    "introduction",
    "methodology",
    "results",
    "discussion",
    "conclusion",
    "references",
    "bibliography",
    "table",
    "figure",
    "chart",
];

const MAX_SCORE: f64 = 100.0;

/// Named scoring profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringProfile {
    Classification,
    Corpus,
}

impl ScoringProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Corpus => "corpus",
        }
    }

    pub fn score(
        &self,
        content: &str,
        labels: &[String],
        confidence: &BTreeMap<String, u8>,
    ) -> u8 {
        match self {
            Self::Classification => classification_score(content, labels, confidence),
            Self::Corpus => corpus_score(content, labels, confidence),
        }
    }
}

/// Score a freshly classified document.
pub fn classification_score(
    content: &str,
    labels: &[String],
    confidence: &BTreeMap<String, u8>,
) -> u8 {
    let length = match content.chars().count() {
        n if n > 5000 => 25.0,
        n if n > 2000 => 20.0,
        n if n > 1000 => 15.0,
        n if n > 500 => 10.0,
        _ => 5.0,
    };

    let richness = (labels.len() as f64 * 5.0).min(25.0);

    let indicators: f64 = HIGH_SIGNAL_LABELS
        .iter()
        .filter_map(|l| confidence.get(*l))
        .map(|c| f64::from(*c) / 4.0)
        .sum();

    let structure = structural_markers_present(content) as f64 * 3.0;

    finalize(length + richness + indicators.min(25.0) + structure.min(25.0))
}

/// Score a stored document for corpus metrics.
pub fn corpus_score(content: &str, labels: &[String], confidence: &BTreeMap<String, u8>) -> u8 {
    let length = match content.chars().count() {
        n if n > 5000 => 35.0,
        n if n > 2000 => 30.0,
        n if n > 1000 => 20.0,
        n if n > 500 => 15.0,
        n if n > 100 => 10.0,
        _ => 5.0,
    };

    let distinct: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
    let label_score = match distinct.len() {
        0 => 0.0,
        1 => 10.0,
        2 => 15.0,
        _ => 20.0,
    };

    let indicators: f64 = HIGH_SIGNAL_LABELS
        .iter()
        .map(|l| match confidence.get(*l) {
            Some(c) => f64::from(*c) / 4.0,
            None if distinct.contains(l) => 10.0,
            None => 0.0,
        })
        .sum();

    let structure = structural_markers_present(content) as f64 * 4.0;

    finalize(length + label_score + indicators.min(20.0) + structure.min(25.0))
}

/// Count of [`STRUCTURAL_MARKERS`] found in the lower-cased content.
pub fn structural_markers_present(content: &str) -> usize {
    let lower = content.to_lowercase();
    STRUCTURAL_MARKERS
        .iter()
        .filter(|m| lower.contains(*m))
        .count()
}

fn finalize(total: f64) -> u8 {
    total.min(MAX_SCORE).round() as u8
}

/// Review bucket for a corpus-profile score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBucket {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityBucket {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }
}
