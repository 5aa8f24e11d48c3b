//! Corpus-level quality metrics and review issues.
//!
//! [`CorpusMetrics::compute`] takes a snapshot of the stored documents and a
//! reference time and returns a [`CorpusReport`]. The result depends only
//! on those two inputs, so recomputing it is idempotent.
//!
//! # Readiness
//!
//! ```text
//! readiness = round(avg_quality × 0.4 + label_coverage% × 0.3 + approved% × 0.3)
//! ```
//!
//! Label coverage here counts every document, whatever its status. The
//! approved-only views are reported separately.
//!
//! # Duplicate risk
//!
//! `duplicate_risk` is `total names − distinct names` (case-insensitive).
//! It only sees filename collisions; content duplicates that slipped past
//! ingestion with different names are not counted.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::PatternClassifier;
use crate::models::{Document, DocumentStatus};
use crate::quality::{QualityBucket, ScoringProfile};

/// Default window for `recent_uploads`.
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;
/// Average content length below which the corpus is flagged as thin.
pub const MIN_AVERAGE_CONTENT_LENGTH: f64 = 500.0;
/// Approved share below which the corpus is flagged as under-reviewed.
pub const MIN_APPROVED_RATIO: f64 = 0.5;

/// Documents with and without at least one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCoverage {
    pub with_labels: usize,
    pub without_labels: usize,
}

impl LabelCoverage {
    pub fn percent(&self) -> f64 {
        let total = self.with_labels + self.without_labels;
        if total == 0 {
            0.0
        } else {
            self.with_labels as f64 * 100.0 / total as f64
        }
    }
}

/// Document counts per [`QualityBucket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentQuality {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl ContentQuality {
    fn record(&mut self, bucket: QualityBucket) {
        match bucket {
            QualityBucket::Excellent => self.excellent += 1,
            QualityBucket::Good => self.good += 1,
            QualityBucket::Fair => self.fair += 1,
            QualityBucket::Poor => self.poor += 1,
        }
    }
}

/// Aggregate metrics over one corpus snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub total_documents: usize,
    pub approved_documents: usize,
    pub pending_documents: usize,
    /// Mean body length in characters, rounded.
    pub average_content_length: u64,
    /// Mean corpus-profile score.
    pub average_quality_score: f64,
    pub label_coverage: LabelCoverage,
    pub approved_label_coverage: LabelCoverage,
    pub label_distribution: BTreeMap<String, usize>,
    pub approved_label_distribution: BTreeMap<String, usize>,
    pub content_quality: ContentQuality,
    /// Classifier `document_type` → count.
    pub type_distribution: BTreeMap<String, usize>,
    /// Filename extension → count.
    pub source_distribution: BTreeMap<String, usize>,
    pub recent_uploads: usize,
    pub duplicate_risk: usize,
    pub readiness_score: u8,
}

/// Severity of a [`QualityIssue`], most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
    Info,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A rule-derived finding meant to drive human remediation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIssue {
    pub kind: IssueKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Metrics plus ranked issues. `metrics` is `None` for an empty corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    pub metrics: Option<QualityMetrics>,
    pub issues: Vec<QualityIssue>,
}

impl CorpusReport {
    pub fn empty() -> Self {
        Self {
            metrics: None,
            issues: Vec::new(),
        }
    }
}

/// Corpus metrics calculator.
#[derive(Debug, Clone, Copy)]
pub struct CorpusMetrics<'a> {
    classifier: PatternClassifier<'a>,
    recent_window: Duration,
}

impl Default for CorpusMetrics<'static> {
    fn default() -> Self {
        Self::new(PatternClassifier::builtin())
    }
}

impl<'a> CorpusMetrics<'a> {
    pub fn new(classifier: PatternClassifier<'a>) -> Self {
        Self {
            classifier,
            recent_window: Duration::days(DEFAULT_RECENT_WINDOW_DAYS),
        }
    }

    pub fn with_recent_window(mut self, window: Duration) -> Self {
        self.recent_window = window;
        self
    }

    /// Compute metrics as of the current wall-clock time.
    pub fn compute_now(&self, corpus: &[Document]) -> CorpusReport {
        self.compute(corpus, Utc::now())
    }

    /// Compute metrics for `corpus` as of `now`.
    pub fn compute(&self, corpus: &[Document], now: DateTime<Utc>) -> CorpusReport {
        if corpus.is_empty() {
            return CorpusReport::empty();
        }

        // A window reaching past the representable range counts everything.
        let recent_cutoff = now.checked_sub_signed(self.recent_window);

        let mut approved = 0usize;
        let mut pending = 0usize;
        let mut total_length = 0usize;
        let mut total_score = 0u64;
        let mut label_coverage = LabelCoverage::default();
        let mut approved_label_coverage = LabelCoverage::default();
        let mut label_distribution = BTreeMap::new();
        let mut approved_label_distribution = BTreeMap::new();
        let mut content_quality = ContentQuality::default();
        let mut type_distribution = BTreeMap::new();
        let mut source_distribution = BTreeMap::new();
        let mut recent_uploads = 0usize;
        let mut distinct_names = HashSet::new();

        for doc in corpus {
            let is_approved = doc.is_approved();
            if is_approved {
                approved += 1;
            }
            if doc.status == DocumentStatus::Pending {
                pending += 1;
            }
            total_length += doc.original_content.chars().count();

            let analysis = self.classifier.classify(&doc.name, &doc.original_content);
            let labels: Vec<String> = doc.labels.iter().cloned().collect();
            let score =
                ScoringProfile::Corpus.score(&doc.original_content, &labels, &analysis.confidence);
            total_score += u64::from(score);
            content_quality.record(QualityBucket::from_score(score));

            record_labels(&mut label_coverage, &mut label_distribution, &labels);
            if is_approved {
                record_labels(
                    &mut approved_label_coverage,
                    &mut approved_label_distribution,
                    &labels,
                );
            }

            *type_distribution.entry(analysis.document_type).or_insert(0) += 1;
            *source_distribution
                .entry(source_of(&doc.name))
                .or_insert(0) += 1;

            if recent_cutoff.map_or(true, |cutoff| doc.created_at >= cutoff) {
                recent_uploads += 1;
            }
            distinct_names.insert(doc.name.to_lowercase());
        }

        let total = corpus.len();
        let average_quality_score = total_score as f64 / total as f64;
        let approved_percent = approved as f64 * 100.0 / total as f64;
        let readiness = average_quality_score * 0.4
            + label_coverage.percent() * 0.3
            + approved_percent * 0.3;

        let metrics = QualityMetrics {
            total_documents: total,
            approved_documents: approved,
            pending_documents: pending,
            average_content_length: (total_length as f64 / total as f64).round() as u64,
            average_quality_score,
            label_coverage,
            approved_label_coverage,
            label_distribution,
            approved_label_distribution,
            content_quality,
            type_distribution,
            source_distribution,
            recent_uploads,
            duplicate_risk: total - distinct_names.len(),
            readiness_score: readiness.round().clamp(0.0, 100.0) as u8,
        };

        debug!(
            total,
            readiness = metrics.readiness_score,
            duplicate_risk = metrics.duplicate_risk,
            "computed corpus metrics"
        );

        let issues = derive_issues(&metrics);
        CorpusReport {
            metrics: Some(metrics),
            issues,
        }
    }
}

/// Compute metrics with the built-in classifier and default window.
pub fn compute_metrics(corpus: &[Document], now: DateTime<Utc>) -> CorpusReport {
    CorpusMetrics::default().compute(corpus, now)
}

fn record_labels(
    coverage: &mut LabelCoverage,
    distribution: &mut BTreeMap<String, usize>,
    labels: &[String],
) {
    if labels.is_empty() {
        coverage.without_labels += 1;
    } else {
        coverage.with_labels += 1;
    }
    for label in labels {
        *distribution.entry(label.clone()).or_insert(0) += 1;
    }
}

/// Lower-cased filename extension, or `unknown`.
fn source_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_lowercase(),
        _ => "unknown".to_string(),
    }
}

/// Apply the fixed issue rules, most severe first.
pub fn derive_issues(metrics: &QualityMetrics) -> Vec<QualityIssue> {
    let mut issues = Vec::new();
    let total = metrics.total_documents;

    if metrics.content_quality.poor > 0 {
        issues.push(QualityIssue {
            kind: IssueKind::Error,
            title: "Poor quality documents".to_string(),
            description: format!(
                "{} of {} documents scored below 40 and are unlikely to be useful as-is.",
                metrics.content_quality.poor, total
            ),
            affected_count: Some(metrics.content_quality.poor),
            action: Some("Review, improve, or remove the lowest-scoring documents".to_string()),
        });
    }

    let unlabeled = metrics.label_coverage.without_labels;
    if unlabeled > 0 {
        issues.push(QualityIssue {
            kind: IssueKind::Warning,
            title: "Unlabeled documents".to_string(),
            description: format!("{} documents have no labels.", unlabeled),
            affected_count: Some(unlabeled),
            action: Some("Run auto-labeling or tag these documents manually".to_string()),
        });
    }

    if metrics.duplicate_risk > 0 {
        issues.push(QualityIssue {
            kind: IssueKind::Warning,
            title: "Possible duplicates".to_string(),
            description: format!(
                "{} documents share a filename with another document.",
                metrics.duplicate_risk
            ),
            affected_count: Some(metrics.duplicate_risk),
            action: Some("Compare same-named documents and remove redundant copies".to_string()),
        });
    }

    if (metrics.average_content_length as f64) < MIN_AVERAGE_CONTENT_LENGTH {
        issues.push(QualityIssue {
            kind: IssueKind::Warning,
            title: "Short documents".to_string(),
            description: format!(
                "Average content length is {} characters.",
                metrics.average_content_length
            ),
            affected_count: None,
            action: Some("Add longer, more complete source documents".to_string()),
        });
    }

    let approved_ratio = metrics.approved_documents as f64 / total.max(1) as f64;
    if approved_ratio < MIN_APPROVED_RATIO {
        issues.push(QualityIssue {
            kind: IssueKind::Info,
            title: "Low approval rate".to_string(),
            description: format!(
                "Only {} of {} documents are approved.",
                metrics.approved_documents, total
            ),
            affected_count: Some(total - metrics.approved_documents),
            action: Some("Review and approve documents that meet the bar".to_string()),
        });
    }

    if metrics.pending_documents > 0 {
        issues.push(QualityIssue {
            kind: IssueKind::Info,
            title: "Documents awaiting review".to_string(),
            description: format!("{} documents are still pending.", metrics.pending_documents),
            affected_count: Some(metrics.pending_documents),
            action: None,
        });
    }

    issues.sort_by_key(|i| i.kind);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn doc(name: &str, content: &str, labels: &[&str], status: DocumentStatus) -> Document {
        let mut d = Document::new(name, content, labels.iter().map(|l| l.to_string()));
        d.status = status;
        d.created_at = now() - Duration::days(30);
        d.updated_at = d.created_at;
        d
    }

    #[test]
    fn test_empty_corpus() {
        let report = compute_metrics(&[], now());
        assert!(report.metrics.is_none());
        assert!(report.issues.is_empty());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"metrics": null, "issues": []}));
    }

    #[test]
    fn test_counts_and_distributions() {
        let corpus = vec![
            doc("a.pdf", &"x".repeat(300), &["surgery"], DocumentStatus::Approved),
            doc("b.PDF", &"y".repeat(700), &[], DocumentStatus::Pending),
            doc("notes", "short", &["surgery", "anesthesia"], DocumentStatus::Rejected),
        ];
        let m = compute_metrics(&corpus, now()).metrics.unwrap();

        assert_eq!(m.total_documents, 3);
        assert_eq!(m.approved_documents, 1);
        assert_eq!(m.pending_documents, 1);
        assert_eq!(m.average_content_length, 335); // (300 + 700 + 5) / 3
        assert_eq!(m.label_coverage, LabelCoverage { with_labels: 2, without_labels: 1 });
        assert_eq!(
            m.approved_label_coverage,
            LabelCoverage { with_labels: 1, without_labels: 0 }
        );
        assert_eq!(m.label_distribution["surgery"], 2);
        assert_eq!(m.approved_label_distribution.get("anesthesia"), None);
        assert_eq!(m.source_distribution["pdf"], 2);
        assert_eq!(m.source_distribution["unknown"], 1);
        assert_eq!(m.type_distribution["general-document"], 3);
        assert_eq!(m.duplicate_risk, 0);
        assert_eq!(m.recent_uploads, 0);
    }

    #[test]
    fn test_duplicate_risk_is_case_insensitive() {
        let corpus = vec![
            doc("Report.csv", "a", &[], DocumentStatus::Approved),
            doc("report.csv", "b", &[], DocumentStatus::Approved),
            doc("REPORT.CSV", "c", &[], DocumentStatus::Approved),
            doc("other.csv", "d", &[], DocumentStatus::Approved),
        ];
        let m = compute_metrics(&corpus, now()).metrics.unwrap();
        assert_eq!(m.duplicate_risk, 2);
    }

    #[test]
    fn test_recent_uploads_window() {
        let mut fresh = doc("fresh.txt", "a", &[], DocumentStatus::Pending);
        fresh.created_at = now() - Duration::days(2);
        let mut edge = doc("edge.txt", "b", &[], DocumentStatus::Pending);
        edge.created_at = now() - Duration::days(7);
        let old = doc("old.txt", "c", &[], DocumentStatus::Pending);

        let corpus = vec![fresh, edge, old];
        let m = compute_metrics(&corpus, now()).metrics.unwrap();
        assert_eq!(m.recent_uploads, 2);

        let narrow = CorpusMetrics::default()
            .with_recent_window(Duration::days(1))
            .compute(&corpus, now())
            .metrics
            .unwrap();
        assert_eq!(narrow.recent_uploads, 0);
    }

    #[test]
    fn test_oversized_window_counts_everything() {
        let corpus = vec![
            doc("a.txt", "a", &[], DocumentStatus::Pending),
            doc("b.txt", "b", &[], DocumentStatus::Approved),
        ];
        let m = CorpusMetrics::default()
            .with_recent_window(Duration::days(100_000_000))
            .compute(&corpus, now())
            .metrics
            .unwrap();
        assert_eq!(m.recent_uploads, 2);
    }

    #[test]
    fn test_readiness_formula() {
        // Two approved, labeled, empty documents: corpus score 5 + 10 = 15.
        let corpus = vec![
            doc("a.txt", "", &["x"], DocumentStatus::Approved),
            doc("b.txt", "", &["y"], DocumentStatus::Approved),
        ];
        let m = compute_metrics(&corpus, now()).metrics.unwrap();
        assert_eq!(m.average_quality_score, 15.0);
        // 15 × 0.4 + 100 × 0.3 + 100 × 0.3 = 66
        assert_eq!(m.readiness_score, 66);
    }

    #[test]
    fn test_readiness_in_range() {
        let long = format!("{} {}", "abstract results discussion conclusion", "z".repeat(6000));
        let corpus = vec![
            doc("a.txt", &long, &["research-paper", "high-quality", "x"], DocumentStatus::Approved),
            doc("b.txt", "", &[], DocumentStatus::Rejected),
        ];
        let m = compute_metrics(&corpus, now()).metrics.unwrap();
        assert!(m.readiness_score <= 100);
    }

    #[test]
    fn test_issue_rules_and_ranking() {
        let corpus = vec![
            doc("dup.txt", "tiny", &[], DocumentStatus::Pending),
            doc("DUP.txt", "tiny too", &["x"], DocumentStatus::Rejected),
        ];
        let report = compute_metrics(&corpus, now());
        let kinds: Vec<IssueKind> = report.issues.iter().map(|i| i.kind).collect();
        let titles: Vec<&str> = report.issues.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(
            titles,
            vec![
                "Poor quality documents",
                "Unlabeled documents",
                "Possible duplicates",
                "Short documents",
                "Low approval rate",
                "Documents awaiting review",
            ]
        );
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
        assert_eq!(report.issues[0].affected_count, Some(2));
    }

    #[test]
    fn test_healthy_corpus_has_no_issues() {
        let body = format!(
            "Abstract introduction methodology results discussion conclusion references. {}",
            "w".repeat(6000)
        );
        let corpus = vec![
            doc("one.txt", &body, &["research-paper", "a", "b"], DocumentStatus::Approved),
            doc("two.txt", &body, &["research-paper", "a", "b"], DocumentStatus::Approved),
        ];
        let report = compute_metrics(&corpus, now());
        let m = report.metrics.as_ref().unwrap();
        assert_eq!(m.content_quality.excellent, 2);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let corpus = vec![
            doc("a.txt", "some text", &["x"], DocumentStatus::Approved),
            doc("b.md", "other text", &[], DocumentStatus::Ready),
        ];
        assert_eq!(compute_metrics(&corpus, now()), compute_metrics(&corpus, now()));
    }
}
