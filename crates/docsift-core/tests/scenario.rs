//! End-to-end engine scenarios: duplicate check, classification, and
//! corpus metrics over one small veterinary corpus.

use chrono::{Duration, Utc};
use docsift_core::classify::classify_document;
use docsift_core::dedup::check_against_documents;
use docsift_core::metrics::compute_metrics;
use docsift_core::models::{Document, DocumentStatus, DuplicateCheckOptions};
use docsift_core::similarity::{content_similarity, string_similarity};

const ABSTRACT_WORDS: &[&str] = &[
    "canine", "feline", "randomized", "controlled", "trial", "evaluating", "meloxicam",
    "analgesia", "following", "ovariohysterectomy", "dogs", "cats", "enrolled", "across",
    "three", "veterinary", "teaching", "hospitals", "pain", "scores", "measured", "using",
    "glasgow", "composite", "scale", "hours", "postoperative", "treatment", "group", "showed",
    "lower", "rescue", "requirements", "compared", "placebo", "adverse", "events", "mild",
];

/// A ~2500-character clinical-trial abstract with 38 distinct tokens.
fn trial_abstract() -> String {
    let sentence = format!("{}.", ABSTRACT_WORDS.join(" "));
    let mut text = String::new();
    while text.len() < 2500 {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&sentence);
    }
    text
}

fn accepted_corpus() -> Vec<Document> {
    let mut doc = Document::new(
        "vet_study.pdf",
        &trial_abstract(),
        ["surgery".to_string(), "anesthesia".to_string()],
    );
    doc.status = DocumentStatus::Approved;
    vec![doc]
}

#[test]
fn exact_name_duplicate_is_reported() {
    let corpus = accepted_corpus();
    let result = check_against_documents(
        "vet_study.pdf",
        &trial_abstract(),
        &corpus,
        &DuplicateCheckOptions::default(),
    );
    assert!(result.is_duplicate);
    assert_eq!(result.existing_file.as_deref(), Some("vet_study.pdf"));
    assert_eq!(result.reason.as_deref(), Some("exact filename match"));
}

#[test]
fn renamed_near_copy_is_caught_by_content() {
    let corpus = accepted_corpus();
    let variant = format!("{} transient vomiting", trial_abstract());

    assert!(string_similarity("meloxicam_trial_final.pdf", "vet_study.pdf") <= 0.85);
    assert!((content_similarity(&variant, &trial_abstract()) - 0.95).abs() < 1e-9);

    let result = check_against_documents(
        "meloxicam_trial_final.pdf",
        &variant,
        &corpus,
        &DuplicateCheckOptions {
            content_threshold: 0.8,
            ..Default::default()
        },
    );
    assert!(result.is_duplicate);
    assert_eq!(result.existing_file.as_deref(), Some("vet_study.pdf"));
    assert_eq!(result.reason.as_deref(), Some("similar content (95% match)"));
}

#[test]
fn unrelated_document_passes_and_is_classified() {
    let corpus = accepted_corpus();
    let content = "Equine colic surgery case report. The horse presented with acute \
                   abdominal pain; a ventral midline incision under general anesthesia \
                   revealed a large colon volvulus. Postoperative recovery was uneventful \
                   and the owner reported normal appetite at follow-up.";

    let result =
        check_against_documents("colic_case.txt", content, &corpus, &DuplicateCheckOptions::default());
    assert!(!result.is_duplicate);

    let analysis = classify_document("colic_case.txt", content);
    assert!(analysis
        .detected_labels
        .contains(&"surgical-procedure".to_string()));
    assert!(analysis.detected_labels.contains(&"large-animal".to_string()));
    assert!(analysis.detected_labels.len() <= 8);
    assert_ne!(analysis.document_type, "general-document");
    assert!(analysis.quality_score <= 100);

    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json.get("detectedLabels").is_some());
    assert!(json.get("documentType").is_some());
}

#[test]
fn metrics_over_accepted_corpus() {
    let mut corpus = accepted_corpus();
    let mut pending = Document::new("notes.txt", "brief note", Vec::<String>::new());
    pending.created_at = Utc::now() - Duration::days(30);
    corpus.push(pending);

    let report = compute_metrics(&corpus, Utc::now());
    let metrics = report.metrics.expect("non-empty corpus has metrics");
    assert_eq!(metrics.total_documents, 2);
    assert_eq!(metrics.approved_documents, 1);
    assert_eq!(metrics.recent_uploads, 1);
    assert_eq!(metrics.approved_label_distribution["surgery"], 1);
    assert!(metrics.readiness_score <= 100);
    assert!(report
        .issues
        .iter()
        .any(|i| i.title == "Unlabeled documents"));
}
