//! Near-duplicate detection against an accepted corpus.
//!
//! [`check_duplicate`] scans the corpus in slice order and stops at the
//! first existing document that matches on any enabled check:
//!
//! 1. **Filename**: exact match (case-folded unless `case_sensitive`), then
//!    normalized edit similarity above `name_threshold`.
//! 2. **Content**: token-set Jaccard above `content_threshold`, only when
//!    both bodies reach `min_content_length` characters.
//!
//! The check is read-only. Callers decide whether a duplicate is rejected,
//! merged, or flagged for review.
//!
//! # Example
//!
//! ```rust
//! use docsift_core::dedup::{check_duplicate, ExistingDocument};
//! use docsift_core::models::DuplicateCheckOptions;
//!
//! let corpus = [ExistingDocument { name: "report.csv", content: "" }];
//! let result = check_duplicate("Report.csv", "", &corpus, &DuplicateCheckOptions::default());
//! assert!(result.is_duplicate);
//! assert_eq!(result.reason.as_deref(), Some("exact filename match"));
//! ```

use tracing::debug;

use crate::models::{Document, DuplicateCheckOptions, DuplicateResult};
use crate::similarity::{content_similarity, string_similarity};

/// The two fields of a stored document the detector reads.
#[derive(Debug, Clone, Copy)]
pub struct ExistingDocument<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a Document> for ExistingDocument<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            name: &doc.name,
            content: &doc.original_content,
        }
    }
}

/// Check `name`/`content` against every document in `corpus`.
pub fn check_duplicate(
    name: &str,
    content: &str,
    corpus: &[ExistingDocument<'_>],
    options: &DuplicateCheckOptions,
) -> DuplicateResult {
    let folded_name = fold(name, options.case_sensitive);
    let content_long_enough = content.chars().count() >= options.min_content_length;

    for existing in corpus {
        if options.check_name {
            let existing_name = fold(existing.name, options.case_sensitive);
            if existing_name == folded_name {
                debug!(name, existing = existing.name, "exact filename match");
                return DuplicateResult::duplicate_of(
                    existing.name,
                    "exact filename match".to_string(),
                );
            }

            let sim = string_similarity(&folded_name, &existing_name);
            if sim > options.name_threshold {
                debug!(name, existing = existing.name, sim, "similar filename");
                return DuplicateResult::duplicate_of(
                    existing.name,
                    format!("similar filename ({}% match)", as_percent(sim)),
                );
            }
        }

        if options.check_content
            && content_long_enough
            && existing.content.chars().count() >= options.min_content_length
        {
            let sim = content_similarity(content, existing.content);
            if sim > options.content_threshold {
                debug!(name, existing = existing.name, sim, "similar content");
                return DuplicateResult::duplicate_of(
                    existing.name,
                    format!("similar content ({}% match)", as_percent(sim)),
                );
            }
        }
    }

    DuplicateResult::unique()
}

/// Convenience wrapper over stored [`Document`]s.
pub fn check_against_documents(
    name: &str,
    content: &str,
    corpus: &[Document],
    options: &DuplicateCheckOptions,
) -> DuplicateResult {
    let existing: Vec<ExistingDocument<'_>> = corpus.iter().map(ExistingDocument::from).collect();
    check_duplicate(name, content, &existing, options)
}

fn fold(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

fn as_percent(sim: f64) -> u32 {
    (sim * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc<'a>(name: &'a str, content: &'a str) -> ExistingDocument<'a> {
        ExistingDocument { name, content }
    }

    fn long_text(words: &[&str]) -> String {
        let mut s = words.join(" ");
        while s.len() < 150 {
            s.push(' ');
            s.push_str(&words.join(" "));
        }
        s
    }

    #[test]
    fn test_empty_corpus_never_duplicate() {
        let result = check_duplicate("a.txt", "anything", &[], &DuplicateCheckOptions::default());
        assert_eq!(result, DuplicateResult::unique());
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_exact_name_case_insensitive() {
        let corpus = [doc("report.csv", "x")];
        let result = check_duplicate("Report.csv", "...", &corpus, &DuplicateCheckOptions::default());
        assert!(result.is_duplicate);
        assert!(result.reason.unwrap().contains("exact"));
        assert_eq!(result.existing_file.as_deref(), Some("report.csv"));
    }

    #[test]
    fn test_case_sensitive_falls_through_to_similarity() {
        let corpus = [doc("report.csv", "x")];
        let options = DuplicateCheckOptions {
            case_sensitive: true,
            ..Default::default()
        };
        // One substitution over ten chars: 90% > 85%.
        let result = check_duplicate("Report.csv", "...", &corpus, &options);
        assert!(result.is_duplicate);
        assert_eq!(result.reason.as_deref(), Some("similar filename (90% match)"));
    }

    #[test]
    fn test_dissimilar_names_not_duplicate() {
        let corpus = [doc("canine_hip_study.pdf", "x")];
        let result = check_duplicate("feline_notes.txt", "y", &corpus, &DuplicateCheckOptions::default());
        assert!(!result.is_duplicate);
    }

    #[test]
    fn test_name_check_disabled() {
        let corpus = [doc("report.csv", "x")];
        let options = DuplicateCheckOptions {
            check_name: false,
            ..Default::default()
        };
        let result = check_duplicate("report.csv", "y", &corpus, &options);
        assert!(!result.is_duplicate);
    }

    #[test]
    fn test_content_duplicate_detected() {
        let body = long_text(&["canine", "hip", "dysplasia", "radiograph", "outcome", "cohort"]);
        let corpus = [doc("first.txt", &body)];
        let result = check_duplicate("second.md", &body, &corpus, &DuplicateCheckOptions::default());
        assert!(result.is_duplicate);
        assert_eq!(result.reason.as_deref(), Some("similar content (100% match)"));
        assert_eq!(result.existing_file.as_deref(), Some("first.txt"));
    }

    #[test]
    fn test_short_content_skipped() {
        let corpus = [doc("first.txt", "identical short body")];
        let result = check_duplicate(
            "second.md",
            "identical short body",
            &corpus,
            &DuplicateCheckOptions::default(),
        );
        assert!(!result.is_duplicate);
    }

    #[test]
    fn test_content_check_disabled() {
        let body = long_text(&["equine", "colic", "surgery", "recovery"]);
        let corpus = [doc("first.txt", &body)];
        let options = DuplicateCheckOptions {
            check_content: false,
            ..Default::default()
        };
        assert!(!check_duplicate("second.md", &body, &corpus, &options).is_duplicate);
    }

    #[test]
    fn test_first_match_wins_in_corpus_order() {
        let corpus = [doc("a.txt", "x"), doc("A.TXT", "y")];
        let result = check_duplicate("a.txt", "z", &corpus, &DuplicateCheckOptions::default());
        assert_eq!(result.existing_file.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_threshold_is_strict() {
        let a = long_text(&["alpha", "beta", "gamma", "delta"]);
        let b = long_text(&["alpha", "beta", "gamma", "epsilon"]);
        // Jaccard = 3/5 = 0.6, not strictly above 0.6.
        let options = DuplicateCheckOptions {
            check_name: false,
            content_threshold: 0.6,
            ..Default::default()
        };
        let corpus = [doc("a.txt", &a)];
        assert!(!check_duplicate("b.txt", &b, &corpus, &options).is_duplicate);
    }

    #[test]
    fn test_name_threshold_is_strict() {
        // "abcd" vs "abcx": one edit over four chars, similarity exactly 0.75.
        let corpus = [doc("abcd", "x")];
        let at = DuplicateCheckOptions {
            check_content: false,
            name_threshold: 0.75,
            ..Default::default()
        };
        assert!(!check_duplicate("abcx", "y", &corpus, &at).is_duplicate);

        let below = DuplicateCheckOptions {
            name_threshold: 0.74,
            ..at
        };
        let result = check_duplicate("abcx", "y", &corpus, &below);
        assert_eq!(result.reason.as_deref(), Some("similar filename (75% match)"));
    }

    #[test]
    fn test_content_at_min_length_is_compared() {
        let options = DuplicateCheckOptions {
            min_content_length: 20,
            ..Default::default()
        };

        let exact = "alpha beta gamma del";
        assert_eq!(exact.chars().count(), 20);
        let corpus = [doc("one.txt", exact)];
        let result = check_duplicate("two.txt", exact, &corpus, &options);
        assert_eq!(result.reason.as_deref(), Some("similar content (100% match)"));

        let short = "alpha beta gamma de";
        assert_eq!(short.chars().count(), 19);
        let corpus = [doc("one.txt", short)];
        assert!(!check_duplicate("two.txt", short, &corpus, &options).is_duplicate);
    }
}
