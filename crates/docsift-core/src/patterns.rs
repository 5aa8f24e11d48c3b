//! Keyword pattern table for document labeling.
//!
//! A [`PatternTable`] is an ordered list of labels, each with the keyword
//! phrases that signal it. Order is significant: the classifier reports
//! labels in table order and truncates to the first eight. The built-in
//! table is constructed once per process; hosts may load a replacement
//! (it deserializes from `[[patterns]]` TOML/JSON arrays).

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One label and the phrases that count toward it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPattern {
    pub label: String,
    pub keywords: Vec<String>,
}

impl LabelPattern {
    fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered label → keywords table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPatternTable")]
pub struct PatternTable {
    patterns: Vec<LabelPattern>,
}

#[derive(Deserialize)]
struct RawPatternTable {
    patterns: Vec<LabelPattern>,
}

impl TryFrom<RawPatternTable> for PatternTable {
    type Error = anyhow::Error;

    fn try_from(raw: RawPatternTable) -> Result<Self> {
        PatternTable::new(raw.patterns)
    }
}

static BUILTIN: LazyLock<PatternTable> = LazyLock::new(PatternTable::default_patterns);

impl PatternTable {
    /// Build a table, lower-casing keywords.
    ///
    /// Rejects empty tables, duplicate labels, and labels without keywords
    /// (a label with no keywords has no defined confidence).
    pub fn new(patterns: Vec<LabelPattern>) -> Result<Self> {
        if patterns.is_empty() {
            bail!("pattern table must contain at least one label");
        }
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(patterns.len());
        for p in patterns {
            let label = p.label.trim().to_string();
            if label.is_empty() {
                bail!("pattern label must not be empty");
            }
            if !seen.insert(label.clone()) {
                bail!("duplicate pattern label: '{}'", label);
            }
            let keywords: Vec<String> = p
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                bail!("pattern label '{}' has no keywords", label);
            }
            normalized.push(LabelPattern { label, keywords });
        }
        Ok(Self {
            patterns: normalized,
        })
    }

    /// The process-wide built-in table.
    pub fn builtin() -> &'static PatternTable {
        &BUILTIN
    }

    pub fn patterns(&self) -> &[LabelPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&LabelPattern> {
        self.patterns.iter().find(|p| p.label == label)
    }

    fn default_patterns() -> Self {
        let patterns = vec![
            // Academic
            LabelPattern::new(
                "research-paper",
                &["abstract", "methodology", "results", "discussion", "conclusion", "hypothesis", "study", "findings"],
            ),
            LabelPattern::new(
                "peer-reviewed-journal",
                &["journal", "peer-reviewed", "peer reviewed", "doi", "volume", "issue", "published", "editor"],
            ),
            LabelPattern::new(
                "literature-review",
                &["literature review", "systematic review", "meta-analysis", "review of", "prior studies", "databases searched"],
            ),
            LabelPattern::new(
                "thesis",
                &["thesis", "dissertation", "supervisor", "candidate", "degree", "chapter"],
            ),
            LabelPattern::new(
                "case-study",
                &["case study", "case report", "presented with", "history of", "diagnosis", "follow-up"],
            ),
            // Educational
            LabelPattern::new(
                "lecture-notes",
                &["lecture", "notes", "week", "module", "slide", "course"],
            ),
            LabelPattern::new(
                "textbook",
                &["chapter", "exercises", "textbook", "edition", "glossary", "learning objectives"],
            ),
            LabelPattern::new(
                "tutorial",
                &["tutorial", "step", "how to", "example", "guide", "beginner"],
            ),
            LabelPattern::new(
                "exam-material",
                &["exam", "question", "answer", "quiz", "marks", "multiple choice"],
            ),
            // Professional
            LabelPattern::new(
                "technical-report",
                &["report", "technical", "specification", "analysis", "summary", "recommendation"],
            ),
            LabelPattern::new(
                "business-document",
                &["business", "revenue", "market", "strategy", "stakeholder", "budget"],
            ),
            LabelPattern::new(
                "legal-document",
                &["agreement", "contract", "party", "clause", "liability", "hereby"],
            ),
            LabelPattern::new(
                "meeting-notes",
                &["meeting", "agenda", "minutes", "attendees", "action items", "next steps"],
            ),
            LabelPattern::new(
                "policy-document",
                &["policy", "procedure", "compliance", "guidelines", "scope", "responsibilities"],
            ),
            // Web
            LabelPattern::new(
                "web-article",
                &["blog", "posted", "comments", "share", "subscribe", "article"],
            ),
            LabelPattern::new(
                "news-article",
                &["news", "reported", "according to", "breaking", "press release", "correspondent"],
            ),
            LabelPattern::new(
                "documentation",
                &["documentation", "installation", "configuration", "api", "usage", "reference"],
            ),
            LabelPattern::new("faq", &["faq", "frequently asked", "question", "answer"]),
            // Veterinary
            LabelPattern::new(
                "veterinary-medicine",
                &["veterinary", "animal", "vet", "clinic", "species", "owner"],
            ),
            LabelPattern::new(
                "small-animal",
                &["canine", "feline", "dog", "cat", "puppy", "kitten"],
            ),
            LabelPattern::new(
                "large-animal",
                &["equine", "bovine", "horse", "cattle", "livestock", "herd"],
            ),
            LabelPattern::new(
                "surgical-procedure",
                &["surgery", "surgical", "anesthesia", "incision", "suture", "postoperative", "operative", "anaesthesia"],
            ),
            LabelPattern::new(
                "clinical-trial",
                &["clinical trial", "randomized", "placebo", "control group", "enrolled", "efficacy", "adverse events"],
            ),
            LabelPattern::new(
                "pharmacology",
                &["dosage", "drug", "mg/kg", "pharmacokinetics", "administered", "medication"],
            ),
            LabelPattern::new(
                "diagnostic-imaging",
                &["radiograph", "ultrasound", "mri", "ct scan", "imaging", "x-ray"],
            ),
            LabelPattern::new(
                "pathology",
                &["pathology", "histopathology", "biopsy", "lesion", "necropsy", "tumor"],
            ),
            LabelPattern::new(
                "animal-nutrition",
                &["nutrition", "diet", "feed", "protein", "calories", "supplement"],
            ),
            LabelPattern::new(
                "clinical-guideline",
                &["guideline", "recommendation", "best practice", "protocol", "consensus", "evidence-based"],
            ),
            // Quality indicators
            LabelPattern::new(
                "high-quality",
                &["peer-reviewed", "references", "doi", "statistical", "significant", "methodology", "sample size"],
            ),
            LabelPattern::new(
                "educational",
                &["learn", "students", "teaching", "education", "curriculum", "training"],
            ),
            LabelPattern::new(
                "reference-material",
                &["reference", "handbook", "manual", "index", "appendix", "bibliography"],
            ),
        ];

        Self { patterns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let table = PatternTable::builtin();
        let rebuilt = PatternTable::new(table.patterns().to_vec()).unwrap();
        assert_eq!(&rebuilt, table);
        assert!(table.get("surgical-procedure").is_some());
        assert!(table.get("high-quality").is_some());
    }

    #[test]
    fn test_builtin_keywords_lowercase() {
        for p in PatternTable::builtin().patterns() {
            for k in &p.keywords {
                assert_eq!(k, &k.to_lowercase(), "keyword {k} in {}", p.label);
            }
        }
    }

    #[test]
    fn test_new_normalizes_keywords() {
        let table = PatternTable::new(vec![LabelPattern::new("x", &["  Foo ", "", "BAR"])]).unwrap();
        assert_eq!(table.patterns()[0].keywords, vec!["foo", "bar"]);
    }

    #[test]
    fn test_new_rejects_bad_tables() {
        assert!(PatternTable::new(vec![]).is_err());
        assert!(PatternTable::new(vec![LabelPattern::new("x", &[" "])]).is_err());
        assert!(PatternTable::new(vec![
            LabelPattern::new("x", &["a"]),
            LabelPattern::new("x", &["b"]),
        ])
        .is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"patterns":[{"label":"memo","keywords":["To:","From:"]}]}"#;
        let table: PatternTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.patterns()[0].keywords, vec!["to:", "from:"]);

        let bad = r#"{"patterns":[]}"#;
        assert!(serde_json::from_str::<PatternTable>(bad).is_err());
    }
}
