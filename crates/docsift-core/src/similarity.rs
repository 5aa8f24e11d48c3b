//! String and content similarity measures.
//!
//! Two measures with different cost profiles:
//!
//! | Function | Used for | Cost |
//! |----------|----------|------|
//! | [`string_similarity`] | Filenames | O(n·m) Levenshtein |
//! | [`content_similarity`] | Document bodies | O(n+m) token-set Jaccard |
//!
//! Both return a value in `[0.0, 1.0]` and never fail. Empty inputs follow
//! fixed conventions: two empty inputs are identical (`1.0`), one empty
//! input matches nothing (`0.0`).

use std::collections::HashSet;
use std::sync::LazyLock;

/// Words dropped before Jaccard comparison.
///
/// Tokens of two characters or fewer are already discarded, so short
/// articles and prepositions (`a`, `an`, `of`, `to`) are not listed.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "was", "were", "been", "being", "have", "has",
    "had", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
    "shall", "this", "that", "these", "those", "with", "from", "into", "than", "then", "also",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Normalized Levenshtein similarity: `1 - distance / max(len_a, len_b)`.
///
/// Lengths are counted in `char`s. Case folding is the caller's job.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let longest = a.len().max(b.len());
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Edit distance with unit-cost insertion, deletion, and substitution.
///
/// Keeps a single DP row, so memory is O(min(n, m)).
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lc != sc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
        }
    }
    row[short.len()]
}

/// Jaccard similarity of the stop-word-filtered token sets of two texts.
pub fn content_similarity(text_a: &str, text_b: &str) -> f64 {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Split text into the set of comparable tokens.
///
/// Punctuation becomes whitespace, tokens are lower-cased, and tokens of
/// length ≤ 2 or in [`STOP_WORDS`] are dropped.
pub fn tokenize(text: &str) -> HashSet<String> {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .filter(|t| t.chars().count() > 2 && !STOP_WORD_SET.contains(t.as_str()))
        .collect()
}
