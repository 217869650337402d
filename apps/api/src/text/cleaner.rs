//! Lowercase → strip → stopword filter → stem. Deterministic and idempotent:
//! `clean(clean(x)) == clean(x)` for any input.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

/// Fixed English stopword set. Tokens (and stems of tokens) in this set are
/// dropped from the cleaned output.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "been", "being", "but", "by", "can", "did",
        "do", "does", "for", "from", "had", "has", "have", "he", "her", "hers", "him", "his",
        "i", "if", "in", "into", "is", "it", "its", "me", "my", "no", "nor", "not", "of", "on",
        "or", "our", "ours", "she", "so", "such", "that", "the", "their", "theirs", "them",
        "then", "there", "these", "they", "this", "those", "to", "too", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "you",
        "your", "yours",
    ]
    .into_iter()
    .collect()
});

/// Cleans raw document text for embedding input.
///
/// Steps: lowercase; delete every character that is not a lowercase ASCII
/// letter, hyphen, or whitespace; split on whitespace; drop stopwords; stem
/// each remaining token; drop tokens whose stem is itself a stopword (keeps
/// the function idempotent — e.g. "doing" stems to "do"); rejoin with single
/// spaces.
pub fn clean(text: &str) -> String {
    let stemmer = Stemmer::create(Algorithm::English);

    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '-' || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| !STOPWORDS.contains(token))
        .map(|token| stemmer.stem(token).to_string())
        .filter(|stem| !STOPWORDS.contains(stem.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}
