//! Terminology normalizer: rewrites known abbreviations and common
//! misspellings to canonical forms before field extraction.
//!
//! Every rule is matched against the ORIGINAL input snapshot, never against
//! already-substituted output, so one rule's replacement can never trigger
//! another rule. Overlapping matches are resolved by rule order (first wins).

use once_cell::sync::Lazy;
use regex::Regex;

/// Substitution rules as data: (whole-word pattern, canonical form).
/// Order matters only when two rules could match overlapping spans.
const RULES: &[(&str, &str)] = &[
    // Domain acronyms expanded to full phrases
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("dl", "deep learning"),
    ("nlp", "natural language processing"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("k8s", "kubernetes"),
    ("db", "database"),
    ("oop", "object oriented programming"),
    ("ci/cd", "continuous integration"),
    ("hr", "human resources"),
    ("qa", "quality assurance"),
    ("seo", "search engine optimization"),
    ("sem", "search engine marketing"),
    ("crm", "customer relationship management"),
    ("erp", "enterprise resource planning"),
    ("yoe", "years of experience"),
    // Common misspellings
    ("managment", "management"),
    ("experiance", "experience"),
    ("experince", "experience"),
    ("marketting", "marketing"),
    ("comunication", "communication"),
    ("postgress", "postgresql"),
];

static COMPILED_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|(pattern, canonical)| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(pattern)))
                .expect("terminology rule must compile");
            (re, *canonical)
        })
        .collect()
});

/// Applies the substitution table to `text`.
///
/// All matches are located on the input snapshot first, then spliced into the
/// output in one pass, so substitutions are independent and never chained.
pub fn normalize_terms(text: &str) -> String {
    let mut spans: Vec<(usize, usize, &str)> = Vec::new();

    for (re, canonical) in COMPILED_RULES.iter() {
        for m in re.find_iter(text) {
            let overlaps = spans
                .iter()
                .any(|&(start, end, _)| m.start() < end && start < m.end());
            if !overlaps {
                spans.push((m.start(), m.end(), canonical));
            }
        }
    }

    spans.sort_by_key(|&(start, _, _)| start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end, canonical) in spans {
        out.push_str(&text[cursor..start]);
        out.push_str(canonical);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_acronym_whole_word_only() {
        assert_eq!(
            normalize_terms("Strong ML background"),
            "Strong machine learning background"
        );
        // "ml" inside a larger word must not be rewritten
        assert_eq!(normalize_terms("html and xml"), "html and xml");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalize_terms("AI engineer"), "artificial intelligence engineer");
        assert_eq!(normalize_terms("ai engineer"), "artificial intelligence engineer");
    }

    #[test]
    fn test_no_double_substitution() {
        // "ml" expands to "machine learning"; the produced "learning" must not
        // be re-examined by any other rule, and an adjacent "ai" is handled
        // from the same snapshot.
        assert_eq!(
            normalize_terms("ml ai"),
            "machine learning artificial intelligence"
        );
    }

    #[test]
    fn test_replacement_output_not_rematched() {
        // "dl" → "deep learning". If rules chained, the "dl" inside a later
        // token could corrupt the output. Snapshot semantics keep it intact.
        assert_eq!(normalize_terms("dl and dl"), "deep learning and deep learning");
    }

    #[test]
    fn test_fixes_misspellings() {
        assert_eq!(
            normalize_terms("project managment and experiance"),
            "project management and experience"
        );
    }

    #[test]
    fn test_untouched_text_passes_through() {
        let text = "plain text with no known terms";
        assert_eq!(normalize_terms(text), text);
    }
}
