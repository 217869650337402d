//! Field extraction: raw text + known skills → `StructuredRecord`.
//!
//! Extraction never fails. A document with no recognizable structure
//! produces a valid, mostly empty record; downstream scoring treats empty
//! collections as "no requirement".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::patterns::{
    text_contains, CERTIFICATION_TERMS, EDUCATION_TERMS, EXPERIENCE_PATTERNS, LANGUAGE_TERMS,
    POSITION_TERMS,
};

/// Structured attributes derived from one document (CV or JD).
///
/// All members are lowercase and trimmed. Absence of a signal is an empty
/// collection or zero, never a null, so scoring can treat "no requirement"
/// uniformly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub education: BTreeSet<String>,
    /// Subset of the catalog found in the document, in catalog order.
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub certifications: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub positions: BTreeSet<String>,
}

/// Extracts a structured record from raw document text.
///
/// `known_skills` is the catalog skill list (usually `catalog.all_skills()`);
/// the extracted `skills` preserve its order, not text order.
pub fn extract(raw_text: &str, known_skills: &[String]) -> StructuredRecord {
    let text = raw_text.to_lowercase();

    StructuredRecord {
        education: match_terms(&text, EDUCATION_TERMS),
        skills: known_skills
            .iter()
            .filter(|skill| text_contains(&text, skill))
            .cloned()
            .collect(),
        experience_years: extract_experience_years(&text),
        certifications: match_terms(&text, CERTIFICATION_TERMS),
        languages: match_terms(&text, LANGUAGE_TERMS),
        positions: match_terms(&text, POSITION_TERMS),
    }
}

fn match_terms(text: &str, terms: &[&str]) -> BTreeSet<String> {
    terms
        .iter()
        .filter(|term| text_contains(text, term))
        .map(|term| term.to_string())
        .collect()
}

/// Runs the whole experience battery and takes the MAXIMUM matched value.
/// A document may state experience several ways; the most generous explicit
/// claim wins so a smaller earlier mention cannot shadow a larger one.
fn extract_experience_years(text: &str) -> u32 {
    EXPERIENCE_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}
