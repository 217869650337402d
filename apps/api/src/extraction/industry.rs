//! Industry detection by weighted keyword voting: each industry scores one
//! point per catalog skill present in the text; the highest count wins.

use std::collections::BTreeMap;

use crate::catalog::SkillsCatalog;

use super::patterns::text_contains;

/// Label returned when no industry has a single skill match. Callers must
/// treat it as "no discriminating signal", not as a detected industry.
pub const GENERAL_INDUSTRY: &str = "general";

/// Industry name → count of catalog skills matched. Every industry is
/// present, zero counts included, so "no clear signal" is detectable.
pub type IndustryScoreVector = BTreeMap<String, u32>;

/// Scores `text` against every industry in the catalog and returns the
/// best-scoring industry with the full score vector for transparency.
///
/// Ties break by catalog order (first maximum wins). An all-zero vector
/// falls back to [`GENERAL_INDUSTRY`].
pub fn detect(text: &str, catalog: &SkillsCatalog) -> (String, IndustryScoreVector) {
    let text = text.to_lowercase();

    let mut scores = IndustryScoreVector::new();
    let mut best: Option<(&str, u32)> = None;

    for industry in catalog.industries() {
        let count = industry
            .skills
            .iter()
            .filter(|skill| text_contains(&text, skill))
            .count() as u32;

        scores.insert(industry.name.clone(), count);

        // strictly-greater keeps the first maximum on ties
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((&industry.name, count));
        }
    }

    match best {
        Some((name, count)) if count > 0 => (name.to_string(), scores),
        _ => (GENERAL_INDUSTRY.to_string(), scores),
    }
}
