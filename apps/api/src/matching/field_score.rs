//! Field-based compatibility score: weighted overlap between a candidate's
//! structured record and a JD's structured record, 0–100.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::extraction::StructuredRecord;

/// Category weights. The reference distribution sums to 1.0; categories the
/// JD does not require are excluded from both numerator and denominator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certifications: f64,
    pub languages: f64,
    pub positions: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            experience: 0.20,
            education: 0.20,
            certifications: 0.10,
            languages: 0.05,
            positions: 0.05,
        }
    }
}

/// Scores `cv` against `jd` with the default weights, rounded to 2 decimals.
pub fn score(cv: &StructuredRecord, jd: &StructuredRecord) -> f64 {
    score_with_weights(cv, jd, &CategoryWeights::default())
}

/// A JD that requires nothing in any category scores exactly 100.0: an empty
/// JD is trivially satisfied by any candidate. Intentional default-pass
/// behavior, covered by tests — do not "fix".
pub fn score_with_weights(
    cv: &StructuredRecord,
    jd: &StructuredRecord,
    weights: &CategoryWeights,
) -> f64 {
    let mut total = 0.0;
    let mut applied_weight = 0.0;

    // Skills: overlap ratio against the JD's requirement set.
    if !jd.skills.is_empty() {
        let jd_set: BTreeSet<&str> = jd.skills.iter().map(String::as_str).collect();
        let overlap = cv.skills.iter().filter(|s| jd_set.contains(s.as_str())).count();
        total += overlap as f64 / jd_set.len() as f64 * weights.skills * 100.0;
        applied_weight += weights.skills;
    }

    // Experience: capped ratio of claimed years to required years.
    if jd.experience_years > 0 {
        let ratio = (cv.experience_years as f64 / jd.experience_years as f64).min(1.0);
        total += ratio * weights.experience * 100.0;
        applied_weight += weights.experience;
    }

    // Education: boolean any-overlap rather than a ratio.
    if !jd.education.is_empty() {
        let any = if cv.education.intersection(&jd.education).next().is_some() {
            1.0
        } else {
            0.0
        };
        total += any * weights.education * 100.0;
        applied_weight += weights.education;
    }

    if !jd.certifications.is_empty() {
        total += overlap_ratio(&cv.certifications, &jd.certifications)
            * weights.certifications
            * 100.0;
        applied_weight += weights.certifications;
    }

    if !jd.languages.is_empty() {
        total += overlap_ratio(&cv.languages, &jd.languages) * weights.languages * 100.0;
        applied_weight += weights.languages;
    }

    if !jd.positions.is_empty() {
        total += overlap_ratio(&cv.positions, &jd.positions) * weights.positions * 100.0;
        applied_weight += weights.positions;
    }

    if applied_weight == 0.0 {
        return 100.0;
    }

    round2(total / applied_weight)
}

fn overlap_ratio(cv: &BTreeSet<String>, jd: &BTreeSet<String>) -> f64 {
    cv.intersection(jd).count() as f64 / jd.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
