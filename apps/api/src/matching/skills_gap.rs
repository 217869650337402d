//! Skills-gap analysis: which catalog skills the CV and JD share and which
//! JD skills the CV is missing, rendered for the match response.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsGap {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub matched_summary: String,
    pub missing_summary: String,
}

/// Compares the extracted skill lists. Both inputs are in catalog order, so
/// the outputs are too. The severity phrasing of the missing-skills summary
/// scales with the final similarity score.
pub fn analyze(cv_skills: &[String], jd_skills: &[String], similarity: f64) -> SkillsGap {
    let matched: Vec<String> = jd_skills
        .iter()
        .filter(|s| cv_skills.contains(s))
        .cloned()
        .collect();
    let missing: Vec<String> = jd_skills
        .iter()
        .filter(|s| !cv_skills.contains(s))
        .cloned()
        .collect();

    let matched_summary = if matched.is_empty() {
        "No specific technical skills matched".to_string()
    } else {
        matched.join(", ")
    };

    let missing_list = missing.join(", ");
    let missing_summary = if similarity < 30.0 {
        if missing.is_empty() {
            "Significant skill development needed".to_string()
        } else {
            format!("Low match detected. Consider developing: {missing_list}")
        }
    } else if similarity < 50.0 {
        if missing.is_empty() {
            "Some skill enhancement recommended".to_string()
        } else {
            format!("Moderate gaps in: {missing_list}")
        }
    } else if missing.is_empty() {
        "No significant skill gaps identified".to_string()
    } else {
        missing_list
    };

    SkillsGap {
        matched,
        missing,
        matched_summary,
        missing_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matched_and_missing_partition_jd_skills() {
        let gap = analyze(
            &skills(&["python", "sql"]),
            &skills(&["python", "docker", "sql", "aws"]),
            80.0,
        );
        assert_eq!(gap.matched, skills(&["python", "sql"]));
        assert_eq!(gap.missing, skills(&["docker", "aws"]));
    }

    #[test]
    fn test_no_match_placeholder() {
        let gap = analyze(&skills(&[]), &skills(&[]), 80.0);
        assert_eq!(gap.matched_summary, "No specific technical skills matched");
        assert_eq!(gap.missing_summary, "No significant skill gaps identified");
    }

    #[test]
    fn test_low_similarity_sharpens_missing_summary() {
        let gap = analyze(&skills(&[]), &skills(&["python"]), 25.0);
        assert!(gap.missing_summary.starts_with("Low match detected"));
    }

    #[test]
    fn test_moderate_similarity_mentions_gaps() {
        let gap = analyze(&skills(&[]), &skills(&["python"]), 40.0);
        assert!(gap.missing_summary.starts_with("Moderate gaps in"));
    }
}
