//! Skills catalog: the reference mapping of industries to known skill
//! phrases. Loaded once at startup and shared read-only across requests.
//!
//! Source format is line-oriented: `[industry-name]` opens a section,
//! `#` lines are comments, blank lines are skipped, and every other line is
//! a comma-separated list of skill phrases belonging to the open section.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog source not found at '{0}'")]
    NotFound(String),

    #[error("failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),

    #[error("skill line outside any [industry] section at line {0}")]
    OrphanLine(usize),

    #[error("catalog source contains no industries")]
    Empty,
}

/// One industry section: name plus its skill phrases in file order.
#[derive(Debug, Clone)]
pub struct Industry {
    pub name: String,
    pub skills: Vec<String>,
}

/// Immutable industry → skills mapping. Iteration order is file order, which
/// downstream code relies on for deterministic tie-breaking and for the
/// catalog-ordered skill lists in structured records.
#[derive(Debug, Clone)]
pub struct SkillsCatalog {
    industries: Vec<Industry>,
}

impl SkillsCatalog {
    /// Loads the catalog from a file path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::NotFound(path.display().to_string()));
        }
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Parses the line-oriented catalog format.
    pub fn parse(source: &str) -> Result<Self, CatalogError> {
        let mut industries: Vec<Industry> = Vec::new();

        for (index, raw_line) in source.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim().to_lowercase();
                industries.push(Industry {
                    name,
                    skills: Vec::new(),
                });
                continue;
            }

            let current = industries
                .last_mut()
                .ok_or(CatalogError::OrphanLine(index + 1))?;

            for phrase in line.split(',') {
                let skill = phrase.trim().to_lowercase();
                if !skill.is_empty() && !current.skills.contains(&skill) {
                    current.skills.push(skill);
                }
            }
        }

        if industries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { industries })
    }

    /// Minimal built-in catalog used when the configured source cannot be
    /// loaded, so matching keeps working in degraded mode.
    pub fn fallback() -> Self {
        Self::parse(FALLBACK_SOURCE).expect("fallback catalog must parse")
    }

    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }

    /// Skill phrases for one industry, in catalog order.
    pub fn skills_for(&self, industry: &str) -> Option<&[String]> {
        self.industries
            .iter()
            .find(|i| i.name == industry)
            .map(|i| i.skills.as_slice())
    }

    /// Deduplicated union of all skills across industries, preserving
    /// catalog order. Field extraction walks this list so extracted skill
    /// lists come out in catalog order.
    pub fn all_skills(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut all = Vec::new();
        for industry in &self.industries {
            for skill in &industry.skills {
                if seen.insert(skill.as_str()) {
                    all.push(skill.clone());
                }
            }
        }
        all
    }
}

const FALLBACK_SOURCE: &str = "\
[technology]
python, java, javascript, sql, communication, teamwork, problem solving
[business]
management, marketing, sales, communication, leadership, excel
";
