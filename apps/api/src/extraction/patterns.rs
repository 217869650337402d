//! Extraction pattern batteries, kept as data so each category can be tested
//! and extended independently. Batteries cover English plus the Vietnamese
//! equivalents the source documents use.

use once_cell::sync::Lazy;
use regex::Regex;

/// Builds a whole-word, case-insensitive matcher for a phrase: the phrase
/// must be bounded by non-word characters (or the string edge) on both
/// sides, so `go` never matches inside `going`. Internal whitespace in the
/// phrase matches any whitespace run in the text.
pub fn whole_word(phrase: &str) -> Regex {
    let inner = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"(?i)(?:^|\W){inner}(?:\W|$)")).expect("phrase pattern must compile")
}

/// Whole-word containment test used by the extractor and industry detector.
pub fn text_contains(text: &str, phrase: &str) -> bool {
    whole_word(phrase).is_match(text)
}

/// Degree names, institution-type words, diploma words, and Vietnamese
/// equivalents.
pub const EDUCATION_TERMS: &[&str] = &[
    "bachelor",
    "master",
    "mba",
    "phd",
    "doctorate",
    "degree",
    "university",
    "college",
    "diploma",
    "graduate",
    "undergraduate",
    // Vietnamese
    "đại học",
    "cao đẳng",
    "cử nhân",
    "thạc sĩ",
    "tiến sĩ",
    "bằng cấp",
    "tốt nghiệp",
];

/// Certification and credential mentions.
pub const CERTIFICATION_TERMS: &[&str] = &[
    "certified",
    "certification",
    "certificate",
    "pmp",
    "cpa",
    "cfa",
    "cissp",
    "aws certified",
    "scrum master",
    "six sigma",
    "toeic",
    "ielts",
    "toefl",
    // Vietnamese
    "chứng chỉ",
    "chứng nhận",
];

/// Spoken/written language mentions and proficiency adjectives.
pub const LANGUAGE_TERMS: &[&str] = &[
    "english",
    "vietnamese",
    "japanese",
    "korean",
    "chinese",
    "french",
    "german",
    "spanish",
    "fluent",
    "native",
    "bilingual",
    // Vietnamese
    "tiếng anh",
    "tiếng việt",
    "tiếng nhật",
    "tiếng trung",
    "tiếng hàn",
];

/// Role and seniority keywords.
pub const POSITION_TERMS: &[&str] = &[
    "intern",
    "junior",
    "senior",
    "lead",
    "manager",
    "director",
    "head",
    "chief",
    "executive",
    "officer",
    "specialist",
    "engineer",
    "developer",
    "analyst",
    "consultant",
    "coordinator",
    "supervisor",
    // Vietnamese
    "nhân viên",
    "chuyên viên",
    "trưởng phòng",
    "giám đốc",
    "quản lý",
];

/// "Number + time unit + experience word" battery, both word orders, English
/// and Vietnamese. Capture group 1 is the year count.
pub static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "5 years of experience", "3+ yrs experience", "7 years working experience"
        r"(?i)(\d{1,2})\s*\+?\s*(?:years?|yrs?)(?:\s+of)?(?:\s+\w+){0,2}?\s+experience",
        // "experience: 5 years", "experience of more than 3 years"
        r"(?i)experience\D{0,40}?(\d{1,2})\s*\+?\s*(?:years?|yrs?)",
        // "5 năm kinh nghiệm"
        r"(?i)(\d{1,2})\s*\+?\s*năm\s+kinh\s+nghiệm",
        // "kinh nghiệm 5 năm", "kinh nghiệm trên 3 năm"
        r"(?i)kinh\s+nghiệm\D{0,40}?(\d{1,2})\s*\+?\s*năm",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("experience pattern must compile"))
    .collect()
});
