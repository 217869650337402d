//! Structured-field extraction: converts raw document text into comparable
//! attributes (skills, experience, education, certifications, languages,
//! positions) and classifies the document's industry.

pub mod fields;
pub mod industry;
pub mod patterns;

pub use fields::{extract, StructuredRecord};
pub use industry::{detect, IndustryScoreVector, GENERAL_INDUSTRY};
