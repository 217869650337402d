//! Matching: field-based scoring, similarity fusion, recommendation banding,
//! skills-gap analysis, and the HTTP handlers tying the pipeline together.

pub mod field_score;
pub mod fusion;
pub mod handlers;
pub mod recommendation;
pub mod skills_gap;
