//! Text preprocessing: the cleaning pipeline fed to the embedding backends
//! and the terminology normalizer run before field extraction.

pub mod cleaner;
pub mod terminology;

pub use cleaner::clean;
pub use terminology::normalize_terms;
