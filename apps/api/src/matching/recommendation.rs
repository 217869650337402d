//! Recommendation banding applied to the final fused score.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    NeedsRevision,
    CanImprove,
    ReadyToSubmit,
}

impl Recommendation {
    /// Bands: `<50` needs revision, `[50,70)` promising but improvable,
    /// `≥70` ready to submit. Both thresholds are inclusive on the upper band.
    pub fn for_score(score: f64) -> Self {
        if score < 50.0 {
            Recommendation::NeedsRevision
        } else if score < 70.0 {
            Recommendation::CanImprove
        } else {
            Recommendation::ReadyToSubmit
        }
    }

    /// User-facing message, kept verbatim from the original API so existing
    /// clients render identically.
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::NeedsRevision => "Low chance, need to modify your CV!",
            Recommendation::CanImprove => "Good chance but you can improve further!",
            Recommendation::ReadyToSubmit => "Excellent! You can submit your CV.",
        }
    }
}
