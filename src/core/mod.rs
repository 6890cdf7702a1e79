// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{is_eligible, is_excluded};
pub use matcher::{Matcher, RankingOutcome};
pub use scoring::{
    blend_scores, location_score, overlap_score, score_opportunity, DimensionScores,
    SAME_STATE_SCORE,
};
