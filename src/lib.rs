//! Opportunity recommendation service for the Volunteer Connect platform
//!
//! This library provides the matching core used to suggest volunteering
//! opportunities: per-dimension similarity scorers (skills, interests,
//! location), a weighted blender, and a deterministic ranker, together
//! with the repository and cache layers the HTTP service is built on.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{location_score, overlap_score, Matcher};
pub use crate::models::{
    MatchResult, MatchWeights, Opportunity, OpportunityStatus, RecommendationsRequest,
    RecommendationsResponse, VolunteerProfile,
};
