// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    normalize_tags, Location, MatchResult, MatchWeights, Opportunity, OpportunityStatus,
    VolunteerProfile,
};
pub use requests::{RecommendationsRequest, RecordEngagementRequest};
pub use responses::{
    ErrorResponse, HealthResponse, RecommendationsResponse, RecordEngagementResponse,
};
