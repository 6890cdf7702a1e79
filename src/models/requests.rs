use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to compute recommendations for a volunteer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "volunteer_id", rename = "volunteerId")]
    pub volunteer_id: String,
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(default)]
    #[serde(alias = "exclude_opportunity_ids", rename = "excludeOpportunityIds")]
    pub exclude_opportunity_ids: Vec<String>,
}

fn default_limit() -> u16 {
    20
}

/// Request to record a volunteer's engagement with an opportunity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordEngagementRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "volunteer_id", rename = "volunteerId")]
    pub volunteer_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "opportunity_id", rename = "opportunityId")]
    pub opportunity_id: String,
    #[serde(alias = "event_type", rename = "eventType")]
    pub event_type: String,
}
