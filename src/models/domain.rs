use serde::{Deserialize, Serialize};

/// City/state location attached to profiles and opportunities
///
/// Matching is categorical: the scorer compares city and state strings,
/// it never computes distances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
}

/// Volunteer profile used as the basis for matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerProfile {
    #[serde(rename = "volunteerId")]
    pub volunteer_id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// Lifecycle status of an opportunity
///
/// Only open opportunities are eligible recommendation candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    Open,
    Closed,
    Suspended,
    Deleted,
}

impl OpportunityStatus {
    /// Map a raw status column value to a status
    ///
    /// Unknown values are treated as closed so they never surface in
    /// recommendations.
    pub fn from_db(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "open" => OpportunityStatus::Open,
            "suspended" => OpportunityStatus::Suspended,
            "deleted" => OpportunityStatus::Deleted,
            _ => OpportunityStatus::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, OpportunityStatus::Open)
    }
}

/// Volunteering opportunity posted by an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "opportunityId")]
    pub opportunity_id: String,
    #[serde(rename = "organizationId")]
    pub organization_id: String,
    pub title: String,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    #[serde(rename = "preferredInterests", default)]
    pub preferred_interests: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
    pub status: OpportunityStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Opportunity {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Scored recommendation result for a single opportunity
///
/// Ephemeral: computed per request, never persisted. All scores are in
/// the closed interval [0, 1]; the UI multiplies by 100 for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "opportunityId")]
    pub opportunity_id: String,
    #[serde(rename = "organizationId")]
    pub organization_id: String,
    pub title: String,
    pub location: Option<Location>,
    #[serde(rename = "skillScore")]
    pub skill_score: f64,
    #[serde(rename = "interestScore")]
    pub interest_score: f64,
    #[serde(rename = "locationScore")]
    pub location_score: f64,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchedSkills")]
    pub matched_skills: Vec<String>,
    #[serde(rename = "matchedInterests")]
    pub matched_interests: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Blending weights for the three match dimensions
///
/// The blender divides by the weight sum, so overrides that do not sum
/// to 1 still yield scores in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    pub skill: f64,
    pub interest: f64,
    pub location: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skill: 1.0 / 3.0,
            interest: 1.0 / 3.0,
            location: 1.0 / 3.0,
        }
    }
}

/// Normalize a raw tag list into canonical form
///
/// Tags are trimmed, lowercased, and deduplicated once at the data-access
/// boundary so the scorers can use plain equality.
pub fn normalize_tags(raw: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = raw
        .into_iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
