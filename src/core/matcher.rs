use crate::core::{
    filters::{is_eligible, is_excluded},
    scoring::score_opportunity,
};
use crate::models::{MatchResult, MatchWeights, Opportunity, VolunteerProfile};

/// Result of one ranking pass
#[derive(Debug)]
pub struct RankingOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Recommendation engine - scores and ranks open opportunities for a volunteer
///
/// # Pipeline Stages
/// 1. Eligibility filter (open status only)
/// 2. Exclusion filter (applied/dismissed/client-supplied ids)
/// 3. Per-dimension scoring and blending
/// 4. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: MatchWeights,
}

impl Matcher {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: MatchWeights::default(),
        }
    }

    /// Compute ranked recommendations for a volunteer
    ///
    /// Pure and deterministic: identical inputs always produce the same
    /// ordered output. Ties on the blended score break by opportunity
    /// creation time descending, then identifier ascending.
    ///
    /// # Arguments
    /// * `profile` - The volunteer's skills, interests, and location
    /// * `candidates` - Candidate opportunities fetched by the caller
    /// * `exclude_ids` - Opportunity ids to drop before scoring
    /// * `top_n` - Maximum number of results to return
    ///
    /// # Returns
    /// RankingOutcome with at most `min(top_n, |candidates|)` matches
    pub fn compute_matches(
        &self,
        profile: &VolunteerProfile,
        candidates: Vec<Opportunity>,
        exclude_ids: &[String],
        top_n: usize,
    ) -> RankingOutcome {
        let total_candidates = candidates.len();

        let mut matches: Vec<MatchResult> = candidates
            .into_iter()
            // Stage 1: only open opportunities are eligible
            .filter(is_eligible)
            // Stage 2: drop anything the volunteer already acted on
            .filter(|opportunity| !is_excluded(opportunity, exclude_ids))
            // Stage 3: score the survivors
            .map(|opportunity| {
                let scores = score_opportunity(profile, &opportunity, &self.weights);

                MatchResult {
                    opportunity_id: opportunity.opportunity_id,
                    organization_id: opportunity.organization_id,
                    title: opportunity.title,
                    location: opportunity.location,
                    skill_score: scores.skill,
                    interest_score: scores.interest,
                    location_score: scores.location,
                    match_score: scores.blended,
                    matched_skills: scores.matched_skills,
                    matched_interests: scores.matched_interests,
                    created_at: opportunity.created_at,
                }
            })
            .collect();

        // Stage 4: rank by blended score, newest first on ties, then id
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.opportunity_id.cmp(&b.opportunity_id))
        });

        matches.truncate(top_n);

        RankingOutcome {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
