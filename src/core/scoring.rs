use crate::models::{Location, MatchWeights, Opportunity, VolunteerProfile};

/// Score awarded when volunteer and opportunity share a state but not a city
pub const SAME_STATE_SCORE: f64 = 0.5;

/// Per-dimension scores for one opportunity, plus the matched tags
/// surfaced to the UI.
#[derive(Debug, Clone)]
pub struct DimensionScores {
    pub skill: f64,
    pub interest: f64,
    pub location: f64,
    pub blended: f64,
    pub matched_skills: Vec<String>,
    pub matched_interests: Vec<String>,
}

/// Score a single opportunity against a volunteer profile
///
/// Runs the three dimension scorers and blends them into one final score.
/// Every value returned is in [0, 1]; the computation is a pure function
/// of its inputs.
pub fn score_opportunity(
    profile: &VolunteerProfile,
    opportunity: &Opportunity,
    weights: &MatchWeights,
) -> DimensionScores {
    let (skill, matched_skills) = overlap_score(&profile.skills, &opportunity.required_skills);
    let (interest, matched_interests) =
        overlap_score(&profile.interests, &opportunity.preferred_interests);
    let location = location_score(profile.location.as_ref(), opportunity.location.as_ref());

    let blended = blend_scores(skill, interest, location, weights);

    DimensionScores {
        skill,
        interest,
        location,
        blended,
        matched_skills,
        matched_interests,
    }
}

/// Fraction of the wanted tags the volunteer covers (0-1)
///
/// An opportunity that wants nothing is vacuously satisfied and scores
/// 1.0 for any volunteer. Returns the matched tags alongside the score.
#[inline]
pub fn overlap_score(offered: &[String], wanted: &[String]) -> (f64, Vec<String>) {
    if wanted.is_empty() {
        return (1.0, Vec::new());
    }

    let matched: Vec<String> = wanted
        .iter()
        .filter(|tag| offered.contains(tag))
        .cloned()
        .collect();

    let score = matched.len() as f64 / wanted.len() as f64;
    (score, matched)
}

/// Categorical location similarity (0-1)
///
/// Same city scores 1.0, same state but different city scores
/// [`SAME_STATE_SCORE`], anything else 0.0. A missing location on either
/// side scores 0.0. City and state comparisons ignore case and
/// surrounding whitespace.
#[inline]
pub fn location_score(volunteer: Option<&Location>, opportunity: Option<&Location>) -> f64 {
    let (Some(volunteer), Some(opportunity)) = (volunteer, opportunity) else {
        return 0.0;
    };

    if same_region(&volunteer.city, &opportunity.city) {
        return 1.0;
    }
    if same_region(&volunteer.state, &opportunity.state) {
        return SAME_STATE_SCORE;
    }

    0.0
}

/// Blend the three dimension scores using the configured weights
///
/// Divides by the weight sum so the result stays in [0, 1] even when
/// the configured weights do not sum to 1.
#[inline]
pub fn blend_scores(skill: f64, interest: f64, location: f64, weights: &MatchWeights) -> f64 {
    let total = weights.skill + weights.interest + weights.location;
    if total <= 0.0 {
        return 0.0;
    }

    let blended =
        (skill * weights.skill + interest * weights.interest + location * weights.location) / total;

    blended.clamp(0.0, 1.0)
}

#[inline]
fn same_region(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpportunityStatus;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn location(city: &str, state: &str) -> Option<Location> {
        Some(Location {
            city: city.to_string(),
            state: state.to_string(),
        })
    }

    fn create_profile(skills: &[&str], interests: &[&str], city: &str, state: &str) -> VolunteerProfile {
        VolunteerProfile {
            volunteer_id: "vol_1".to_string(),
            name: "Test Volunteer".to_string(),
            skills: tags(skills),
            interests: tags(interests),
            location: location(city, state),
        }
    }

    fn create_opportunity(
        required: &[&str],
        preferred: &[&str],
        city: &str,
        state: &str,
    ) -> Opportunity {
        Opportunity {
            opportunity_id: "opp_1".to_string(),
            organization_id: "org_1".to_string(),
            title: "Community Tutoring".to_string(),
            required_skills: tags(required),
            preferred_interests: tags(preferred),
            location: location(city, state),
            status: OpportunityStatus::Open,
            created_at: None,
        }
    }

    #[test]
    fn test_overlap_score_partial() {
        let (score, matched) = overlap_score(&tags(&["a", "b"]), &tags(&["a", "b", "c"]));
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(matched, tags(&["a", "b"]));
    }

    #[test]
    fn test_overlap_score_empty_requirements_vacuously_satisfied() {
        let (score, matched) = overlap_score(&tags(&["a", "b"]), &[]);
        assert_eq!(score, 1.0);
        assert!(matched.is_empty());

        // An empty volunteer set against empty requirements still passes
        let (score, _) = overlap_score(&[], &[]);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_overlap_score_full_coverage() {
        let (score, _) = overlap_score(&tags(&["a", "b", "c"]), &tags(&["a", "b"]));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_overlap_score_disjoint() {
        let (score, matched) = overlap_score(&tags(&["x", "y"]), &tags(&["a", "b"]));
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_location_score_same_city() {
        let volunteer = location("KL", "Selangor");
        let opportunity = location("kl ", "Selangor");
        assert_eq!(
            location_score(volunteer.as_ref(), opportunity.as_ref()),
            1.0
        );
    }

    #[test]
    fn test_location_score_same_state_different_city() {
        let volunteer = location("Penang", "Selangor");
        let opportunity = location("KL", "Selangor");
        assert_eq!(
            location_score(volunteer.as_ref(), opportunity.as_ref()),
            SAME_STATE_SCORE
        );
    }

    #[test]
    fn test_location_score_no_overlap() {
        let volunteer = location("Penang", "Penang");
        let opportunity = location("KL", "Selangor");
        assert_eq!(
            location_score(volunteer.as_ref(), opportunity.as_ref()),
            0.0
        );
    }

    #[test]
    fn test_location_score_missing_location() {
        let volunteer = location("KL", "Selangor");
        assert_eq!(location_score(volunteer.as_ref(), None), 0.0);
        assert_eq!(location_score(None, volunteer.as_ref()), 0.0);
        assert_eq!(location_score(None, None), 0.0);
    }

    #[test]
    fn test_location_score_empty_strings_never_match() {
        let volunteer = location("", "");
        let opportunity = location("", "");
        assert_eq!(
            location_score(volunteer.as_ref(), opportunity.as_ref()),
            0.0
        );
    }

    #[test]
    fn test_blend_equal_weights_is_mean() {
        let weights = MatchWeights::default();
        let blended = blend_scores(0.6, 0.3, 0.9, &weights);
        assert!((blended - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_blend_unnormalized_weights_stay_in_range() {
        let weights = MatchWeights {
            skill: 3.0,
            interest: 2.0,
            location: 5.0,
        };
        let blended = blend_scores(1.0, 1.0, 1.0, &weights);
        assert!((blended - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_blend_zero_weights() {
        let weights = MatchWeights {
            skill: 0.0,
            interest: 0.0,
            location: 0.0,
        };
        assert_eq!(blend_scores(1.0, 1.0, 1.0, &weights), 0.0);
    }

    #[test]
    fn test_score_opportunity_worked_example() {
        // skills {a,b} vs required {a,b,c} -> 2/3
        // interests {x} vs preferred {x,y} -> 1/2
        // same city -> 1.0
        let profile = create_profile(&["a", "b"], &["x"], "KL", "Selangor");
        let opportunity = create_opportunity(&["a", "b", "c"], &["x", "y"], "KL", "Selangor");
        let weights = MatchWeights::default();

        let scores = score_opportunity(&profile, &opportunity, &weights);

        assert!((scores.skill - 2.0 / 3.0).abs() < 1e-9);
        assert!((scores.interest - 0.5).abs() < 1e-9);
        assert_eq!(scores.location, 1.0);

        let expected = (2.0 / 3.0 + 0.5 + 1.0) / 3.0;
        assert!((scores.blended - expected).abs() < 1e-9);
        assert_eq!(scores.matched_skills, tags(&["a", "b"]));
        assert_eq!(scores.matched_interests, tags(&["x"]));
    }

    #[test]
    fn test_score_opportunity_unconstrained_same_city_is_perfect() {
        let profile = create_profile(&[], &[], "KL", "Selangor");
        let opportunity = create_opportunity(&[], &[], "KL", "Selangor");
        let weights = MatchWeights::default();

        let scores = score_opportunity(&profile, &opportunity, &weights);

        assert_eq!(scores.skill, 1.0);
        assert_eq!(scores.interest, 1.0);
        assert_eq!(scores.location, 1.0);
        assert!((scores.blended - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_always_in_unit_interval() {
        let profiles = [
            create_profile(&[], &[], "", ""),
            create_profile(&["a"], &["x"], "KL", "Selangor"),
            create_profile(&["a", "b", "c"], &["x", "y"], "Penang", "Penang"),
        ];
        let opportunities = [
            create_opportunity(&[], &[], "", ""),
            create_opportunity(&["a", "z"], &["x"], "KL", "Selangor"),
            create_opportunity(&["q"], &["w"], "Ipoh", "Perak"),
        ];
        let weights = MatchWeights::default();

        for profile in &profiles {
            for opportunity in &opportunities {
                let scores = score_opportunity(profile, opportunity, &weights);
                for value in [
                    scores.skill,
                    scores.interest,
                    scores.location,
                    scores.blended,
                ] {
                    assert!((0.0..=1.0).contains(&value), "score out of range: {}", value);
                }
            }
        }
    }
}
