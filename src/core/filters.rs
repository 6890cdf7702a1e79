use crate::models::Opportunity;

/// Check if an opportunity is an eligible recommendation candidate
///
/// Only opportunities with an open status are eligible. Closed,
/// suspended, and deleted postings never surface in recommendations.
#[inline]
pub fn is_eligible(opportunity: &Opportunity) -> bool {
    opportunity.is_open()
}

/// Check if an opportunity sits in the volunteer's exclusion set
///
/// The exclusion set combines opportunities the volunteer already
/// applied to or dismissed with any client-supplied exclusions.
#[inline]
pub fn is_excluded(opportunity: &Opportunity, exclude_ids: &[String]) -> bool {
    exclude_ids.contains(&opportunity.opportunity_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpportunityStatus;

    fn create_opportunity(id: &str, status: OpportunityStatus) -> Opportunity {
        Opportunity {
            opportunity_id: id.to_string(),
            organization_id: "org_1".to_string(),
            title: "Beach Cleanup".to_string(),
            required_skills: vec![],
            preferred_interests: vec![],
            location: None,
            status,
            created_at: None,
        }
    }

    #[test]
    fn test_open_is_eligible() {
        assert!(is_eligible(&create_opportunity("1", OpportunityStatus::Open)));
    }

    #[test]
    fn test_non_open_statuses_are_filtered() {
        for status in [
            OpportunityStatus::Closed,
            OpportunityStatus::Suspended,
            OpportunityStatus::Deleted,
        ] {
            assert!(!is_eligible(&create_opportunity("1", status)));
        }
    }

    #[test]
    fn test_exclusion_set() {
        let opportunity = create_opportunity("opp_2", OpportunityStatus::Open);
        let excluded = vec!["opp_1".to_string(), "opp_2".to_string()];

        assert!(is_excluded(&opportunity, &excluded));
        assert!(!is_excluded(&opportunity, &["opp_9".to_string()]));
        assert!(!is_excluded(&opportunity, &[]));
    }
}
