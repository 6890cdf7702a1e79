use crate::core::Matcher;
use crate::models::{
    ErrorResponse, HealthResponse, Opportunity, RecommendationsRequest, RecommendationsResponse,
    RecordEngagementRequest, RecordEngagementResponse, VolunteerProfile,
};
use crate::services::{CacheKey, CacheManager, EngagementKind, PostgresClient, PostgresError};
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub limits: MatchingLimits,
}

/// Request limits resolved from configuration
#[derive(Debug, Clone, Copy)]
pub struct MatchingLimits {
    pub max_limit: u16,
    pub candidate_pool: usize,
}

/// Engagement history payload (cached per volunteer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementHistoryResponse {
    #[serde(rename = "volunteerId")]
    pub volunteer_id: String,
    pub history: Vec<crate::services::EngagementRecord>,
    pub stats: crate::services::EngagementStats,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations/find", web::post().to(find_recommendations))
        .route("/recommendations/event", web::post().to(record_engagement))
        .route("/recommendations/history", web::get().to(engagement_history));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find recommendations endpoint
///
/// POST /api/v1/recommendations/find
///
/// Request body:
/// ```json
/// {
///   "volunteerId": "string",
///   "limit": 20,
///   "excludeOpportunityIds": ["string"]
/// }
/// ```
async fn find_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_recommendations request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let volunteer_id = &req.volunteer_id;
    let limit = req.limit.min(state.limits.max_limit) as usize;

    tracing::info!("Finding recommendations for volunteer: {}, limit: {}", volunteer_id, limit);

    // Fetch opportunities the volunteer applied to or dismissed so they
    // never come back; a fetch failure degrades to an empty exclusion set.
    let mut exclude_ids = match state.postgres.excluded_opportunities(volunteer_id).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch exclusions for {}, proceeding without filtering: {}",
                volunteer_id,
                e
            );
            vec![]
        }
    };

    exclude_ids.extend(req.exclude_opportunity_ids.clone());

    tracing::debug!(
        "Excluding {} opportunities for volunteer {}",
        exclude_ids.len(),
        volunteer_id
    );

    let profile = match fetch_profile(&state, volunteer_id).await {
        Ok(profile) => profile,
        Err(PostgresError::NotFound(what)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Volunteer profile not found".to_string(),
                message: what,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", volunteer_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch volunteer profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let candidates = match fetch_candidates(&state).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", volunteer_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query opportunities".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Scoring {} candidates for {}", candidates.len(), volunteer_id);

    let result = state
        .matcher
        .compute_matches(&profile, candidates, &exclude_ids, limit);

    let response = RecommendationsResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} recommendations for volunteer {} (from {} candidates)",
        response.matches.len(),
        volunteer_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Fetch a volunteer profile, preferring the cache
async fn fetch_profile(
    state: &web::Data<AppState>,
    volunteer_id: &str,
) -> Result<VolunteerProfile, PostgresError> {
    let cache_key = CacheKey::profile(volunteer_id);

    if let Ok(profile) = state.cache.get::<VolunteerProfile>(&cache_key).await {
        return Ok(profile);
    }

    let profile = state.postgres.find_volunteer_profile(volunteer_id).await?;

    if let Err(e) = state.cache.set(&cache_key, &profile).await {
        tracing::warn!("Failed to cache profile {}: {}", volunteer_id, e);
    }

    Ok(profile)
}

/// Fetch the shared open-opportunity pool, preferring the cache
async fn fetch_candidates(
    state: &web::Data<AppState>,
) -> Result<Vec<Opportunity>, PostgresError> {
    let cache_key = CacheKey::open_opportunities();

    if let Ok(candidates) = state.cache.get::<Vec<Opportunity>>(&cache_key).await {
        return Ok(candidates);
    }

    let candidates = state
        .postgres
        .find_open_opportunities(state.limits.candidate_pool)
        .await?;

    if let Err(e) = state.cache.set(&cache_key, &candidates).await {
        tracing::warn!("Failed to cache open opportunities: {}", e);
    }

    Ok(candidates)
}

/// Record engagement endpoint
///
/// POST /api/v1/recommendations/event
///
/// Request body:
/// ```json
/// {
///   "volunteerId": "string",
///   "opportunityId": "string",
///   "eventType": "viewed|saved|applied|dismissed"
/// }
/// ```
async fn record_engagement(
    state: web::Data<AppState>,
    req: web::Json<RecordEngagementRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let kind = match EngagementKind::parse(&req.event_type) {
        Ok(kind) => kind,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid event type".to_string(),
                message: "Event type must be one of: viewed, saved, applied, dismissed"
                    .to_string(),
                status_code: 400,
            });
        }
    };

    match state
        .postgres
        .record_engagement(&req.volunteer_id, &req.opportunity_id, kind)
        .await
    {
        Ok(_) => {
            tracing::debug!(
                "Recorded engagement: {} -> {} ({})",
                req.volunteer_id,
                req.opportunity_id,
                req.event_type
            );

            // The cached history for this volunteer is now stale
            let cache_key = CacheKey::history(&req.volunteer_id);
            if let Err(e) = state.cache.delete(&cache_key).await {
                tracing::warn!("Failed to invalidate history cache: {}", e);
            }

            HttpResponse::Ok().json(RecordEngagementResponse {
                success: true,
                event_id: uuid::Uuid::new_v4().to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to record engagement: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record engagement".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Get a volunteer's engagement history
///
/// GET /api/v1/recommendations/history?volunteerId={volunteerId}
///
/// Returns the recorded engagements plus per-kind counts, for client-side
/// synchronization and debugging purposes.
async fn engagement_history(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let volunteer_id = match query.get("volunteerId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing volunteerId parameter".to_string(),
                message: "volunteerId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let cache_key = CacheKey::history(volunteer_id);
    if let Ok(cached) = state.cache.get::<EngagementHistoryResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let history = match state.postgres.engagement_history(volunteer_id, 100, 0).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!("Failed to fetch history for {}: {}", volunteer_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch engagement history".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let stats = match state.postgres.engagement_stats(volunteer_id).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Failed to fetch stats for {}: {}", volunteer_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch engagement stats".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let response = EngagementHistoryResponse {
        volunteer_id: volunteer_id.clone(),
        history,
        stats,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache history for {}: {}", volunteer_id, e);
    }

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_limits_cap_request() {
        let limits = MatchingLimits {
            max_limit: 100,
            candidate_pool: 500,
        };
        let requested: u16 = 250;
        assert_eq!(requested.min(limits.max_limit), 100);
    }
}
