use crate::models::{normalize_tags, Location, Opportunity, OpportunityStatus, VolunteerProfile};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Kinds of volunteer engagement with an opportunity
///
/// `Applied` and `Dismissed` add the opportunity to the volunteer's
/// exclusion set; `Viewed` and `Saved` are recorded for history only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "engagement_kind", rename_all = "lowercase")]
pub enum EngagementKind {
    Viewed,
    Saved,
    Applied,
    Dismissed,
}

impl EngagementKind {
    /// Parse a wire-format event type
    pub fn parse(value: &str) -> Result<Self, PostgresError> {
        match value.to_lowercase().as_str() {
            "viewed" => Ok(EngagementKind::Viewed),
            "saved" => Ok(EngagementKind::Saved),
            "applied" => Ok(EngagementKind::Applied),
            "dismissed" => Ok(EngagementKind::Dismissed),
            other => Err(PostgresError::InvalidInput(format!(
                "unknown event type: {}",
                other
            ))),
        }
    }
}

/// A recorded engagement row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecord {
    #[serde(rename = "volunteerId")]
    pub volunteer_id: String,
    #[serde(rename = "opportunityId")]
    pub opportunity_id: String,
    pub kind: EngagementKind,
    #[serde(rename = "occurredAt")]
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

/// Repository over the Volunteer Connect database
///
/// Owns all SQL in the service. Rows are mapped into typed records at
/// this boundary (tag arrays normalized, statuses parsed), so the
/// matching core never touches raw column data.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch a volunteer's matching profile
    pub async fn find_volunteer_profile(
        &self,
        volunteer_id: &str,
    ) -> Result<VolunteerProfile, PostgresError> {
        let query = r#"
            SELECT volunteer_id, name, skills, interests, city, state
            FROM volunteer_profiles
            WHERE volunteer_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(volunteer_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                PostgresError::NotFound(format!("volunteer profile {}", volunteer_id))
            })?;

        Ok(VolunteerProfile {
            volunteer_id: row.get("volunteer_id"),
            name: row.get("name"),
            skills: normalize_tags(row.get::<Vec<String>, _>("skills")),
            interests: normalize_tags(row.get::<Vec<String>, _>("interests")),
            location: location_from_row(
                row.get::<Option<String>, _>("city"),
                row.get::<Option<String>, _>("state"),
            ),
        })
    }

    /// Fetch the current pool of open opportunities, newest first
    ///
    /// Exclusions are applied later by the matcher so the pool can be
    /// shared across volunteers.
    pub async fn find_open_opportunities(
        &self,
        limit: usize,
    ) -> Result<Vec<Opportunity>, PostgresError> {
        let query = r#"
            SELECT opportunity_id, organization_id, title,
                   required_skills, preferred_interests,
                   city, state, status, created_at
            FROM opportunities
            WHERE status = 'open'
            ORDER BY created_at DESC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let opportunities = rows
            .iter()
            .map(|row| Opportunity {
                opportunity_id: row.get("opportunity_id"),
                organization_id: row.get("organization_id"),
                title: row.get("title"),
                required_skills: normalize_tags(row.get::<Vec<String>, _>("required_skills")),
                preferred_interests: normalize_tags(
                    row.get::<Vec<String>, _>("preferred_interests"),
                ),
                location: location_from_row(
                    row.get::<Option<String>, _>("city"),
                    row.get::<Option<String>, _>("state"),
                ),
                status: OpportunityStatus::from_db(row.get::<String, _>("status").as_str()),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(opportunities)
    }

    /// Record a volunteer's engagement with an opportunity
    ///
    /// Uses INSERT ... ON CONFLICT so a repeat action replaces the
    /// previous kind and timestamp.
    pub async fn record_engagement(
        &self,
        volunteer_id: &str,
        opportunity_id: &str,
        kind: EngagementKind,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO opportunity_engagements (volunteer_id, opportunity_id, kind, occurred_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (volunteer_id, opportunity_id)
            DO UPDATE SET
                kind = EXCLUDED.kind,
                occurred_at = EXCLUDED.occurred_at
        "#;

        sqlx::query(query)
            .bind(volunteer_id)
            .bind(opportunity_id)
            .bind(&kind)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded engagement: {} -> {} ({:?})",
            volunteer_id,
            opportunity_id,
            kind
        );

        Ok(())
    }

    /// Get the opportunity ids excluded from a volunteer's recommendations
    ///
    /// Applied and dismissed opportunities never come back; viewed and
    /// saved ones stay recommendable.
    pub async fn excluded_opportunities(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT opportunity_id
            FROM opportunity_engagements
            WHERE volunteer_id = $1
              AND kind IN ('applied', 'dismissed')
        "#;

        let rows = sqlx::query(query)
            .bind(volunteer_id)
            .fetch_all(&self.pool)
            .await?;

        let excluded: Vec<String> = rows.iter().map(|row| row.get("opportunity_id")).collect();

        tracing::debug!(
            "Volunteer {} has {} excluded opportunities",
            volunteer_id,
            excluded.len()
        );

        Ok(excluded)
    }

    /// Get a volunteer's engagement history, newest first
    pub async fn engagement_history(
        &self,
        volunteer_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<EngagementRecord>, PostgresError> {
        let query = r#"
            SELECT volunteer_id, opportunity_id, kind, occurred_at
            FROM opportunity_engagements
            WHERE volunteer_id = $1
            ORDER BY occurred_at DESC
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(query)
            .bind(volunteer_id)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| EngagementRecord {
                volunteer_id: row.get("volunteer_id"),
                opportunity_id: row.get("opportunity_id"),
                kind: row.get("kind"),
                occurred_at: row.get("occurred_at"),
            })
            .collect();

        Ok(records)
    }

    /// Get engagement statistics for a volunteer
    pub async fn engagement_stats(
        &self,
        volunteer_id: &str,
    ) -> Result<EngagementStats, PostgresError> {
        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE kind = 'viewed') as viewed,
                COUNT(*) FILTER (WHERE kind = 'saved') as saved,
                COUNT(*) FILTER (WHERE kind = 'applied') as applied,
                COUNT(*) FILTER (WHERE kind = 'dismissed') as dismissed,
                MAX(occurred_at) as last_activity_at
            FROM opportunity_engagements
            WHERE volunteer_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(volunteer_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(EngagementStats {
            volunteer_id: volunteer_id.to_string(),
            total: row.get("total"),
            viewed: row.get("viewed"),
            saved: row.get("saved"),
            applied: row.get("applied"),
            dismissed: row.get("dismissed"),
            last_activity_at: row.get("last_activity_at"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn location_from_row(city: Option<String>, state: Option<String>) -> Option<Location> {
    match (city, state) {
        (None, None) => None,
        (city, state) => Some(Location {
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
        }),
    }
}

/// Statistics about a volunteer's engagement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementStats {
    #[serde(rename = "volunteerId")]
    pub volunteer_id: String,
    pub total: i64,
    pub viewed: i64,
    pub saved: i64,
    pub applied: i64,
    pub dismissed: i64,
    #[serde(rename = "lastActivityAt")]
    pub last_activity_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_kind_parse() {
        assert!(matches!(
            EngagementKind::parse("Applied"),
            Ok(EngagementKind::Applied)
        ));
        assert!(matches!(
            EngagementKind::parse("viewed"),
            Ok(EngagementKind::Viewed)
        ));
        assert!(EngagementKind::parse("poked").is_err());
    }

    #[test]
    fn test_location_from_row() {
        assert_eq!(location_from_row(None, None), None);

        let partial = location_from_row(Some("KL".to_string()), None).unwrap();
        assert_eq!(partial.city, "KL");
        assert_eq!(partial.state, "");

        let full =
            location_from_row(Some("KL".to_string()), Some("Selangor".to_string())).unwrap();
        assert_eq!(full.state, "Selangor");
    }
}
