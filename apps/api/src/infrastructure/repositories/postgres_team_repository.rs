use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{is_unique_violation, storage_error};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{NewTeam, Team, TeamName, Venue};
use crate::domain::TeamId;

/// Unique index on `teams.name`
const TEAM_NAME_KEY: &str = "teams_name_key";

#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    venue: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = DomainError;

    fn try_from(r: TeamRow) -> Result<Self, Self::Error> {
        let name = TeamName::new(&r.name)
            .map_err(|e| DomainError::Storage(format!("Invalid team name from database: {}", e)))?;
        let venue = Venue::new(&r.venue)
            .map_err(|e| DomainError::Storage(format!("Invalid venue from database: {}", e)))?;

        Ok(Team::from_persistence(r.id, name, venue, r.created_at))
    }
}

/// PostgreSQL implementation of TeamRepository
///
/// Name uniqueness rests on the `teams_name_key` unique index, so two
/// concurrent inserts of the same name cannot both succeed.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn insert(&self, team: &NewTeam) -> DomainResult<Team> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            INSERT INTO teams (name, venue)
            VALUES ($1, $2)
            RETURNING id, name, venue, created_at
            "#,
        )
        .bind(team.name().as_str())
        .bind(team.venue().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, TEAM_NAME_KEY) {
                DomainError::DuplicateName(team.name().to_string())
            } else {
                storage_error("Failed to insert team", e)
            }
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, venue, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find team by id", e))?;

        row.map(Team::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, venue, created_at
            FROM teams
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find team by name", e))?;

        row.map(Team::try_from).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, venue, created_at
            FROM teams
            -- byte order, same as the in-memory adapter
            ORDER BY name COLLATE "C" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list teams", e))?;

        rows.into_iter().map(Team::try_from).collect()
    }

    async fn update(&self, team: &Team) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $1, venue = $2
            WHERE id = $3
            "#,
        )
        .bind(team.name())
        .bind(team.venue())
        .bind(team.id())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, TEAM_NAME_KEY) {
                DomainError::DuplicateName(team.name().to_string())
            } else {
                storage_error("Failed to update team", e)
            }
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TeamId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete team", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to count teams", e))
    }
}
