use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{is_unique_violation, storage_error};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::matches::{Match, NewMatch, Outcome, Round};
use crate::domain::repositories::MatchRepository;
use crate::domain::{MatchId, TeamId};

/// Unique index on `matches (home_team_id, away_team_id, round)`
const FIXTURE_KEY: &str = "matches_fixture_key";

const MATCH_COLUMNS: &str = "id, home_team_id, away_team_id, outcome, round, created_at";

#[derive(Debug, sqlx::FromRow)]
struct MatchRow {
    id: i64,
    home_team_id: i64,
    away_team_id: i64,
    outcome: String,
    round: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<MatchRow> for Match {
    type Error = DomainError;

    fn try_from(r: MatchRow) -> Result<Self, Self::Error> {
        let outcome = Outcome::from_code(&r.outcome)
            .map_err(|e| DomainError::Storage(format!("Invalid outcome from database: {}", e)))?;
        let round = Round::new(r.round)
            .map_err(|e| DomainError::Storage(format!("Invalid round from database: {}", e)))?;

        Ok(Match::from_persistence(
            r.id,
            r.home_team_id,
            r.away_team_id,
            outcome,
            round,
            r.created_at,
        ))
    }
}

fn into_matches(rows: Vec<MatchRow>) -> DomainResult<Vec<Match>> {
    rows.into_iter().map(Match::try_from).collect()
}

/// PostgreSQL implementation of MatchRepository
///
/// The outcome is stored as its pool code (`1`, `X`, `2`). Fixture
/// uniqueness rests on the `matches_fixture_key` unique index.
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn insert(&self, new_match: &NewMatch) -> DomainResult<Match> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            INSERT INTO matches (home_team_id, away_team_id, outcome, round)
            VALUES ($1, $2, $3, $4)
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(new_match.home_team_id())
        .bind(new_match.away_team_id())
        .bind(new_match.outcome().code())
        .bind(new_match.round().get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, FIXTURE_KEY) {
                new_match.duplicate_error()
            } else {
                storage_error("Failed to insert match", e)
            }
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: MatchId) -> DomainResult<Option<Match>> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find match by id", e))?;

        row.map(Match::try_from).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches ORDER BY round DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list matches", e))?;

        into_matches(rows)
    }

    async fn find_by_round(&self, round: Round) -> DomainResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE round = $1 ORDER BY id ASC"
        ))
        .bind(round.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find matches by round", e))?;

        into_matches(rows)
    }

    async fn find_by_team(&self, team_id: TeamId) -> DomainResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM matches
            WHERE home_team_id = $1 OR away_team_id = $1
            ORDER BY round DESC, id DESC
            "#
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find matches by team", e))?;

        into_matches(rows)
    }

    async fn find_by_team_and_round(&self, team_id: TeamId, round: Round) -> DomainResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM matches
            WHERE (home_team_id = $1 OR away_team_id = $1) AND round = $2
            ORDER BY id ASC
            "#
        ))
        .bind(team_id)
        .bind(round.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find matches by team and round", e))?;

        into_matches(rows)
    }

    async fn rounds(&self) -> DomainResult<Vec<Round>> {
        let rounds = sqlx::query_scalar::<_, i32>(
            "SELECT DISTINCT round FROM matches ORDER BY round ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list rounds", e))?;

        rounds
            .into_iter()
            .map(|r| {
                Round::new(r)
                    .map_err(|e| DomainError::Storage(format!("Invalid round from database: {}", e)))
            })
            .collect()
    }

    async fn max_round(&self) -> DomainResult<i32> {
        let max = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(round) FROM matches")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to read max round", e))?;

        Ok(max.unwrap_or(0))
    }

    async fn fixture_exists(&self, home_team_id: TeamId, away_team_id: TeamId, round: Round) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM matches
                WHERE home_team_id = $1 AND away_team_id = $2 AND round = $3
            )
            "#,
        )
        .bind(home_team_id)
        .bind(away_team_id)
        .bind(round.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to check fixture", e))
    }

    async fn teams_have_met(&self, team_a: TeamId, team_b: TeamId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM matches
                WHERE (home_team_id = $1 AND away_team_id = $2)
                   OR (home_team_id = $2 AND away_team_id = $1)
            )
            "#,
        )
        .bind(team_a)
        .bind(team_b)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to check previous meetings", e))
    }

    async fn update_outcome(&self, id: MatchId, outcome: Outcome) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE matches SET outcome = $1 WHERE id = $2")
            .bind(outcome.code())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update match", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: MatchId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete match", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to count matches", e))
    }
}
