use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::teams::TeamResponse;
use super::RoundQuery;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::errors::DomainError;
use crate::domain::matches::{MatchDetails, Outcome};
use crate::domain::{MatchId, TeamId};

/// Request body for recording a match
///
/// `outcome` is the pool code: `"1"`, `"X"` or `"2"`. It is taken as raw
/// JSON so a malformed code is reported by the match rules, after the
/// self-match check, instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[serde(default)]
    pub outcome: Value,
    pub round: i32,
}

impl CreateMatchRequest {
    /// The outcome as a code string; numbers keep their digits
    fn outcome_code(&self) -> String {
        match &self.outcome {
            Value::String(code) => code.clone(),
            other => other.to_string(),
        }
    }
}

/// Match with both teams resolved
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: MatchId,
    pub round: i32,
    pub outcome: Outcome,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_team: Option<TeamResponse>,
    pub away_team: Option<TeamResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<&MatchDetails> for MatchResponse {
    fn from(details: &MatchDetails) -> Self {
        let record = &details.record;
        Self {
            id: record.id(),
            round: record.round().get(),
            outcome: record.outcome(),
            home_team_id: record.home_team_id(),
            away_team_id: record.away_team_id(),
            home_team: details.home.as_ref().map(TeamResponse::from),
            away_team: details.away.as_ref().map(TeamResponse::from),
            created_at: record.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoundMatchesResponse {
    pub round: i32,
    pub matches: Vec<MatchResponse>,
}

/// Record a match result
///
/// POST /api/matches
pub async fn create_match(
    State(state): State<AppState>,
    payload: Result<Json<CreateMatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let Json(req) = payload?;
    let details = state
        .matches
        .create(req.home_team_id, req.away_team_id, &req.outcome_code(), req.round)
        .await?;

    Ok((StatusCode::CREATED, Json(MatchResponse::from(&details))))
}

/// Matches of one round; the latest round when none is given
///
/// GET /api/matches?round=N
pub async fn list_matches(
    State(state): State<AppState>,
    query: Result<Query<RoundQuery>, QueryRejection>,
) -> Result<Json<RoundMatchesResponse>, ApiError> {
    let Query(query) = query?;
    let round = match query.round()? {
        Some(round) => round,
        None => state.queries.default_round().await?,
    };
    let matches = state.queries.matches_in_round(round).await?;

    Ok(Json(RoundMatchesResponse {
        round: round.get(),
        matches: matches.iter().map(MatchResponse::from).collect(),
    }))
}

/// Get a match by ID
///
/// GET /api/matches/:id
pub async fn get_match(
    State(state): State<AppState>,
    id: Result<Path<MatchId>, PathRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Path(id) = id?;
    let details = state
        .matches
        .get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::match_not_found(id))?;

    Ok(Json(MatchResponse::from(&details)))
}
