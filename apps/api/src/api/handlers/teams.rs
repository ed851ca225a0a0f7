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

use super::RoundQuery;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::matches::Outcome;
use crate::domain::perspective::{Side, TeamPerspective, TeamResult};
use crate::domain::team::Team;
use crate::domain::{MatchId, TeamId};
use crate::services::TeamView;

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub venue: String,
}

/// Team as returned by the API
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: TeamId,
    pub name: String,
    pub venue: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            venue: team.venue().to_string(),
            created_at: team.created_at(),
        }
    }
}

/// One match seen from the requested team
#[derive(Debug, Serialize)]
pub struct TeamMatchResponse {
    pub match_id: MatchId,
    pub round: i32,
    pub side: Side,
    pub result: TeamResult,
    pub outcome: Outcome,
    pub opponent: Option<TeamResponse>,
    pub venue: Option<String>,
}

impl From<&TeamPerspective> for TeamMatchResponse {
    fn from(p: &TeamPerspective) -> Self {
        Self {
            match_id: p.match_id,
            round: p.round.get(),
            side: p.side,
            result: p.result,
            outcome: p.outcome,
            opponent: p.opponent.as_ref().map(TeamResponse::from),
            venue: p.venue.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamViewResponse {
    pub team: TeamResponse,
    pub round: Option<i32>,
    pub matches: Vec<TeamMatchResponse>,
}

impl From<&TeamView> for TeamViewResponse {
    fn from(view: &TeamView) -> Self {
        Self {
            team: TeamResponse::from(&view.team),
            round: view.round.map(|r| r.get()),
            matches: view.matches.iter().map(TeamMatchResponse::from).collect(),
        }
    }
}

/// Create a new team
///
/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let Json(req) = payload?;
    let team = state.teams.create(&req.name, &req.venue).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// List all teams by name
///
/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = state.queries.teams().await?;

    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    id: Result<Path<TeamId>, PathRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Path(id) = id?;
    let team = state.queries.team(id).await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// A team's matches from its own side, optionally for one round
///
/// GET /api/teams/:id/matches?round=N
pub async fn get_team_matches(
    State(state): State<AppState>,
    id: Result<Path<TeamId>, PathRejection>,
    query: Result<Query<RoundQuery>, QueryRejection>,
) -> Result<Json<TeamViewResponse>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let round = query.round()?;
    let view = state.queries.team_view(id, round).await?;

    Ok(Json(TeamViewResponse::from(&view)))
}
