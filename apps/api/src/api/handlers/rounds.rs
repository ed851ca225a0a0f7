use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoundsResponse {
    /// Rounds with matches, or 1 to 3 before any match exists
    pub rounds: Vec<i32>,
    /// Round a listing opens on when none is requested
    pub default_round: i32,
}

/// List the rounds that can be browsed
///
/// GET /api/rounds
pub async fn list_rounds(State(state): State<AppState>) -> Result<Json<RoundsResponse>, ApiError> {
    let rounds = state.queries.rounds_or_default().await?;
    let default_round = state.queries.default_round().await?;

    Ok(Json(RoundsResponse {
        rounds: rounds.iter().map(|r| r.get()).collect(),
        default_round: default_round.get(),
    }))
}
