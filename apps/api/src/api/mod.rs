// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::{routing::get, Router};

use handlers::{health, matches, rounds, teams};

/// Builds the application router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Team routes
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route("/api/teams/:id", get(teams::get_team))
        .route("/api/teams/:id/matches", get(teams::get_team_matches))
        // Match routes
        .route("/api/matches", get(matches::list_matches).post(matches::create_match))
        .route("/api/matches/:id", get(matches::get_match))
        // Round routes
        .route("/api/rounds", get(rounds::list_rounds))
        .fallback(handlers::route_not_found)
        .with_state(state)
}
