use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{MatchRepository, TeamRepository};
use crate::infrastructure::repositories::{
    InMemoryMatchRepository, InMemoryTeamRepository, PostgresMatchRepository, PostgresTeamRepository,
};
use crate::services::{MatchStore, MatchdayQueries, TeamStore};

/// Services shared by every request handler
///
/// Built once at startup from explicitly constructed repositories.
#[derive(Clone)]
pub struct AppState {
    pub teams: TeamStore,
    pub matches: MatchStore,
    pub queries: MatchdayQueries,
}

impl AppState {
    pub fn new(team_repo: Arc<dyn TeamRepository>, match_repo: Arc<dyn MatchRepository>) -> Self {
        let teams = TeamStore::new(team_repo.clone());
        let matches = MatchStore::new(match_repo, team_repo);
        let queries = MatchdayQueries::new(teams.clone(), matches.clone());

        Self {
            teams,
            matches,
            queries,
        }
    }

    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresTeamRepository::new(pool.clone())),
            Arc::new(PostgresMatchRepository::new(pool)),
        )
    }

    /// State backed by process memory; data is lost on exit
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryTeamRepository::new()),
            Arc::new(InMemoryMatchRepository::new()),
        )
    }
}
