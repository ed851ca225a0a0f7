use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::matches::{Match, NewMatch, Outcome, Round};
use crate::domain::{MatchId, TeamId};

/// Repository trait for matches
///
/// Stores team ids only. Implementations must reject a second
/// `(home, away, round)` triple atomically with the insert and report it
/// as `DuplicateFixture`.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert a match, assigning its id and creation timestamp
    async fn insert(&self, new_match: &NewMatch) -> DomainResult<Match>;

    /// Find a match by its ID
    async fn find_by_id(&self, id: MatchId) -> DomainResult<Option<Match>>;

    /// Every match, round descending then id descending
    async fn find_all(&self) -> DomainResult<Vec<Match>>;

    /// Matches of one round, ascending id
    async fn find_by_round(&self, round: Round) -> DomainResult<Vec<Match>>;

    /// Matches where the team played either side, round descending then id descending
    async fn find_by_team(&self, team_id: TeamId) -> DomainResult<Vec<Match>>;

    /// Matches of one team in one round, ascending id
    async fn find_by_team_and_round(&self, team_id: TeamId, round: Round) -> DomainResult<Vec<Match>>;

    /// Distinct rounds with at least one match, ascending
    async fn rounds(&self) -> DomainResult<Vec<Round>>;

    /// Highest round played, 0 if there are no matches
    async fn max_round(&self) -> DomainResult<i32>;

    /// Exact ordered `(home, away, round)` lookup
    async fn fixture_exists(&self, home_team_id: TeamId, away_team_id: TeamId, round: Round) -> DomainResult<bool>;

    /// Whether the two teams met in any round, either way round
    async fn teams_have_met(&self, team_a: TeamId, team_b: TeamId) -> DomainResult<bool>;

    /// Correct the outcome of a match; false if no match has this id
    async fn update_outcome(&self, id: MatchId, outcome: Outcome) -> DomainResult<bool>;

    /// Delete a match by ID; false if it did not exist
    async fn delete(&self, id: MatchId) -> DomainResult<bool>;

    async fn count(&self) -> DomainResult<i64>;
}
