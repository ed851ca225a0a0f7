use crate::domain::errors::DomainResult;
use crate::domain::matches::{MatchDetails, Round};
use crate::domain::perspective::{self, TeamPerspective};
use crate::domain::team::Team;
use crate::domain::TeamId;

use super::{MatchStore, TeamStore};

/// A team together with its matches restated from its side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamView {
    pub team: Team,
    /// The round filter that was applied, if any
    pub round: Option<Round>,
    pub matches: Vec<TeamPerspective>,
}

/// Read-side façade used by the presentation layer
///
/// Delegates to the stores; the only thing it adds is the per-team
/// perspective in [`MatchdayQueries::team_view`].
#[derive(Clone)]
pub struct MatchdayQueries {
    teams: TeamStore,
    matches: MatchStore,
}

impl MatchdayQueries {
    pub fn new(teams: TeamStore, matches: MatchStore) -> Self {
        Self { teams, matches }
    }

    pub async fn teams(&self) -> DomainResult<Vec<Team>> {
        self.teams.list_all().await
    }

    /// The team with this id, or `NotFound`
    pub async fn team(&self, team_id: TeamId) -> DomainResult<Team> {
        self.teams.require(team_id).await
    }

    pub async fn matches_in_round(&self, round: Round) -> DomainResult<Vec<MatchDetails>> {
        self.matches.list_by_round(round).await
    }

    pub async fn matches_for_team(&self, team_id: TeamId) -> DomainResult<Vec<MatchDetails>> {
        self.matches.list_by_team(team_id).await
    }

    pub async fn matches_for_team_in_round(&self, team_id: TeamId, round: Round) -> DomainResult<Vec<MatchDetails>> {
        self.matches.list_by_team_and_round(team_id, round).await
    }

    /// Rounds that have at least one match
    pub async fn rounds(&self) -> DomainResult<Vec<Round>> {
        self.matches.list_rounds().await
    }

    /// Rounds with matches, or rounds 1 to 3 before any match exists
    pub async fn rounds_or_default(&self) -> DomainResult<Vec<Round>> {
        let rounds = self.rounds().await?;
        if rounds.is_empty() {
            return Ok(Round::DEFAULTS.to_vec());
        }
        Ok(rounds)
    }

    /// The round a round listing opens on: the latest one offered
    pub async fn default_round(&self) -> DomainResult<Round> {
        let rounds = self.rounds_or_default().await?;
        Ok(rounds.into_iter().max().unwrap_or(Round::FIRST))
    }

    /// A team's matches from its own point of view
    ///
    /// Without a round every match is included, most recent first;
    /// with one, only that round's matches in insertion order.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - If the team does not exist
    pub async fn team_view(&self, team_id: TeamId, round: Option<Round>) -> DomainResult<TeamView> {
        let team = self.teams.require(team_id).await?;

        let details = match round {
            Some(round) => self.matches_for_team_in_round(team_id, round).await?,
            None => self.matches_for_team(team_id).await?,
        };

        let matches = details
            .iter()
            .map(|d| perspective::perspective(d, team_id))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(TeamView {
            team,
            round,
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::perspective::{Side, TeamResult};
    use crate::infrastructure::repositories::{InMemoryMatchRepository, InMemoryTeamRepository};
    use std::sync::Arc;

    fn queries() -> (TeamStore, MatchStore, MatchdayQueries) {
        let team_repo = Arc::new(InMemoryTeamRepository::new());
        let teams = TeamStore::new(team_repo.clone());
        let matches = MatchStore::new(Arc::new(InMemoryMatchRepository::new()), team_repo);
        let queries = MatchdayQueries::new(teams.clone(), matches.clone());
        (teams, matches, queries)
    }

    #[tokio::test]
    async fn away_team_view_of_home_win() {
        let (teams, matches, queries) = queries();
        let alpha = teams.create("Alpha FC", "Stadium A").await.unwrap();
        let beta = teams.create("Beta FC", "Stadium B").await.unwrap();
        matches.create(alpha.id(), beta.id(), "1", 1).await.unwrap();

        let view = queries.team_view(beta.id(), None).await.unwrap();

        assert_eq!(view.team, beta);
        assert_eq!(view.matches.len(), 1);
        let p = &view.matches[0];
        assert_eq!(p.side, Side::Away);
        assert_eq!(p.result, TeamResult::Lost);
        assert_eq!(p.opponent.as_ref().map(Team::name), Some("Alpha FC"));
        assert_eq!(p.venue.as_deref(), Some("Stadium A"));
    }

    #[tokio::test]
    async fn team_view_filtered_by_round() {
        let (teams, matches, queries) = queries();
        let alpha = teams.create("Alpha FC", "Stadium A").await.unwrap();
        let beta = teams.create("Beta FC", "Stadium B").await.unwrap();
        matches.create(alpha.id(), beta.id(), "X", 1).await.unwrap();
        matches.create(beta.id(), alpha.id(), "1", 2).await.unwrap();

        let round = Round::new(2).unwrap();
        let view = queries.team_view(alpha.id(), Some(round)).await.unwrap();

        assert_eq!(view.round, Some(round));
        assert_eq!(view.matches.len(), 1);
        assert_eq!(view.matches[0].side, Side::Away);
        assert_eq!(view.matches[0].result, TeamResult::Lost);
        assert_eq!(view.matches[0].venue.as_deref(), Some("Stadium B"));
    }

    #[tokio::test]
    async fn team_view_of_unknown_team_is_not_found() {
        let (_, _, queries) = queries();

        let err = queries.team_view(12, None).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn default_rounds_before_any_match() {
        let (_, _, queries) = queries();

        assert!(queries.rounds().await.unwrap().is_empty());
        assert_eq!(queries.rounds_or_default().await.unwrap(), Round::DEFAULTS.to_vec());
        assert_eq!(queries.default_round().await.unwrap().get(), 3);
    }

    #[tokio::test]
    async fn default_round_is_latest_played() {
        let (teams, matches, queries) = queries();
        let alpha = teams.create("Alpha FC", "Stadium A").await.unwrap();
        let beta = teams.create("Beta FC", "Stadium B").await.unwrap();
        matches.create(alpha.id(), beta.id(), "2", 7).await.unwrap();
        matches.create(beta.id(), alpha.id(), "2", 5).await.unwrap();

        let rounds: Vec<i32> = queries.rounds_or_default().await.unwrap().iter().map(Round::get).collect();
        assert_eq!(rounds, vec![5, 7]);
        assert_eq!(queries.default_round().await.unwrap().get(), 7);
    }

    #[tokio::test]
    async fn matches_in_round_delegates() {
        let (teams, matches, queries) = queries();
        let alpha = teams.create("Alpha FC", "Stadium A").await.unwrap();
        let beta = teams.create("Beta FC", "Stadium B").await.unwrap();
        matches.create(alpha.id(), beta.id(), "2", 1).await.unwrap();

        assert_eq!(queries.matches_in_round(Round::FIRST).await.unwrap().len(), 1);
        assert!(queries
            .matches_in_round(Round::new(2).unwrap())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(queries.teams().await.unwrap().len(), 2);
    }
}
