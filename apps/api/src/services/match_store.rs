use std::collections::HashMap;
use std::sync::Arc;

use super::log_rejection;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::matches::{Match, MatchDetails, NewMatch, Outcome, Round};
use crate::domain::repositories::{MatchRepository, TeamRepository};
use crate::domain::team::Team;
use crate::domain::{MatchId, TeamId};

/// Owns match records and the fixture invariants
///
/// Team records are read through the injected team repository only to
/// check existence and to resolve both sides of a listed match.
#[derive(Clone)]
pub struct MatchStore {
    matches: Arc<dyn MatchRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl MatchStore {
    pub fn new(matches: Arc<dyn MatchRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { matches, teams }
    }

    /// Records a match result
    ///
    /// # Validation Order
    /// 1. `SelfMatch` if home and away are the same team
    /// 2. `InvalidOutcome` if the code is not `1`, `X` or `2`
    /// 3. `InvalidInput` for non-positive ids or round
    /// 4. `NotFound` if either team does not exist
    /// 5. `DuplicateFixture` if `(home, away, round)` is already recorded
    ///
    /// Nothing is written unless every step passes. The reverse pairing
    /// `(away, home, round)` is not treated as a duplicate.
    pub async fn create(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
        outcome: &str,
        round: i32,
    ) -> DomainResult<MatchDetails> {
        let result = self.try_create(home_team_id, away_team_id, outcome, round).await;

        match &result {
            Ok(details) => tracing::info!(
                match_id = details.record.id(),
                home_team_id,
                away_team_id,
                round,
                outcome = details.record.outcome().code(),
                "Match recorded"
            ),
            Err(e) => log_rejection("Match creation", e),
        }
        result
    }

    async fn try_create(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
        outcome: &str,
        round: i32,
    ) -> DomainResult<MatchDetails> {
        let draft = NewMatch::new(home_team_id, away_team_id, outcome, round)?;

        let home = self.existing_team(draft.home_team_id()).await?;
        let away = self.existing_team(draft.away_team_id()).await?;

        let record = self.matches.insert(&draft).await?;

        Ok(MatchDetails {
            record,
            home: Some(home),
            away: Some(away),
        })
    }

    async fn existing_team(&self, id: TeamId) -> DomainResult<Team> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::team_not_found(id))
    }

    pub async fn get_by_id(&self, id: MatchId) -> DomainResult<Option<MatchDetails>> {
        tracing::debug!(match_id = id, "Fetching match");
        match self.matches.find_by_id(id).await? {
            Some(record) => Ok(self.resolve(vec![record]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Every match, most recent round first
    pub async fn list_all(&self) -> DomainResult<Vec<MatchDetails>> {
        let records = self.matches.find_all().await?;
        self.resolve(records).await
    }

    /// Matches of a round in insertion order
    pub async fn list_by_round(&self, round: Round) -> DomainResult<Vec<MatchDetails>> {
        tracing::debug!(round = round.get(), "Listing matches by round");
        let records = self.matches.find_by_round(round).await?;
        self.resolve(records).await
    }

    /// Matches where the team played either side, most recent first
    pub async fn list_by_team(&self, team_id: TeamId) -> DomainResult<Vec<MatchDetails>> {
        tracing::debug!(team_id, "Listing matches by team");
        let records = self.matches.find_by_team(team_id).await?;
        self.resolve(records).await
    }

    pub async fn list_by_team_and_round(&self, team_id: TeamId, round: Round) -> DomainResult<Vec<MatchDetails>> {
        tracing::debug!(team_id, round = round.get(), "Listing matches by team and round");
        let records = self.matches.find_by_team_and_round(team_id, round).await?;
        self.resolve(records).await
    }

    /// Distinct rounds that have at least one match, ascending
    pub async fn list_rounds(&self) -> DomainResult<Vec<Round>> {
        self.matches.rounds().await
    }

    /// Highest round with a match, 0 when there are none
    pub async fn max_round(&self) -> DomainResult<i32> {
        self.matches.max_round().await
    }

    pub async fn fixture_exists(&self, home_team_id: TeamId, away_team_id: TeamId, round: Round) -> DomainResult<bool> {
        self.matches.fixture_exists(home_team_id, away_team_id, round).await
    }

    pub async fn teams_have_met(&self, team_a: TeamId, team_b: TeamId) -> DomainResult<bool> {
        self.matches.teams_have_met(team_a, team_b).await
    }

    /// Corrects the outcome of a recorded match
    ///
    /// Returns false if no match has this id.
    pub async fn update_outcome(&self, id: MatchId, outcome: &str) -> DomainResult<bool> {
        let result = match Outcome::from_code(outcome) {
            Ok(outcome) => self.matches.update_outcome(id, outcome).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(updated) => tracing::info!(match_id = id, outcome, updated, "Match outcome correction"),
            Err(e) => log_rejection("Match outcome correction", e),
        }
        result
    }

    pub async fn delete(&self, id: MatchId) -> DomainResult<bool> {
        let deleted = self.matches.delete(id).await?;
        tracing::info!(match_id = id, deleted, "Match delete");
        Ok(deleted)
    }

    pub async fn count(&self) -> DomainResult<i64> {
        self.matches.count().await
    }

    /// Attaches both team records to each match
    ///
    /// Each team is fetched once per call. A team that no longer exists
    /// leaves its side empty instead of failing the listing.
    async fn resolve(&self, records: Vec<Match>) -> DomainResult<Vec<MatchDetails>> {
        let mut cache: HashMap<TeamId, Option<Team>> = HashMap::new();
        let mut resolved = Vec::with_capacity(records.len());

        for record in records {
            let home = self.cached_team(&mut cache, record.home_team_id()).await?;
            let away = self.cached_team(&mut cache, record.away_team_id()).await?;
            if home.is_none() || away.is_none() {
                tracing::warn!(match_id = record.id(), "Match references a missing team");
            }
            resolved.push(MatchDetails { record, home, away });
        }

        Ok(resolved)
    }

    async fn cached_team(
        &self,
        cache: &mut HashMap<TeamId, Option<Team>>,
        id: TeamId,
    ) -> DomainResult<Option<Team>> {
        if let Some(team) = cache.get(&id) {
            return Ok(team.clone());
        }
        let team = self.teams.find_by_id(id).await?;
        cache.insert(id, team.clone());
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::{InMemoryMatchRepository, InMemoryTeamRepository};
    use crate::services::TeamStore;

    struct Fixture {
        teams: TeamStore,
        matches: MatchStore,
        alpha: TeamId,
        beta: TeamId,
        gamma: TeamId,
    }

    async fn fixture() -> Fixture {
        let team_repo = Arc::new(InMemoryTeamRepository::new());
        let teams = TeamStore::new(team_repo.clone());
        let matches = MatchStore::new(Arc::new(InMemoryMatchRepository::new()), team_repo);

        let alpha = teams.create("Alpha FC", "Stadium A").await.unwrap().id();
        let beta = teams.create("Beta FC", "Stadium B").await.unwrap().id();
        let gamma = teams.create("Gamma CF", "Stadium G").await.unwrap().id();

        Fixture {
            teams,
            matches,
            alpha,
            beta,
            gamma,
        }
    }

    fn round(n: i32) -> Round {
        Round::new(n).unwrap()
    }

    #[tokio::test]
    async fn create_resolves_both_teams() {
        let f = fixture().await;

        let details = f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();

        assert_eq!(details.record.outcome(), Outcome::Home);
        assert_eq!(details.home.as_ref().map(Team::name), Some("Alpha FC"));
        assert_eq!(details.away.as_ref().map(Team::name), Some("Beta FC"));
    }

    #[tokio::test]
    async fn listing_a_round_returns_the_created_match() {
        let f = fixture().await;
        let created = f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();

        let listed = f.matches.list_by_round(round(1)).await.unwrap();

        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn exact_repeat_is_duplicate_fixture() {
        let f = fixture().await;
        f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();

        let err = f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap_err();

        assert_eq!(err.kind(), "DUPLICATE_FIXTURE");
        assert_eq!(f.matches.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn repeat_with_other_outcome_is_still_duplicate() {
        let f = fixture().await;
        f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();

        let err = f.matches.create(f.alpha, f.beta, "2", 1).await.unwrap_err();
        assert_eq!(err.kind(), "DUPLICATE_FIXTURE");
    }

    #[tokio::test]
    async fn reverse_pairing_in_same_round_is_accepted() {
        let f = fixture().await;
        f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();

        assert!(f.matches.create(f.beta, f.alpha, "X", 1).await.is_ok());
        assert!(!f.matches.fixture_exists(f.gamma, f.alpha, round(1)).await.unwrap());
    }

    #[tokio::test]
    async fn self_match_wins_over_every_other_error() {
        let f = fixture().await;

        let err = f.matches.create(f.alpha, f.alpha, "X", 2).await.unwrap_err();
        assert_eq!(err, DomainError::SelfMatch);

        let err = f.matches.create(999, 999, "bad", 0).await.unwrap_err();
        assert_eq!(err, DomainError::SelfMatch);
    }

    #[tokio::test]
    async fn invalid_outcome_wins_over_duplicate() {
        let f = fixture().await;
        f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();

        let err = f.matches.create(f.alpha, f.beta, "H", 1).await.unwrap_err();

        assert_eq!(err, DomainError::InvalidOutcome("H".to_string()));
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let f = fixture().await;

        let err = f.matches.create(f.alpha, 77, "1", 1).await.unwrap_err();

        assert_eq!(err, DomainError::team_not_found(77));
        assert_eq!(f.matches.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_by_team_returns_only_its_matches_newest_first() {
        let f = fixture().await;
        let m1 = f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();
        let m2 = f.matches.create(f.gamma, f.beta, "X", 1).await.unwrap();
        let m3 = f.matches.create(f.gamma, f.alpha, "2", 2).await.unwrap();
        let m4 = f.matches.create(f.beta, f.alpha, "1", 1).await.unwrap();

        let ids: Vec<MatchId> = f
            .matches
            .list_by_team(f.alpha)
            .await
            .unwrap()
            .iter()
            .map(|d| d.record.id())
            .collect();

        assert_eq!(ids, vec![m3.record.id(), m4.record.id(), m1.record.id()]);
        assert!(!ids.contains(&m2.record.id()));
    }

    #[tokio::test]
    async fn list_by_team_and_round_ascending() {
        let f = fixture().await;
        let m1 = f.matches.create(f.alpha, f.beta, "1", 3).await.unwrap();
        f.matches.create(f.alpha, f.gamma, "1", 4).await.unwrap();
        let m3 = f.matches.create(f.gamma, f.alpha, "X", 3).await.unwrap();

        let ids: Vec<MatchId> = f
            .matches
            .list_by_team_and_round(f.alpha, round(3))
            .await
            .unwrap()
            .iter()
            .map(|d| d.record.id())
            .collect();

        assert_eq!(ids, vec![m1.record.id(), m3.record.id()]);
    }

    #[tokio::test]
    async fn rounds_are_distinct_and_ascending() {
        let f = fixture().await;
        for (home, away, r) in [(f.alpha, f.beta, 4), (f.beta, f.gamma, 2), (f.gamma, f.alpha, 4), (f.alpha, f.gamma, 1)] {
            f.matches.create(home, away, "X", r).await.unwrap();
        }

        let rounds: Vec<i32> = f.matches.list_rounds().await.unwrap().iter().map(Round::get).collect();

        assert_eq!(rounds, vec![1, 2, 4]);
        assert_eq!(f.matches.max_round().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn teams_have_met_ignores_roles_and_rounds() {
        let f = fixture().await;
        f.matches.create(f.beta, f.alpha, "2", 5).await.unwrap();

        assert!(f.matches.teams_have_met(f.alpha, f.beta).await.unwrap());
        assert!(f.matches.teams_have_met(f.beta, f.alpha).await.unwrap());
        assert!(!f.matches.teams_have_met(f.alpha, f.gamma).await.unwrap());
        assert!(f.matches.fixture_exists(f.beta, f.alpha, round(5)).await.unwrap());
        assert!(!f.matches.fixture_exists(f.alpha, f.beta, round(5)).await.unwrap());
    }

    #[tokio::test]
    async fn update_outcome_validates_code() {
        let f = fixture().await;
        let created = f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();
        let id = created.record.id();

        assert_eq!(
            f.matches.update_outcome(id, "4").await.unwrap_err().kind(),
            "INVALID_OUTCOME"
        );
        assert!(f.matches.update_outcome(id, "2").await.unwrap());
        assert!(!f.matches.update_outcome(id + 100, "2").await.unwrap());

        let stored = f.matches.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.record.outcome(), Outcome::Away);
    }

    #[tokio::test]
    async fn deleted_team_leaves_an_empty_side() {
        let f = fixture().await;
        let created = f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();
        assert!(f.teams.delete(f.beta).await.unwrap());

        let stored = f.matches.get_by_id(created.record.id()).await.unwrap().unwrap();

        assert!(stored.home.is_some());
        assert!(stored.away.is_none());
        assert_eq!(f.matches.list_by_round(round(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_and_missing_lookup() {
        let f = fixture().await;
        let created = f.matches.create(f.alpha, f.beta, "1", 1).await.unwrap();

        assert!(f.matches.delete(created.record.id()).await.unwrap());
        assert!(f.matches.get_by_id(created.record.id()).await.unwrap().is_none());
        assert!(f.matches.list_all().await.unwrap().is_empty());
    }
}
