use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::matches::{Match, NewMatch, Outcome, Round};
use crate::domain::repositories::MatchRepository;
use crate::domain::{MatchId, TeamId};

#[derive(Debug, Default)]
struct MatchTable {
    last_id: MatchId,
    // keyed by id, so iteration is insertion order
    rows: BTreeMap<MatchId, Match>,
}

impl MatchTable {
    fn select(&self, predicate: impl Fn(&Match) -> bool) -> Vec<Match> {
        self.rows.values().filter(|m| predicate(m)).cloned().collect()
    }
}

/// Most recent first: round descending, then id descending
fn newest_first(matches: &mut [Match]) {
    matches.sort_by_key(|m| Reverse((m.round(), m.id())));
}

/// In-memory implementation of MatchRepository
///
/// The fixture check and the insert share one write guard, mirroring the
/// unique index of the database adapter.
#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    table: RwLock<MatchTable>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn insert(&self, new_match: &NewMatch) -> DomainResult<Match> {
        let mut table = self.table.write().await;
        let duplicate = table.rows.values().any(|m| {
            m.is_fixture(new_match.home_team_id(), new_match.away_team_id(), new_match.round())
        });
        if duplicate {
            return Err(new_match.duplicate_error());
        }

        table.last_id += 1;
        let stored = Match::from_draft(table.last_id, new_match, Utc::now());
        table.rows.insert(stored.id(), stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: MatchId) -> DomainResult<Option<Match>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Match>> {
        let mut matches = self.table.read().await.select(|_| true);
        newest_first(&mut matches);
        Ok(matches)
    }

    async fn find_by_round(&self, round: Round) -> DomainResult<Vec<Match>> {
        Ok(self.table.read().await.select(|m| m.round() == round))
    }

    async fn find_by_team(&self, team_id: TeamId) -> DomainResult<Vec<Match>> {
        let mut matches = self.table.read().await.select(|m| m.involves(team_id));
        newest_first(&mut matches);
        Ok(matches)
    }

    async fn find_by_team_and_round(&self, team_id: TeamId, round: Round) -> DomainResult<Vec<Match>> {
        Ok(self
            .table
            .read()
            .await
            .select(|m| m.involves(team_id) && m.round() == round))
    }

    async fn rounds(&self) -> DomainResult<Vec<Round>> {
        let table = self.table.read().await;
        let rounds: BTreeSet<Round> = table.rows.values().map(Match::round).collect();
        Ok(rounds.into_iter().collect())
    }

    async fn max_round(&self) -> DomainResult<i32> {
        let table = self.table.read().await;
        Ok(table.rows.values().map(|m| m.round().get()).max().unwrap_or(0))
    }

    async fn fixture_exists(&self, home_team_id: TeamId, away_team_id: TeamId, round: Round) -> DomainResult<bool> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .any(|m| m.is_fixture(home_team_id, away_team_id, round)))
    }

    async fn teams_have_met(&self, team_a: TeamId, team_b: TeamId) -> DomainResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.values().any(|m| m.is_between(team_a, team_b)))
    }

    async fn update_outcome(&self, id: MatchId, outcome: Outcome) -> DomainResult<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(m) => {
                m.set_outcome(outcome);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: MatchId) -> DomainResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> DomainResult<i64> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}
