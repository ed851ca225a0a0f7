use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{NewTeam, Team};
use crate::domain::TeamId;

#[derive(Debug, Default)]
struct TeamTable {
    last_id: TeamId,
    rows: BTreeMap<TeamId, Team>,
}

impl TeamTable {
    fn name_taken(&self, name: &str, except: Option<TeamId>) -> bool {
        self.rows
            .values()
            .any(|t| t.name() == name && Some(t.id()) != except)
    }
}

/// In-memory implementation of TeamRepository
///
/// The name check and the insert run under one write guard, so the
/// uniqueness guarantee matches the database adapter's. Ids start at 1
/// and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    table: RwLock<TeamTable>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn insert(&self, team: &NewTeam) -> DomainResult<Team> {
        let mut table = self.table.write().await;
        if table.name_taken(team.name().as_str(), None) {
            return Err(DomainError::DuplicateName(team.name().to_string()));
        }

        table.last_id += 1;
        let stored = Team::from_draft(table.last_id, team, Utc::now());
        table.rows.insert(stored.id(), stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|t| t.name() == name).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Team>> {
        let mut teams: Vec<Team> = self.table.read().await.rows.values().cloned().collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    async fn update(&self, team: &Team) -> DomainResult<bool> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&team.id()) {
            return Ok(false);
        }
        if table.name_taken(team.name(), Some(team.id())) {
            return Err(DomainError::DuplicateName(team.name().to_string()));
        }

        if let Some(row) = table.rows.get_mut(&team.id()) {
            // created_at is immutable
            *row = team.with_created_at(row.created_at());
        }
        Ok(true)
    }

    async fn delete(&self, id: TeamId) -> DomainResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> DomainResult<i64> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewTeam {
        NewTeam::new(name, "Some Stadium").unwrap()
    }

    #[tokio::test]
    async fn duplicate_name_rejected_under_same_lock() {
        let repo = InMemoryTeamRepository::new();
        repo.insert(&draft("Alpha FC")).await.unwrap();

        let err = repo.insert(&draft("Alpha FC")).await.unwrap_err();
        assert_eq!(err, DomainError::DuplicateName("Alpha FC".to_string()));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn names_are_case_sensitive() {
        let repo = InMemoryTeamRepository::new();
        repo.insert(&draft("Alpha FC")).await.unwrap();

        assert!(repo.insert(&draft("alpha fc")).await.is_ok());
        assert!(repo.find_by_name("ALPHA FC").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let repo = InMemoryTeamRepository::new();
        let stored = repo.insert(&draft("Alpha FC")).await.unwrap();

        let mut changed = stored.clone();
        changed.update_details("Alpha CF", "New Ground").unwrap();
        assert!(repo.update(&changed).await.unwrap());

        let found = repo.find_by_id(stored.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "Alpha CF");
        assert_eq!(found.created_at(), stored.created_at());
    }

    #[tokio::test]
    async fn update_into_taken_name_fails() {
        let repo = InMemoryTeamRepository::new();
        repo.insert(&draft("Alpha FC")).await.unwrap();
        let beta = repo.insert(&draft("Beta FC")).await.unwrap();

        let mut changed = beta.clone();
        changed.update_details("Alpha FC", "Stadium B").unwrap();
        assert_eq!(repo.update(&changed).await.unwrap_err().kind(), "DUPLICATE_NAME");
    }

    #[tokio::test]
    async fn concurrent_inserts_of_one_name_store_one_team() {
        let repo = std::sync::Arc::new(InMemoryTeamRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(&draft("Racing Club")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_all_sorts_by_byte_order() {
        let repo = InMemoryTeamRepository::new();
        repo.insert(&draft("alpha Club")).await.unwrap();
        repo.insert(&draft("Zeta FC")).await.unwrap();
        repo.insert(&draft("Beta FC")).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["Beta FC", "Zeta FC", "alpha Club"]);
    }
}
