use std::sync::Arc;

use super::log_rejection;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{NewTeam, Team};
use crate::domain::TeamId;

/// Owns team records and their name uniqueness
#[derive(Clone)]
pub struct TeamStore {
    repo: Arc<dyn TeamRepository>,
}

impl TeamStore {
    pub fn new(repo: Arc<dyn TeamRepository>) -> Self {
        Self { repo }
    }

    /// Registers a new team
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidInput)` - Name or venue out of range
    /// * `Err(DomainError::DuplicateName)` - Another team has this exact name
    pub async fn create(&self, name: &str, venue: &str) -> DomainResult<Team> {
        let result = match NewTeam::new(name, venue) {
            Ok(draft) => self.repo.insert(&draft).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(team) => tracing::info!(team_id = team.id(), name = team.name(), "Team created"),
            Err(e) => log_rejection("Team creation", e),
        }
        result
    }

    pub async fn get_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        tracing::debug!(team_id = id, "Fetching team");
        self.repo.find_by_id(id).await
    }

    /// Like [`TeamStore::get_by_id`] but absence is an error
    pub async fn require(&self, id: TeamId) -> DomainResult<Team> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::team_not_found(id))
    }

    /// Exact, case-sensitive lookup; surrounding whitespace is ignored
    /// the same way [`TeamStore::create`] ignores it
    pub async fn get_by_name(&self, name: &str) -> DomainResult<Option<Team>> {
        self.repo.find_by_name(name.trim()).await
    }

    /// All teams sorted by name
    pub async fn list_all(&self) -> DomainResult<Vec<Team>> {
        self.repo.find_all().await
    }

    /// Overwrites name and venue of an existing team
    ///
    /// Returns false if no team has this id.
    pub async fn update(&self, team: &Team) -> DomainResult<bool> {
        let result = self.repo.update(team).await;
        match &result {
            Ok(updated) => tracing::info!(team_id = team.id(), updated, "Team update"),
            Err(e) => log_rejection("Team update", e),
        }
        result
    }

    /// Deletes a team; matches referencing it keep their ids
    pub async fn delete(&self, id: TeamId) -> DomainResult<bool> {
        let deleted = self.repo.delete(id).await?;
        tracing::info!(team_id = id, deleted, "Team delete");
        Ok(deleted)
    }

    pub async fn count(&self) -> DomainResult<i64> {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryTeamRepository;

    fn store() -> TeamStore {
        TeamStore::new(Arc::new(InMemoryTeamRepository::new()))
    }

    #[tokio::test]
    async fn create_grows_list_by_one() {
        let store = store();
        store.create("Alpha FC", "Stadium A").await.unwrap();
        let before = store.list_all().await.unwrap().len();

        let team = store.create("Beta FC", "Stadium B").await.unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), before + 1);
        assert_eq!(store.get_by_id(team.id()).await.unwrap(), Some(team.clone()));
        assert_eq!(store.get_by_name("Beta FC").await.unwrap(), Some(team));
    }

    #[tokio::test]
    async fn lookup_by_name_ignores_surrounding_whitespace() {
        let store = store();
        let team = store.create(" Alpha FC ", "Stadium A").await.unwrap();

        assert_eq!(store.get_by_name("  Alpha FC").await.unwrap(), Some(team));
        assert_eq!(store.get_by_name("alpha fc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_name_fails_regardless_of_venue() {
        let store = store();
        store.create("Alpha FC", "Stadium A").await.unwrap();

        let err = store.create("Alpha FC", "Another Ground").await.unwrap_err();

        assert_eq!(err.kind(), "DUPLICATE_NAME");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_detected_after_trimming() {
        let store = store();
        store.create("Alpha FC", "Stadium A").await.unwrap();

        let err = store.create("  Alpha FC ", "Stadium A").await.unwrap_err();
        assert_eq!(err.kind(), "DUPLICATE_NAME");
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_storage() {
        let store = store();

        let err = store.create("AB", "Stadium").await.unwrap_err();

        assert_eq!(err.kind(), "INVALID_INPUT");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_all_is_sorted_by_name() {
        let store = store();
        for name in ["Zaragoza", "Betis", "Alaves"] {
            store.create(name, "Municipal").await.unwrap();
        }

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["Alaves", "Betis", "Zaragoza"]);
    }

    #[tokio::test]
    async fn require_reports_not_found() {
        let err = store().require(404).await.unwrap_err();

        assert_eq!(err, DomainError::team_not_found(404));
    }

    #[tokio::test]
    async fn update_and_delete_report_existence() {
        let store = store();
        let mut team = store.create("Alpha FC", "Stadium A").await.unwrap();

        team.update_details("Alpha FC", "Stadium A2").unwrap();
        assert!(store.update(&team).await.unwrap());
        assert_eq!(store.require(team.id()).await.unwrap().venue(), "Stadium A2");

        assert!(store.delete(team.id()).await.unwrap());
        assert!(!store.delete(team.id()).await.unwrap());
        assert!(!store.update(&team).await.unwrap());
    }
}
