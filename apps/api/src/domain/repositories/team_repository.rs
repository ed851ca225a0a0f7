use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::team::{NewTeam, Team};
use crate::domain::TeamId;

/// Repository trait for teams
///
/// Implementations must enforce name uniqueness atomically with the write:
/// a losing concurrent writer gets `DuplicateName`, never a second row.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a team, assigning its id and creation timestamp
    async fn insert(&self, team: &NewTeam) -> DomainResult<Team>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>>;

    /// Find a team by exact, case-sensitive name
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>>;

    /// All teams, sorted by name ascending
    async fn find_all(&self) -> DomainResult<Vec<Team>>;

    /// Overwrite name and venue; false if no team has this id
    async fn update(&self, team: &Team) -> DomainResult<bool>;

    /// Delete a team by ID; false if it did not exist
    async fn delete(&self, id: TeamId) -> DomainResult<bool>;

    async fn count(&self) -> DomainResult<i64>;
}
