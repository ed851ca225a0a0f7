use super::value_objects::{TeamName, Venue};
use crate::domain::errors::DomainResult;
use crate::domain::TeamId;
use chrono::{DateTime, Utc};

/// A validated team that has not been stored yet
///
/// The store assigns the id and creation timestamp when it persists
/// the draft and hands back a [`Team`].
///
/// # Example
/// ```
/// use jornada_api::domain::team::NewTeam;
///
/// let draft = NewTeam::new("Alpha FC", "Stadium A").expect("valid team");
/// assert_eq!(draft.name().as_str(), "Alpha FC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    name: TeamName,
    venue: Venue,
}

impl NewTeam {
    /// Validates name and venue lengths
    ///
    /// # Returns
    /// * `Ok(NewTeam)` - Draft ready for insertion
    /// * `Err(DomainError::InvalidInput)` - If either field is out of range
    pub fn new(name: impl AsRef<str>, venue: impl AsRef<str>) -> DomainResult<Self> {
        Ok(Self {
            name: TeamName::new(name)?,
            venue: Venue::new(venue)?,
        })
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }
}

/// Team entity
///
/// Represents a football club registered in the competition.
///
/// # Invariants
/// - Name is unique across all teams (enforced by the store)
/// - Name and venue respect their value-object bounds
/// - `created_at` never changes after insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    name: TeamName,
    venue: Venue,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Replaces name and venue, re-validating both
    ///
    /// Uniqueness of the new name is checked by the store on update.
    pub fn update_details(&mut self, name: impl AsRef<str>, venue: impl AsRef<str>) -> DomainResult<()> {
        let name = TeamName::new(name)?;
        let venue = Venue::new(venue)?;
        self.name = name;
        self.venue = venue;
        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn venue(&self) -> &str {
        self.venue.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: TeamId, name: TeamName, venue: Venue, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            venue,
            created_at,
        }
    }

    /// Copy of this team carrying the given creation timestamp
    pub(crate) fn with_created_at(&self, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            ..self.clone()
        }
    }

    /// Builds the stored form of a draft
    pub(crate) fn from_draft(id: TeamId, draft: &NewTeam, created_at: DateTime<Utc>) -> Self {
        Self::from_persistence(id, draft.name.clone(), draft.venue.clone(), created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_draft_with_valid_fields() {
        let draft = NewTeam::new("Beta FC", "Stadium B").unwrap();

        assert_eq!(draft.name().as_str(), "Beta FC");
        assert_eq!(draft.venue().as_str(), "Stadium B");
    }

    #[test]
    fn create_draft_with_short_name_fails() {
        let result = NewTeam::new("B", "Stadium B");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Team name"));
    }

    #[test]
    fn create_draft_with_short_venue_fails() {
        let result = NewTeam::new("Beta FC", "SB");

        assert_eq!(result.unwrap_err().kind(), "INVALID_INPUT");
    }

    #[test]
    fn stored_team_keeps_draft_fields() {
        let draft = NewTeam::new("Gamma CF", "Estadio Gamma").unwrap();
        let now = Utc::now();
        let team = Team::from_draft(7, &draft, now);

        assert_eq!(team.id(), 7);
        assert_eq!(team.name(), "Gamma CF");
        assert_eq!(team.venue(), "Estadio Gamma");
        assert_eq!(team.created_at(), now);
    }

    #[test]
    fn update_details_revalidates() {
        let draft = NewTeam::new("Gamma CF", "Estadio Gamma").unwrap();
        let mut team = Team::from_draft(1, &draft, Utc::now());

        assert!(team.update_details("Gx", "Estadio Gamma").is_err());
        assert_eq!(team.name(), "Gamma CF");

        team.update_details("Gamma Club", "Nuevo Gamma").unwrap();
        assert_eq!(team.name(), "Gamma Club");
        assert_eq!(team.venue(), "Nuevo Gamma");
    }
}
