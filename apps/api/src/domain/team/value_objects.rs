use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};

/// Shortest accepted team name, in characters
pub const TEAM_NAME_MIN: usize = 3;
/// Longest accepted team name, in characters
pub const TEAM_NAME_MAX: usize = 100;
/// Shortest accepted venue, in characters
pub const VENUE_MIN: usize = 3;
/// Longest accepted venue, in characters
pub const VENUE_MAX: usize = 150;

/// Team name value object
///
/// # Invariants
/// - Surrounding whitespace is trimmed
/// - Between 3 and 100 characters after trimming
/// - Compared case-sensitively
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamName(String);

impl TeamName {
    /// Creates a new TeamName value object
    ///
    /// # Example
    /// ```
    /// use jornada_api::domain::team::value_objects::TeamName;
    ///
    /// let name = TeamName::new("  Alpha FC ").expect("valid name");
    /// assert_eq!(name.as_str(), "Alpha FC");
    /// assert!(TeamName::new("FC").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>) -> DomainResult<Self> {
        bounded("Team name", name.as_ref(), TEAM_NAME_MIN, TEAM_NAME_MAX).map(TeamName)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamName> for String {
    fn from(name: TeamName) -> Self {
        name.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Venue (home stadium) value object
///
/// # Invariants
/// - Surrounding whitespace is trimmed
/// - Between 3 and 150 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Venue(String);

impl Venue {
    pub fn new(venue: impl AsRef<str>) -> DomainResult<Self> {
        bounded("Venue", venue.as_ref(), VENUE_MIN, VENUE_MAX).map(Venue)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Venue {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Venue> for String {
    fn from(venue: Venue) -> Self {
        venue.0
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn bounded(field: &str, raw: &str, min: usize, max: usize) -> DomainResult<String> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(DomainError::InvalidInput(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(trimmed.to_string())
}
