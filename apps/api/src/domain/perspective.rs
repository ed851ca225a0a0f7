//! Restates a match from one participant's point of view.
//!
//! Every function here is pure: no I/O and no mutation. Matches are always
//! played at the home team's venue, whichever side is being viewed.

use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};
use super::matches::{Match, MatchDetails, Outcome, Round};
use super::team::Team;
use super::{MatchId, TeamId};

/// Which side of the fixture a team played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// A match result seen from one team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamResult {
    Won,
    Drew,
    Lost,
}

impl std::fmt::Display for TeamResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamResult::Won => write!(f, "won"),
            TeamResult::Drew => write!(f, "drew"),
            TeamResult::Lost => write!(f, "lost"),
        }
    }
}

/// One match as seen by one of its participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamPerspective {
    pub match_id: MatchId,
    pub round: Round,
    pub side: Side,
    pub result: TeamResult,
    pub outcome: Outcome,
    /// `None` if the opposing team no longer exists
    pub opponent: Option<Team>,
    /// `None` if the home team no longer exists
    pub venue: Option<String>,
}

/// Home iff the viewing team is the home team
pub fn side(record: &Match, viewing_team_id: TeamId) -> Side {
    if record.home_team_id() == viewing_team_id {
        Side::Home
    } else {
        Side::Away
    }
}

/// # Example
/// ```
/// use jornada_api::domain::matches::{Match, Outcome, Round};
/// use jornada_api::domain::perspective::{result_for, TeamResult};
///
/// let m = Match::from_persistence(1, 10, 20, Outcome::Home, Round::new(1).unwrap(), chrono::Utc::now());
/// assert_eq!(result_for(&m, 10), TeamResult::Won);
/// assert_eq!(result_for(&m, 20), TeamResult::Lost);
/// ```
pub fn result_for(record: &Match, viewing_team_id: TeamId) -> TeamResult {
    let winning = match side(record, viewing_team_id) {
        Side::Home => Outcome::Home,
        Side::Away => Outcome::Away,
    };

    match record.outcome() {
        Outcome::Draw => TeamResult::Drew,
        outcome if outcome == winning => TeamResult::Won,
        _ => TeamResult::Lost,
    }
}

/// The other participant's resolved team record
pub fn opponent(details: &MatchDetails, viewing_team_id: TeamId) -> Option<&Team> {
    match side(&details.record, viewing_team_id) {
        Side::Home => details.away.as_ref(),
        Side::Away => details.home.as_ref(),
    }
}

/// The home team's venue
pub fn venue(details: &MatchDetails) -> Option<&str> {
    details.home.as_ref().map(Team::venue)
}

/// Builds the full perspective of `viewing_team_id` on a match
///
/// # Returns
/// * `Err(DomainError::InvalidInput)` - If the team did not play this match
pub fn perspective(details: &MatchDetails, viewing_team_id: TeamId) -> DomainResult<TeamPerspective> {
    let record = &details.record;
    if !record.involves(viewing_team_id) {
        return Err(DomainError::InvalidInput(format!(
            "Team {} did not play match {}",
            viewing_team_id,
            record.id()
        )));
    }

    Ok(TeamPerspective {
        match_id: record.id(),
        round: record.round(),
        side: side(record, viewing_team_id),
        result: result_for(record, viewing_team_id),
        outcome: record.outcome(),
        opponent: opponent(details, viewing_team_id).cloned(),
        venue: venue(details).map(str::to_string),
    })
}
