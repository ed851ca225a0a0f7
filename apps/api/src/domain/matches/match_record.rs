use super::value_objects::{Outcome, Round};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::team::Team;
use crate::domain::{MatchId, TeamId};
use chrono::{DateTime, Utc};

/// A validated match that has not been stored yet
///
/// # Validation Order
/// 1. Home and away must differ (`SelfMatch`)
/// 2. Outcome code must be `1`, `X` or `2` (`InvalidOutcome`)
/// 3. Ids must be positive and round at least 1 (`InvalidInput`)
///
/// The order decides which error a caller sees when several rules are
/// broken at once. Fixture uniqueness is checked by the store afterwards.
///
/// # Example
/// ```
/// use jornada_api::domain::matches::{NewMatch, Outcome};
///
/// let draft = NewMatch::new(1, 2, "1", 1).expect("valid match");
/// assert_eq!(draft.outcome(), Outcome::Home);
///
/// let err = NewMatch::new(3, 3, "bogus", 0).unwrap_err();
/// assert_eq!(err.kind(), "SELF_MATCH");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMatch {
    home_team_id: TeamId,
    away_team_id: TeamId,
    outcome: Outcome,
    round: Round,
}

impl NewMatch {
    pub fn new(
        home_team_id: TeamId,
        away_team_id: TeamId,
        outcome_code: &str,
        round: i32,
    ) -> DomainResult<Self> {
        if home_team_id == away_team_id {
            return Err(DomainError::SelfMatch);
        }

        let outcome = Outcome::from_code(outcome_code)?;

        if home_team_id <= 0 || away_team_id <= 0 {
            return Err(DomainError::InvalidInput(
                "Team ids must be positive".to_string(),
            ));
        }
        let round = Round::new(round)?;

        Ok(Self {
            home_team_id,
            away_team_id,
            outcome,
            round,
        })
    }

    pub fn home_team_id(&self) -> TeamId {
        self.home_team_id
    }

    pub fn away_team_id(&self) -> TeamId {
        self.away_team_id
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn round(&self) -> Round {
        self.round
    }

    /// The error reported when this exact fixture already exists
    pub fn duplicate_error(&self) -> DomainError {
        DomainError::DuplicateFixture {
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            round: self.round,
        }
    }
}

/// Match entity
///
/// Stores team ids only; team records are resolved separately into
/// [`MatchDetails`].
///
/// # Invariants
/// - `home_team_id != away_team_id`
/// - `(home_team_id, away_team_id, round)` is unique across matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: MatchId,
    home_team_id: TeamId,
    away_team_id: TeamId,
    outcome: Outcome,
    round: Round,
    created_at: DateTime<Utc>,
}

impl Match {
    /// True if the team played this match on either side
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// True if this match is the exact ordered fixture
    pub fn is_fixture(&self, home_team_id: TeamId, away_team_id: TeamId, round: Round) -> bool {
        self.home_team_id == home_team_id && self.away_team_id == away_team_id && self.round == round
    }

    /// True if the two teams met here, whichever side each played
    pub fn is_between(&self, team_a: TeamId, team_b: TeamId) -> bool {
        (self.home_team_id == team_a && self.away_team_id == team_b)
            || (self.home_team_id == team_b && self.away_team_id == team_a)
    }

    /// Corrects the recorded outcome
    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    // ===== Getters =====

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn home_team_id(&self) -> TeamId {
        self.home_team_id
    }

    pub fn away_team_id(&self) -> TeamId {
        self.away_team_id
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Match from persistence layer data
    ///
    /// Bypasses validation since stored rows already passed it.
    /// Only to be used by repository implementations.
    pub fn from_persistence(
        id: MatchId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        outcome: Outcome,
        round: Round,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            outcome,
            round,
            created_at,
        }
    }

    pub(crate) fn from_draft(id: MatchId, draft: &NewMatch, created_at: DateTime<Utc>) -> Self {
        Self::from_persistence(
            id,
            draft.home_team_id,
            draft.away_team_id,
            draft.outcome,
            draft.round,
            created_at,
        )
    }
}

/// A match with both team references resolved
///
/// A side is `None` when its team no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDetails {
    pub record: Match,
    pub home: Option<Team>,
    pub away: Option<Team>,
}
