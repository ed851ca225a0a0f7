use thiserror::Error;

use super::matches::Round;
use super::{MatchId, TeamId};

/// Errors raised by the match registry
///
/// Each variant is a named condition a caller can render a message for.
/// Invariant violations are reported before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A team named '{0}' already exists")]
    DuplicateName(String),

    #[error("A team cannot play against itself")]
    SelfMatch,

    #[error("Invalid outcome '{0}' (must be 1, X or 2)")]
    InvalidOutcome(String),

    #[error("Team {home_team_id} already hosts team {away_team_id} in round {round}")]
    DuplicateFixture {
        home_team_id: TeamId,
        away_team_id: TeamId,
        round: Round,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Stable identifier for the error condition
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::SelfMatch => "SELF_MATCH",
            Self::InvalidOutcome(_) => "INVALID_OUTCOME",
            Self::DuplicateFixture { .. } => "DUPLICATE_FIXTURE",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn team_not_found(id: TeamId) -> Self {
        Self::NotFound { entity: "Team", id }
    }

    pub fn match_not_found(id: MatchId) -> Self {
        Self::NotFound { entity: "Match", id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
