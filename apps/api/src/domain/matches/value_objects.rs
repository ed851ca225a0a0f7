use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::{DomainError, DomainResult};

/// Result of a match from a neutral standpoint
///
/// Stored and exchanged as the pool codes `"1"`, `"X"` and `"2"`;
/// [`Outcome::from_code`] and [`Outcome::code`] are the only conversions
/// between the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Home team won
    #[serde(rename = "1")]
    Home,
    /// Draw
    #[serde(rename = "X")]
    Draw,
    /// Away team won
    #[serde(rename = "2")]
    Away,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    /// Decodes a pool code
    ///
    /// Matching is exact: `"x"` or `" 1"` are rejected.
    ///
    /// # Example
    /// ```
    /// use jornada_api::domain::matches::Outcome;
    ///
    /// assert_eq!(Outcome::from_code("X").unwrap(), Outcome::Draw);
    /// assert!(Outcome::from_code("3").is_err());
    /// ```
    pub fn from_code(code: &str) -> DomainResult<Self> {
        match code {
            "1" => Ok(Outcome::Home),
            "X" => Ok(Outcome::Draw),
            "2" => Ok(Outcome::Away),
            other => Err(DomainError::InvalidOutcome(other.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Home => "1",
            Outcome::Draw => "X",
            Outcome::Away => "2",
        }
    }
}

impl FromStr for Outcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Round (jornada) number, always 1 or greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Round(i32);

impl Round {
    pub const FIRST: Round = Round(1);

    /// Rounds offered before any match has been recorded
    pub const DEFAULTS: [Round; 3] = [Round(1), Round(2), Round(3)];

    pub fn new(number: i32) -> DomainResult<Self> {
        if number < 1 {
            return Err(DomainError::InvalidInput(format!(
                "Round must be a number greater than 0, got {}",
                number
            )));
        }
        Ok(Round(number))
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Round {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Round> for i32 {
    fn from(round: Round) -> Self {
        round.0
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
