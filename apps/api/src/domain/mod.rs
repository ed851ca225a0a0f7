// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod matches;
pub mod perspective;
pub mod repositories;
pub mod team;

pub use errors::{DomainError, DomainResult};

/// Store-assigned team identifier
pub type TeamId = i64;

/// Store-assigned match identifier
pub type MatchId = i64;
