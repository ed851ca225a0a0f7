// Application services
// Enforce the registry invariants on top of injected repositories

pub mod match_store;
pub mod queries;
pub mod team_store;

pub use match_store::MatchStore;
pub use queries::{MatchdayQueries, TeamView};
pub use team_store::TeamStore;

use crate::domain::errors::DomainError;

/// Logs a failed write at a level matching its cause
fn log_rejection(operation: &str, err: &DomainError) {
    match err {
        DomainError::Storage(_) => tracing::error!(kind = err.kind(), "{} failed: {}", operation, err),
        _ => tracing::warn!(kind = err.kind(), "{} rejected: {}", operation, err),
    }
}
