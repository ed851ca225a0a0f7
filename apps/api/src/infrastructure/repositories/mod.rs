// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory_match_repository;
pub mod memory_team_repository;
pub mod postgres_match_repository;
pub mod postgres_team_repository;

pub use memory_match_repository::InMemoryMatchRepository;
pub use memory_team_repository::InMemoryTeamRepository;
pub use postgres_match_repository::PostgresMatchRepository;
pub use postgres_team_repository::PostgresTeamRepository;

use crate::domain::errors::DomainError;

/// True if `err` is a unique violation of the named constraint
fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

fn storage_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::Storage(format!("{}: {}", context, err))
}
