// Repository interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod match_repository;
pub mod team_repository;

pub use match_repository::MatchRepository;
pub use team_repository::TeamRepository;
