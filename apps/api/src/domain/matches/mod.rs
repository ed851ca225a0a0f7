// Match domain module
// Contains the match entity, its resolved view, and value objects

pub mod match_record;
pub mod value_objects;

pub use match_record::{Match, MatchDetails, NewMatch};
pub use value_objects::{Outcome, Round};
