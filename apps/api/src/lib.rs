//! Jornada API Library
//!
//! Registry of football teams and the matches they play in each round
//! (jornada), with results recorded as pool codes `1`, `X` and `2`.
//! Provides the domain model, the team-perspective engine, repositories
//! for PostgreSQL and memory, and the HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
