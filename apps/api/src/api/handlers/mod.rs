// HTTP handlers, one module per resource

pub mod health;
pub mod matches;
pub mod rounds;
pub mod teams;

use axum::http::Uri;
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::domain::matches::Round;

/// Optional `?round=N` filter
#[derive(Debug, Default, Deserialize)]
pub struct RoundQuery {
    pub round: Option<i32>,
}

impl RoundQuery {
    /// The validated round, if one was given
    pub fn round(&self) -> Result<Option<Round>, ApiError> {
        self.round
            .map(Round::new)
            .transpose()
            .map_err(ApiError::from)
    }
}

/// Fallback for paths outside the route table
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
