use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::model::{CurrentConditions, Place, PlaceQuery};

pub mod openmeteo;

/// Failure talking to an upstream source. Each call is a single best-effort
/// attempt; there is no retry or backoff layer on top.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {endpoint} failed")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode {endpoint} response")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A geocoding plus current-conditions backend.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Look up place candidates for a free-text query. An empty vec means
    /// the query matched nothing; that is not an error.
    async fn search_places(&self, query: &PlaceQuery) -> Result<Vec<Place>, SourceError>;

    /// Fetch the current conditions at a place's coordinates.
    async fn current_conditions(&self, place: &Place) -> Result<CurrentConditions, SourceError>;
}
