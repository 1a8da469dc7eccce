use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::model::{CurrentConditions, Place, PlaceQuery};

use super::{SourceError, WeatherSource};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Current-weather variables requested from the forecast endpoint.
const CURRENT_VARS: &str = "temperature_2m,relative_humidity_2m,precipitation,rain,wind_speed_10m";

/// Open-Meteo backend. Free, no API key; geocoding and forecast live on
/// separate hosts.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoSource {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
        }
    }

    /// Point the client at alternative endpoints. Used by tests to talk to a
    /// local mock server.
    pub fn with_base_urls(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    async fn get_json<T>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(endpoint, url, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| SourceError::Http { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| SourceError::Http { endpoint, source })?;

        if !status.is_success() {
            return Err(SourceError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| SourceError::Decode { endpoint, source })
    }
}

impl Default for OpenMeteoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    /// Absent entirely when nothing matched.
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    /// Unix timestamp; the request asks for `timeformat=unixtime`.
    time: i64,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    rain: f64,
    wind_speed_10m: f64,
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn search_places(&self, query: &PlaceQuery) -> Result<Vec<Place>, SourceError> {
        let params = [
            ("name", query.name.clone()),
            ("count", query.limit.to_string()),
            ("language", query.language.clone()),
            ("format", "json".to_string()),
        ];

        let parsed: GeoResponse = self
            .get_json("open-meteo geocoding", &self.geocoding_url, &params)
            .await?;

        let places: Vec<Place> = parsed
            .results
            .into_iter()
            .map(|r| Place {
                name: r.name,
                admin1: r.admin1,
                country: r.country,
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .collect();

        tracing::debug!(query = %query.name, hits = places.len(), "geocoding done");
        Ok(places)
    }

    async fn current_conditions(&self, place: &Place) -> Result<CurrentConditions, SourceError> {
        let params = [
            ("latitude", place.latitude.to_string()),
            ("longitude", place.longitude.to_string()),
            ("current", CURRENT_VARS.to_string()),
            ("timeformat", "unixtime".to_string()),
        ];

        let parsed: ForecastResponse = self
            .get_json("open-meteo forecast", &self.forecast_url, &params)
            .await?;

        let current = parsed.current;
        let observed_at = DateTime::from_timestamp(current.time, 0).unwrap_or_else(Utc::now);

        Ok(CurrentConditions {
            temperature_c: current.temperature_2m,
            wind_speed_kmh: current.wind_speed_10m,
            humidity_pct: current.relative_humidity_2m,
            rain_mm: current.rain,
            observed_at,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocoding_results_field_may_be_absent() {
        let parsed: GeoResponse = serde_json::from_str(r#"{"generationtime_ms":0.6}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn geocoding_result_decodes_optional_region() {
        let json = r#"{
            "results": [
                {"name": "London", "admin1": "England", "country": "United Kingdom",
                 "latitude": 51.5, "longitude": -0.12},
                {"name": "Null Island", "latitude": 0.0, "longitude": 0.0}
            ]
        }"#;

        let parsed: GeoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].admin1.as_deref(), Some("England"));
        assert!(parsed.results[1].country.is_none());
    }

    #[test]
    fn current_block_decodes_integer_humidity() {
        // Open-Meteo reports relative humidity as an integer percent.
        let json = r#"{
            "current": {
                "time": 1754560800,
                "temperature_2m": 12.3,
                "relative_humidity_2m": 82,
                "precipitation": 0.4,
                "rain": 0.4,
                "wind_speed_10m": 24.5
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.current.relative_humidity_2m, 82.0);
        assert_eq!(parsed.current.rain, 0.4);
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let long = "x".repeat(500);
        let shown = truncate_body(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.len(), 203);

        assert_eq!(truncate_body("short"), "short");
    }
}
