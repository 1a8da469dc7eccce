use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text place lookup, as typed by the user.
#[derive(Debug, Clone)]
pub struct PlaceQuery {
    pub name: String,
    /// Maximum number of candidates to return.
    pub limit: u8,
    /// Language for candidate names, e.g. "en".
    pub language: String,
}

/// One geocoding candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// First-level administrative area, e.g. "England".
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// Display label with region and country when known,
    /// e.g. "London, England, United Kingdom".
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(self.admin1.as_deref().filter(|s| !s.is_empty()));
        parts.extend(self.country.as_deref().filter(|s| !s.is_empty()));
        parts.join(", ")
    }
}

/// Current conditions at a place, as reported by the upstream source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub humidity_pct: f64,
    pub rain_mm: f64,
    pub observed_at: DateTime<Utc>,
}

impl CurrentConditions {
    /// The readings in the shape the classifier consumes. Any rain above
    /// zero counts as raining.
    pub fn sample(&self) -> WeatherSample {
        WeatherSample {
            temperature_c: self.temperature_c,
            wind_speed_kmh: self.wind_speed_kmh,
            humidity_pct: self.humidity_pct,
            is_raining: self.rain_mm > 0.0,
        }
    }
}

/// Input to the advice classifier. Plain readings, never validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub humidity_pct: f64,
    pub is_raining: bool,
}
