//! The weather-to-advice classifier.
//!
//! [`analyze`] is a pure, total function from one weather reading to an
//! outfit recommendation and a cold-risk assessment. It performs no I/O,
//! keeps no state, and never rejects an input, so it can be called from any
//! number of tasks at once.

use serde::{Deserialize, Serialize};

use crate::model::WeatherSample;

/// Wind above this speed, in km/h, counts as "very windy".
const WINDY_KMH: f64 = 20.0;

/// Overall cold-risk bucket derived from the internal risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI theming tag. Follows the temperature band, not the risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTag {
    Hot,
    MildWarm,
    MildCool,
    Cold,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Hot => "hot",
            ColorTag::MildWarm => "mild-warm",
            ColorTag::MildCool => "mild-cool",
            ColorTag::Cold => "cold",
        }
    }
}

impl std::fmt::Display for ColorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advice derived from a single weather reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAdvice {
    /// Clothing recommendation, base clause plus any modifiers.
    pub outfit: String,
    pub risk_level: RiskLevel,
    pub risk_description: String,
    pub wind_message: String,
    pub temp_message: String,
    pub color: ColorTag,
}

/// Mutually exclusive temperature bands; lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutfitBand {
    Hot,
    Pleasant,
    Chilly,
    Freezing,
}

impl OutfitBand {
    fn for_temperature(temp_c: f64) -> Self {
        if temp_c >= 25.0 {
            OutfitBand::Hot
        } else if temp_c >= 18.0 {
            OutfitBand::Pleasant
        } else if temp_c >= 10.0 {
            OutfitBand::Chilly
        } else {
            OutfitBand::Freezing
        }
    }

    fn base_outfit(self) -> &'static str {
        match self {
            OutfitBand::Hot => "T-shirt and shorts. Don't forget sunglasses.",
            OutfitBand::Pleasant => "T-shirt and jeans, maybe a light hoodie.",
            OutfitBand::Chilly => "Light jacket or a sweater.",
            OutfitBand::Freezing => "Heavy coat, scarf, and gloves.",
        }
    }

    fn temp_message(self) -> &'static str {
        match self {
            OutfitBand::Hot => "It's hot outside.",
            OutfitBand::Pleasant => "It's pleasant.",
            OutfitBand::Chilly => "It's getting chilly.",
            OutfitBand::Freezing => "It's freezing.",
        }
    }

    fn color(self) -> ColorTag {
        match self {
            OutfitBand::Hot => ColorTag::Hot,
            OutfitBand::Pleasant => ColorTag::MildWarm,
            OutfitBand::Chilly => ColorTag::MildCool,
            OutfitBand::Freezing => ColorTag::Cold,
        }
    }
}

/// Turn one weather reading into outfit and health advice.
///
/// Total over the whole input domain: implausible readings are classified
/// like any other, never rejected. Equal samples always produce equal
/// advice.
pub fn analyze(sample: &WeatherSample) -> HealthAdvice {
    let band = OutfitBand::for_temperature(sample.temperature_c);
    let windy = sample.wind_speed_kmh > WINDY_KMH;

    let mut outfit = String::from(band.base_outfit());
    if sample.is_raining {
        outfit.push_str(" Take an umbrella!");
    }
    // The windbreaker shares the wind-message threshold but is additionally
    // gated on temperature; the wind message alone is not.
    if windy && sample.temperature_c < 15.0 {
        outfit.push_str(" Wear a windbreaker.");
    }

    let wind_message = if windy {
        "It's very windy. Wind chill is a factor."
    } else {
        "Calm breeze."
    };

    let (risk_level, risk_description) = classify_risk(risk_score(sample));

    HealthAdvice {
        outfit,
        risk_level,
        risk_description: risk_description.to_string(),
        wind_message: wind_message.to_string(),
        temp_message: band.temp_message().to_string(),
        color: band.color(),
    }
}

/// Additive adversity score; every rule that holds contributes.
fn risk_score(sample: &WeatherSample) -> u32 {
    let &WeatherSample {
        temperature_c,
        wind_speed_kmh,
        humidity_pct,
        is_raining,
    } = sample;

    let mut score = 0;
    if temperature_c < 10.0 {
        score += 30;
    }
    if temperature_c < 5.0 {
        score += 20;
    }
    if humidity_pct > 70.0 && temperature_c < 15.0 {
        // damp cold
        score += 20;
    }
    if wind_speed_kmh > 15.0 && temperature_c < 15.0 {
        // wind chill
        score += 20;
    }
    if is_raining && temperature_c < 15.0 {
        score += 20;
    }
    score
}

fn classify_risk(score: u32) -> (RiskLevel, &'static str) {
    if score > 60 {
        (
            RiskLevel::High,
            "High risk of catching a cold. Keep your throat warm.",
        )
    } else if score > 30 {
        (
            RiskLevel::Moderate,
            "Moderate risk. Don't stay out in the cold too long.",
        )
    } else {
        (RiskLevel::Low, "Low risk. Enjoy the fresh air.")
    }
}
