//! Human-friendly and JSON rendering of advice reports.

use anyhow::Result;
use serde_json::json;
use wearcast_core::{CurrentConditions, HealthAdvice, Place};

/// Multi-line advice card for one place.
pub fn advice_card(place: &Place, conditions: &CurrentConditions, advice: &HealthAdvice) -> String {
    let readings = format!(
        "{:.1} °C, wind {:.1} km/h, humidity {:.0}%, observed {}",
        conditions.temperature_c,
        conditions.wind_speed_kmh,
        conditions.humidity_pct,
        conditions.observed_at.format("%H:%M UTC"),
    );

    format!(
        "{header}\n{readings}\n\nOutfit: {outfit}\n{temp} {wind}\n\nHealth risk ({level}): {risk}\nTheme: {color}",
        header = place.label(),
        outfit = advice.outfit,
        temp = advice.temp_message,
        wind = advice.wind_message,
        level = advice.risk_level,
        risk = advice.risk_description,
        color = advice.color,
    )
}

/// One-line summary for the featured list.
pub fn featured_line(
    place: &Place,
    conditions: &CurrentConditions,
    advice: &HealthAdvice,
) -> String {
    format!(
        "{}: {:.1} °C, {} risk: {}",
        place.label(),
        conditions.temperature_c,
        advice.risk_level,
        advice.outfit
    )
}

/// Featured-list line for a city whose lookup failed.
pub fn failure_line(city: &str, err: &anyhow::Error) -> String {
    format!("{city}: lookup failed ({err:#})")
}

/// The full report as pretty-printed JSON.
pub fn report_json(
    place: &Place,
    conditions: &CurrentConditions,
    advice: &HealthAdvice,
) -> Result<String> {
    let report = json!({
        "place": place,
        "conditions": conditions,
        "advice": advice,
    });

    Ok(serde_json::to_string_pretty(&report)?)
}
