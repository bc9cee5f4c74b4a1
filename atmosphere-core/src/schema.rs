//! Typed decoding of the model's structured output into domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::{RetrievalError, Stage},
    model::{FORECAST_DAYS, ForecastDay, Recommendation, WeatherSnapshot},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPayload {
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub temperature: f64,
    pub condition: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub visibility: f64,
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub uv_index: f64,
    #[serde(default)]
    pub sunrise: String,
    #[serde(default)]
    pub sunset: String,
    pub forecast: Vec<ForecastPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPayload {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub chance_of_rain: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPayload {
    pub summary: String,
    pub clothing: Vec<String>,
    pub activities: String,
    pub health_tip: String,
}

impl WeatherPayload {
    /// Validate and convert. Missing feels-like falls back to the air temperature.
    pub fn into_snapshot(self, captured_at: DateTime<Utc>) -> Result<WeatherSnapshot, RetrievalError> {
        let city = self.city.trim().to_owned();
        if city.is_empty() {
            return Err(RetrievalError::Invalid("city is empty".into()));
        }
        if !self.temperature.is_finite() {
            return Err(RetrievalError::Invalid("temperature is not a number".into()));
        }
        if self.forecast.is_empty() {
            return Err(RetrievalError::Invalid("forecast is empty".into()));
        }

        let forecast = self
            .forecast
            .into_iter()
            .take(FORECAST_DAYS)
            .map(|d| ForecastDay {
                day: d.day,
                high_c: d.high,
                low_c: d.low,
                condition: d.condition,
                chance_of_rain_pct: d.chance_of_rain,
            })
            .collect();

        Ok(WeatherSnapshot {
            city,
            country: self.country,
            temperature_c: self.temperature,
            condition: self.condition,
            description: self.description,
            humidity_pct: self.humidity,
            wind_speed_kmh: self.wind_speed,
            pressure_hpa: self.pressure,
            visibility_km: self.visibility,
            feels_like_c: self.feels_like.unwrap_or(self.temperature),
            uv_index: self.uv_index,
            sunrise: self.sunrise,
            sunset: self.sunset,
            forecast,
            captured_at,
        })
    }
}

impl From<RecommendationPayload> for Recommendation {
    fn from(p: RecommendationPayload) -> Self {
        Self {
            summary: p.summary,
            clothing: p.clothing,
            activities: p.activities,
            health_tip: p.health_tip,
        }
    }
}

pub fn decode_weather(text: &str, captured_at: DateTime<Utc>) -> Result<WeatherSnapshot, RetrievalError> {
    let payload: WeatherPayload = serde_json::from_str(strip_json_fences(text))
        .map_err(|source| RetrievalError::Decode { stage: Stage::Weather, source })?;
    payload.into_snapshot(captured_at)
}

pub fn decode_recommendation(text: &str) -> Result<Recommendation, RetrievalError> {
    let payload: RecommendationPayload = serde_json::from_str(strip_json_fences(text))
        .map_err(|source| RetrievalError::Decode { stage: Stage::Recommendation, source })?;
    Ok(payload.into())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
        }
        None => text,
    }
}
