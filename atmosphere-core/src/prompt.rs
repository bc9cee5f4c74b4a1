//! Prompt and response-schema construction for the two model calls.

use serde_json::{Value, json};

use crate::{model::WeatherSnapshot, provider::GenerateRequest};

/// Fields the weather response must carry for the snapshot to be usable.
pub const WEATHER_REQUIRED_FIELDS: &[&str] = &["city", "temperature", "condition", "forecast"];

pub fn weather_prompt(query: &str) -> String {
    format!(
        r#"Find the CURRENT weather data for "{query}" using live web search.
Return the data as a JSON object with the following structure:
{{
  "city": "string",
  "country": "string",
  "temperature": number (Celsius),
  "condition": "string (Clear, Cloudy, Rain, Snow, Thunderstorm, Mist)",
  "description": "string (detailed condition)",
  "humidity": number (percentage),
  "windSpeed": number (km/h),
  "pressure": number (hPa),
  "visibility": number (km),
  "feelsLike": number (Celsius),
  "uvIndex": number,
  "sunrise": "string (HH:MM AM/PM)",
  "sunset": "string (HH:MM AM/PM)",
  "forecast": [
    {{ "day": "DayName", "high": number, "low": number, "condition": "string", "chanceOfRain": number }}
  ] (5 days)
}}"#
    )
}

pub fn weather_schema() -> Value {
    let forecast_day = json!({
        "type": "OBJECT",
        "properties": {
            "day": { "type": "STRING" },
            "high": { "type": "NUMBER" },
            "low": { "type": "NUMBER" },
            "condition": { "type": "STRING" },
            "chanceOfRain": { "type": "NUMBER" }
        }
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "city": { "type": "STRING" },
            "country": { "type": "STRING" },
            "temperature": { "type": "NUMBER" },
            "condition": { "type": "STRING" },
            "description": { "type": "STRING" },
            "humidity": { "type": "NUMBER" },
            "windSpeed": { "type": "NUMBER" },
            "pressure": { "type": "NUMBER" },
            "visibility": { "type": "NUMBER" },
            "feelsLike": { "type": "NUMBER" },
            "uvIndex": { "type": "NUMBER" },
            "sunrise": { "type": "STRING" },
            "sunset": { "type": "STRING" },
            "forecast": { "type": "ARRAY", "items": forecast_day }
        },
        "required": WEATHER_REQUIRED_FIELDS
    })
}

/// Grounded, schema-constrained request for current weather and forecast.
pub fn weather_request(query: &str) -> GenerateRequest {
    GenerateRequest {
        prompt: weather_prompt(query.trim()),
        grounded: true,
        schema: Some(weather_schema()),
    }
}

pub fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "clothing": { "type": "ARRAY", "items": { "type": "STRING" } },
            "activities": { "type": "STRING" },
            "healthTip": { "type": "STRING" }
        },
        "required": ["summary", "clothing", "activities", "healthTip"]
    })
}

/// The slice of a snapshot the advice prompt is allowed to see.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub description: String,
}

impl From<&WeatherSnapshot> for RecommendationRequest {
    fn from(s: &WeatherSnapshot) -> Self {
        Self {
            city: s.city.clone(),
            temperature_c: s.temperature_c,
            condition: s.condition.clone(),
            description: s.description.clone(),
        }
    }
}

impl RecommendationRequest {
    pub fn prompt(&self) -> String {
        format!(
            r#"Based on this weather in {city}: {temp}°C, {condition}, {description}.
Provide lifestyle advice in JSON:
{{
  "summary": "Short 1-sentence summary",
  "clothing": ["item1", "item2"],
  "activities": "Best activities for today",
  "healthTip": "UV or allergy advice"
}}"#,
            city = self.city,
            temp = self.temperature_c,
            condition = self.condition,
            description = self.description,
        )
    }

    pub fn to_generate_request(&self) -> GenerateRequest {
        GenerateRequest {
            prompt: self.prompt(),
            grounded: false,
            schema: Some(recommendation_schema()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Tokyo".into(),
            country: "Japan".into(),
            temperature_c: 21.5,
            condition: "Cloudy".into(),
            description: "broken clouds".into(),
            humidity_pct: 60.0,
            wind_speed_kmh: 9.0,
            pressure_hpa: 1012.0,
            visibility_km: 10.0,
            feels_like_c: 21.0,
            uv_index: 4.0,
            sunrise: "05:10 AM".into(),
            sunset: "06:40 PM".into(),
            forecast: Vec::new(),
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn weather_request_is_grounded_and_schema_bound() {
        let req = weather_request("  Paris  ");
        assert!(req.grounded);
        assert!(req.prompt.contains(r#""Paris""#));
        assert!(req.prompt.contains("live web search"));

        let schema = req.schema.expect("schema present");
        assert_eq!(schema["required"], json!(["city", "temperature", "condition", "forecast"]));
        assert_eq!(schema["properties"]["forecast"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["windSpeed"]["type"], "NUMBER");
    }

    #[test]
    fn recommendation_request_only_sees_summary_fields() {
        let req = RecommendationRequest::from(&snapshot());
        assert_eq!(
            req,
            RecommendationRequest {
                city: "Tokyo".into(),
                temperature_c: 21.5,
                condition: "Cloudy".into(),
                description: "broken clouds".into(),
            }
        );
    }

    #[test]
    fn recommendation_prompt_embeds_snapshot_facts() {
        let prompt = RecommendationRequest::from(&snapshot()).prompt();
        assert!(prompt.starts_with("Based on this weather in Tokyo: 21.5°C, Cloudy, broken clouds."));
        assert!(prompt.contains("\"healthTip\""));
    }

    #[test]
    fn recommendation_request_is_not_grounded() {
        let req = RecommendationRequest::from(&snapshot()).to_generate_request();
        assert!(!req.grounded);
        let schema = req.schema.expect("schema present");
        assert_eq!(schema["properties"]["clothing"]["items"]["type"], "STRING");
    }
}
