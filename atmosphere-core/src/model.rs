use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of grounding citations surfaced to the renderer.
pub const MAX_VISIBLE_CITATIONS: usize = 3;

/// Number of forecast days kept on a snapshot.
pub const FORECAST_DAYS: usize = 5;

/// One resolved weather observation plus its forecast. All temperatures are Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub condition: String,
    pub description: String,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub pressure_hpa: f64,
    pub visibility_km: f64,
    pub feels_like_c: f64,
    pub uv_index: f64,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastDay>,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub high_c: f64,
    pub low_c: f64,
    pub condition: String,
    pub chance_of_rain_pct: f64,
}

impl ForecastDay {
    /// Label shown in the forecast list; the first entry always reads "Today".
    pub fn display_label(&self, index: usize) -> &str {
        if index == 0 { "Today" } else { &self.day }
    }
}

/// Lifestyle advice derived from a single snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub summary: String,
    pub clothing: Vec<String>,
    pub activities: String,
    pub health_tip: String,
}

/// A web source returned alongside a grounded model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: Option<String>,
}

impl Citation {
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.uri)
    }
}

/// The committed result of one retrieval. Replaced as a whole, never field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retrieval {
    pub snapshot: WeatherSnapshot,
    pub recommendation: Recommendation,
    pub citations: Vec<Citation>,
}

impl Retrieval {
    pub fn visible_citations(&self) -> &[Citation] {
        let n = self.citations.len().min(MAX_VISIBLE_CITATIONS);
        &self.citations[..n]
    }
}

/// Temperature unit preference. Only affects display; stored values stay Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Convert a stored Celsius value into the whole-degree value to display.
    pub fn display(&self, celsius: f64) -> i64 {
        match self {
            TemperatureUnit::Celsius => round_half_up(celsius),
            TemperatureUnit::Fahrenheit => round_half_up(celsius * 9.0 / 5.0 + 32.0),
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Halves round toward positive infinity: -0.5 -> 0, 0.5 -> 1.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Coarse classification of the model's free-text condition tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Rain,
    Storm,
    Snow,
    Wind,
    Mist,
    Cloudy,
}

impl WeatherCondition {
    /// Match order matters: "Thunderstorm with rain" classifies as rain.
    pub fn classify(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        if tag.contains("sun") || tag.contains("clear") {
            Self::Clear
        } else if tag.contains("rain") {
            Self::Rain
        } else if tag.contains("lightning") || tag.contains("storm") {
            Self::Storm
        } else if tag.contains("snow") {
            Self::Snow
        } else if tag.contains("wind") {
            Self::Wind
        } else if tag.contains("mist") || tag.contains("fog") {
            Self::Mist
        } else {
            Self::Cloudy
        }
    }
}
