//! Plain-text rendering of the dashboard state.

use std::fmt::Write;

use atmosphere_core::{
    Dashboard, ForecastDay, Recommendation, Retrieval, TemperatureUnit, WeatherRetriever,
    WeatherSnapshot, model::WeatherCondition,
};
use chrono::NaiveDate;

const RULE: &str = "────────────────────────────────────────────";

pub const LOADING_LINE: &str = "Syncing with Atmosphere AI... gathering meteorological data and real-time grounding";

pub fn icon(condition: &str) -> &'static str {
    match WeatherCondition::classify(condition) {
        WeatherCondition::Clear => "☀",
        WeatherCondition::Rain => "🌧",
        WeatherCondition::Storm => "⛈",
        WeatherCondition::Snow => "❄",
        WeatherCondition::Wind => "🌬",
        WeatherCondition::Mist => "🌫",
        WeatherCondition::Cloudy => "☁",
    }
}

fn temp(unit: TemperatureUnit, celsius: f64) -> String {
    format!("{}°{}", unit.display(celsius), unit.symbol())
}

/// Whole dashboard: banner, history chips, then either the weather or the empty state.
pub fn dashboard<R: WeatherRetriever>(d: &Dashboard<R>, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ATMOSPHERE AI  [{}]", d.unit().as_str().to_uppercase());
    out.push_str(RULE);
    out.push('\n');

    if !d.history().is_empty() {
        let chips: Vec<String> = d
            .history()
            .iter()
            .enumerate()
            .map(|(i, city)| format!("[{}] {}", i + 1, city.to_uppercase()))
            .collect();
        let _ = writeln!(out, "Recent: {}", chips.join("  "));
    }

    if let Some(err) = d.error() {
        let _ = writeln!(out, "! {err}");
    }

    if d.is_loading() {
        let _ = writeln!(out, "{LOADING_LINE}");
        return out;
    }

    match d.current() {
        Some(r) => out.push_str(&retrieval(r, d.unit(), today)),
        None => out.push_str(&empty_state()),
    }
    out
}

pub fn retrieval(r: &Retrieval, unit: TemperatureUnit, today: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(&hero(&r.snapshot, unit, today));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&details(&r.snapshot, unit));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&forecast(&r.snapshot.forecast, unit));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&insight(&r.recommendation));

    let sources = r.visible_citations();
    if !sources.is_empty() {
        out.push_str(RULE);
        out.push('\n');
        out.push_str("VERIFIED SOURCES\n");
        for c in sources {
            let _ = writeln!(out, "  {}  <{}>", c.label(), c.uri);
        }
    }
    out
}

pub fn hero(s: &WeatherSnapshot, unit: TemperatureUnit, today: NaiveDate) -> String {
    let mut out = String::new();
    if s.country.is_empty() {
        let _ = writeln!(out, "{}", s.city);
    } else {
        let _ = writeln!(out, "{}, {}", s.city, s.country);
    }
    let _ = writeln!(out, "{}", today.format("%A, %B %-d"));
    let _ = writeln!(out, "{}  {}  {}", icon(&s.condition), temp(unit, s.temperature_c), s.description);
    let _ = writeln!(
        out,
        "Wind {} km/h · Humidity {}% · UV {}",
        s.wind_speed_kmh, s.humidity_pct, s.uv_index
    );
    out
}

pub fn details(s: &WeatherSnapshot, unit: TemperatureUnit) -> String {
    let rows = [
        ("Feels Like", temp(unit, s.feels_like_c)),
        ("Visibility", format!("{} km", s.visibility_km)),
        ("Pressure", format!("{} hPa", s.pressure_hpa)),
        ("Sunrise", s.sunrise.clone()),
        ("Sunset", s.sunset.clone()),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<12}{value}");
    }
    out
}

pub fn forecast(days: &[ForecastDay], unit: TemperatureUnit) -> String {
    let mut out = String::from("5-DAY FORECAST\n");
    for (i, day) in days.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<10}{} {:<14}{:>6} / {:<6} rain {}%",
            day.display_label(i),
            icon(&day.condition),
            day.condition,
            temp(unit, day.high_c),
            temp(unit, day.low_c),
            day.chance_of_rain_pct,
        );
    }
    out
}

pub fn insight(rec: &Recommendation) -> String {
    let mut out = String::from("AI INSIGHT\n");
    let _ = writeln!(out, "  \"{}\"", rec.summary);
    if !rec.clothing.is_empty() {
        let _ = writeln!(out, "  Wear:       {}", rec.clothing.join(", "));
    }
    let _ = writeln!(out, "  Activities: {}", rec.activities);
    let _ = writeln!(out, "  Health:     {}", rec.health_tip);
    out
}

pub fn empty_state() -> String {
    "No Weather Data\nSearch for a city or use your location to see real-time conditions and AI recommendations.\n"
        .to_string()
}
