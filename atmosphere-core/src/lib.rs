//! Core library for the `atmosphere` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The generative-model client and the two-call weather retrieval flow
//! - Dashboard view state (search history, unit toggle, loading/error state)
//!
//! It is used by `atmosphere-cli`, but can also drive other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod location;
pub mod model;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod service;

pub use config::Config;
pub use dashboard::{Dashboard, RequestPhase, SearchTicket};
pub use error::{LocationError, ModelError, RetrievalError};
pub use history::SearchHistory;
pub use location::{Coordinates, Locator};
pub use model::{Citation, ForecastDay, Recommendation, Retrieval, TemperatureUnit, WeatherSnapshot};
pub use provider::{ModelClient, client_from_config};
pub use service::{WeatherRetriever, WeatherService};
