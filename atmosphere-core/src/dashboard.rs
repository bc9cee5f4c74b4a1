//! View state for the dashboard and the user-triggered transitions on it.
//!
//! Searches are tagged with a sequence number when they start. A result is
//! committed only if no newer search has been started since, so overlapping
//! searches resolve to the most recent intent regardless of completion order.

use tracing::{debug, info};

use crate::{
    config::DEFAULT_CITY,
    error::{LocationError, RetrievalError},
    history::SearchHistory,
    location::Locator,
    model::{Retrieval, TemperatureUnit},
    service::WeatherRetriever,
};

pub const RETRIEVAL_FAILED_MESSAGE: &str = "Failed to fetch weather. Please try a different location.";
pub const LOCATION_DENIED_MESSAGE: &str = "Location access denied. Please type your city.";
pub const LOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported on this device.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Handle for one in-flight search, returned by [`Dashboard::begin_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

pub struct Dashboard<R> {
    retriever: R,
    default_city: String,
    query: String,
    current: Option<Retrieval>,
    loading: bool,
    error: Option<String>,
    unit: TemperatureUnit,
    history: SearchHistory,
    issued: u64,
}

impl<R: WeatherRetriever> Dashboard<R> {
    pub fn new(retriever: R) -> Self {
        Self {
            retriever,
            default_city: DEFAULT_CITY.to_owned(),
            query: String::new(),
            current: None,
            loading: false,
            error: None,
            unit: TemperatureUnit::default(),
            history: SearchHistory::new(),
            issued: 0,
        }
    }

    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current(&self) -> Option<&Retrieval> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    pub fn phase(&self) -> RequestPhase {
        if self.loading {
            RequestPhase::Loading
        } else if self.error.is_some() {
            RequestPhase::Error
        } else if self.current.is_some() {
            RequestPhase::Success
        } else {
            RequestPhase::Idle
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// The implicit first search so the dashboard never opens empty.
    pub async fn initialize(&mut self) -> bool {
        let city = self.default_city.clone();
        self.submit_search(&city).await
    }

    /// Run a full search. Returns `false` without touching state when `text` is blank.
    pub async fn submit_search(&mut self, text: &str) -> bool {
        let Some(ticket) = self.begin_search(text) else {
            return false;
        };
        let result = self.retriever.retrieve(ticket.query()).await;
        self.finish_search(&ticket, result);
        true
    }

    pub async fn replay_history(&mut self, city: &str) -> bool {
        self.submit_search(city).await
    }

    /// Search for the locator's position. Location failures set an error and skip retrieval.
    pub async fn use_current_location(&mut self, locator: &dyn Locator) -> bool {
        match locator.current_position().await {
            Ok(coords) => self.submit_search(&coords.to_query()).await,
            Err(e) => {
                info!(error = %e, "current location unavailable");
                self.error = Some(location_message(&e).to_owned());
                false
            }
        }
    }

    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggle();
    }

    /// Start a search: mark loading and hand back a ticket. `None` for blank input.
    pub fn begin_search(&mut self, text: &str) -> Option<SearchTicket> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        self.issued += 1;
        self.loading = true;
        self.error = None;

        Some(SearchTicket { seq: self.issued, query: query.to_owned() })
    }

    /// Apply a finished search. Returns `false` if a newer search superseded it.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Retrieval, RetrievalError>,
    ) -> bool {
        if ticket.seq != self.issued {
            debug!(seq = ticket.seq, latest = self.issued, query = ticket.query(), "dropping stale result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(retrieval) => {
                self.history.record(&retrieval.snapshot.city);
                self.current = Some(retrieval);
                self.query.clear();
                self.error = None;
            }
            Err(_) => {
                self.error = Some(RETRIEVAL_FAILED_MESSAGE.to_owned());
            }
        }
        true
    }
}

fn location_message(err: &LocationError) -> &'static str {
    match err {
        LocationError::PermissionDenied => LOCATION_DENIED_MESSAGE,
        LocationError::Unsupported | LocationError::Other(_) => LOCATION_UNSUPPORTED_MESSAGE,
    }
}
