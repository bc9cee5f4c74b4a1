use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LocationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Free-text query handed to the retrieval adapter, e.g. `"37.77, -122.42"`.
    pub fn to_query(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

/// Source of the device position.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position supplied up front, from flags or config.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Used when no position source is available on this machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocator;

#[async_trait]
impl Locator for UnavailableLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Pick a locator: explicit coordinates win, otherwise unsupported.
pub fn locator_for(coords: Option<Coordinates>) -> Box<dyn Locator> {
    match coords {
        Some(c) => Box::new(FixedLocator(c)),
        None => Box::new(UnavailableLocator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_lat_comma_lon() {
        let c = Coordinates { latitude: 37.77, longitude: -122.42 };
        assert_eq!(c.to_query(), "37.77, -122.42");
    }

    #[tokio::test]
    async fn locator_for_none_is_unsupported() {
        let err = locator_for(None).current_position().await.unwrap_err();
        assert!(matches!(err, LocationError::Unsupported));
    }

    #[tokio::test]
    async fn fixed_locator_returns_its_position() {
        let c = Coordinates { latitude: 1.5, longitude: 2.5 };
        let got = locator_for(Some(c)).current_position().await.expect("position");
        assert_eq!(got, c);
    }
}
