use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    error::RetrievalError,
    model::Retrieval,
    prompt::{self, RecommendationRequest},
    provider::ModelClient,
    schema,
};

/// Anything that can turn a free-text location into a committed triple.
#[async_trait]
pub trait WeatherRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Retrieval, RetrievalError>;
}

/// Two sequential model calls: grounded weather first, then advice derived from it.
#[derive(Debug, Clone)]
pub struct WeatherService<C> {
    client: C,
}

impl<C: ModelClient> WeatherService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    async fn fetch(&self, query: &str) -> Result<Retrieval, RetrievalError> {
        let weather = self.client.generate(&prompt::weather_request(query)).await?;
        let mut snapshot = schema::decode_weather(&weather.text, Utc::now())?;

        let advice = RecommendationRequest::from(&snapshot).to_generate_request();
        let recommendation = schema::decode_recommendation(&self.client.generate(&advice).await?.text)?;

        snapshot.captured_at = Utc::now();

        Ok(Retrieval { snapshot, recommendation, citations: weather.citations })
    }
}

#[async_trait]
impl<C: ModelClient> WeatherRetriever for WeatherService<C> {
    async fn retrieve(&self, query: &str) -> Result<Retrieval, RetrievalError> {
        if query.trim().is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        info!(query = query.trim(), "retrieving weather");
        match self.fetch(query).await {
            Ok(r) => {
                info!(
                    city = r.snapshot.city.as_str(),
                    citations = r.citations.len(),
                    "weather retrieved"
                );
                Ok(r)
            }
            Err(e) => {
                warn!(query = query.trim(), error = %e, "weather retrieval failed");
                Err(e)
            }
        }
    }
}
