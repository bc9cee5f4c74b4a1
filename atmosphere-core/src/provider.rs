use crate::{Config, error::ModelError, model::Citation, provider::gemini::GeminiClient};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod gemini;

/// One prompt for the model, asking for a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Enable search grounding so citation metadata comes back with the answer.
    pub grounded: bool,
    /// Optional response schema; without it the model is only asked for JSON.
    pub schema: Option<Value>,
}

/// What the model returned: the text body plus any grounding sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub text: String,
    pub citations: Vec<Citation>,
}

#[async_trait]
pub trait ModelClient: Send + Sync + Debug {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ModelError>;
}

#[async_trait]
impl<T: ModelClient + ?Sized> ModelClient for Box<T> {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ModelError> {
        (**self).generate(request).await
    }
}

/// Build the model client described by the config. Fails when no API key can be found.
pub fn client_from_config(config: &Config) -> anyhow::Result<Box<dyn ModelClient>> {
    let api_key = config.resolve_api_key()?;
    let client = GeminiClient::builder(api_key)
        .model(config.model())
        .base_url(config.base_url())
        .timeout(config.request_timeout())
        .build()?;

    Ok(Box::new(client))
}
