use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_MODEL},
    error::ModelError,
    model::Citation,
};

use super::{GenerateRequest, GenerateResponse, ModelClient};

const JSON_MIME: &str = "application/json";

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

pub struct GeminiClientBuilder {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiClientBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<GeminiClient, ModelError> {
        let mut http = Client::builder();
        if let Some(t) = self.timeout {
            http = http.timeout(t);
        }

        Ok(GeminiClient {
            api_key: self.api_key,
            model: self.model,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            http: http.build()?,
        })
    }
}

impl GeminiClient {
    pub fn builder(api_key: impl Into<String>) -> GeminiClientBuilder {
        GeminiClientBuilder {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    fn into_response(self) -> Result<GenerateResponse, ModelError> {
        let candidate = self.candidates.into_iter().next().ok_or(ModelError::EmptyContent)?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ModelError::EmptyContent);
        }

        let citations = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .filter_map(|web| {
                let uri = web.uri.filter(|u| !u.is_empty())?;
                Some(Citation { uri, title: web.title })
            })
            .collect();

        Ok(GenerateResponse { text, citations })
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ModelError> {
        let body = GenerateContentRequest {
            contents: vec![Content { role: "user", parts: vec![Part { text: &request.prompt }] }],
            tools: if request.grounded {
                vec![Tool { google_search: GoogleSearch {} }]
            } else {
                Vec::new()
            },
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME,
                response_schema: request.schema.as_ref(),
            },
        };

        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| truncate_body(&text));
            warn!(status = status.as_u16(), %message, "model request failed");
            return Err(ModelError::Api { status: status.as_u16(), message });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(ModelError::Envelope)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "model call succeeded"
            );
        }

        parsed.into_response()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::builder("test_key")
            .model("gemini-test")
            .base_url(format!("{}/", server.uri()))
            .build()
            .expect("client builds")
    }

    fn request(grounded: bool) -> GenerateRequest {
        GenerateRequest {
            prompt: "weather please".into(),
            grounded,
            schema: Some(json!({ "type": "OBJECT" })),
        }
    }

    #[tokio::test]
    async fn grounded_request_returns_text_and_citations() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test_key"))
            .and(body_partial_json(json!({
                "tools": [{ "googleSearch": {} }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                    "groundingMetadata": {
                        "groundingChunks": [
                            { "web": { "uri": "https://weather.test/sf", "title": "SF Weather" } },
                            { "web": { "uri": "https://news.test" } },
                            { "retrievedContext": { "uri": "ignored" } }
                        ]
                    }
                }],
                "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 5 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client(&server).generate(&request(true)).await.expect("ok");

        assert_eq!(resp.text, "{\"a\":1}");
        assert_eq!(resp.citations.len(), 2);
        assert_eq!(resp.citations[0].title.as_deref(), Some("SF Weather"));
        assert_eq!(resp.citations[1].title, None);
    }

    #[tokio::test]
    async fn ungrounded_request_omits_tools() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
            })))
            .mount(&server)
            .await;

        let resp = client(&server).generate(&request(false)).await.expect("ok");
        assert!(resp.citations.is_empty());

        let received = server.received_requests().await.expect("recording enabled");
        let body: Value = serde_json::from_slice(&received[0].body).expect("json body");
        assert!(body.get("tools").is_none());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "weather please");
    }

    #[tokio::test]
    async fn thought_parts_are_skipped() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{}" }
                ] } }]
            })))
            .mount(&server)
            .await;

        let resp = client(&server).generate(&request(false)).await.expect("ok");
        assert_eq!(resp.text, "{}");
    }

    #[tokio::test]
    async fn api_error_message_is_extracted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let err = client(&server).generate(&request(true)).await.unwrap_err();
        match err {
            ModelError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_candidates_is_empty_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = client(&server).generate(&request(true)).await.unwrap_err();
        assert!(matches!(err, ModelError::EmptyContent));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
