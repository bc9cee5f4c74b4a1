use thiserror::Error;

/// Failures talking to the generative model endpoint.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unreadable response envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("model returned no text content")]
    EmptyContent,
}

/// Which of the two model calls a decode failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Weather,
    Recommendation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Weather => f.write_str("weather"),
            Stage::Recommendation => f.write_str("recommendation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("location query is empty")]
    EmptyQuery,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to decode {stage} response: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid weather response: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location service unsupported")]
    Unsupported,

    #[error("location error: {0}")]
    Other(String),
}
