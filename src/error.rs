use thiserror::Error;

/// Failures talking to the analysis backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with an `error` field.
    #[error("{0}")]
    Backend(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to create HTTP client: {0}")]
    Setup(String),
}

impl ClientError {
    /// Application-level error as opposed to a transport/protocol failure.
    pub fn is_backend(&self) -> bool {
        matches!(self, ClientError::Backend(_))
    }
}

/// Reasons a result could not be (fully) rendered.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("no emotion data in result")]
    MissingEmotions,

    #[error("emotion data is empty")]
    EmptyEmotions,

    #[error("emotion data is not a label-to-score mapping (got {0})")]
    MalformedEmotions(&'static str),

    #[error("result has no dominant emotion")]
    MissingDominantEmotion,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("image {0} is empty")]
    Empty(String),

    #[error("failed to fetch sample image: {0}")]
    Fetch(#[from] ClientError),
}
