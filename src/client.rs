//! HTTP client for the analysis backend.

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{
    AnalysisResult, EvaluationReport, ImageRequest, TextRequest, TrainingReport,
};

pub const ANALYZE_TEXT_PATH: &str = "/analyze/text";
pub const ANALYZE_IMAGE_PATH: &str = "/analyze/image";
pub const TRAIN_MODEL_PATH: &str = "/train-model";
pub const EVALUATE_MODEL_PATH: &str = "/evaluate-model";

const USER_AGENT_VALUE: &str = concat!("emotion-lens/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT_VALUE);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        let body = TextRequest {
            text: text.to_string(),
        };
        self.post(ANALYZE_TEXT_PATH, Some(&body)).await
    }

    /// `data_url` is a full `data:<mime>;base64,...` string.
    pub async fn analyze_image(&self, data_url: &str) -> Result<AnalysisResult, ClientError> {
        let body = ImageRequest {
            image: data_url.to_string(),
        };
        self.post(ANALYZE_IMAGE_PATH, Some(&body)).await
    }

    pub async fn train_model(&self) -> Result<TrainingReport, ClientError> {
        self.post::<(), _>(TRAIN_MODEL_PATH, None).await
    }

    pub async fn evaluate_model(&self) -> Result<EvaluationReport, ClientError> {
        self.post::<(), _>(EVALUATE_MODEL_PATH, None).await
    }

    /// GET raw bytes plus the `content-type` header. Used for sample images.
    pub async fn fetch_bytes(&self, url: &str) -> Result<(Vec<u8>, Option<String>), ClientError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
            });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), content_type))
    }

    async fn post<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");

        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let value: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) if status.is_success() => return Err(ClientError::Decode(e)),
            Err(_) => {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                })
            }
        };

        if let Some(message) = backend_error(&value) {
            warn!(%url, %message, "backend reported an error");
            return Err(ClientError::Backend(message));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}

/// The `error` field of a response body, when it is set to something truthy.
pub fn backend_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
