use std::time::Duration;

use futures_util::StreamExt;
use recommender_logging::{rec_debug, rec_info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::decode::decode_json;
use crate::{FailureKind, RecommendRequest, RequestError};

pub const DEFAULT_ENDPOINT: &str = "https://shl-recommendation-engine-hnys.onrender.com/recommend";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
pub trait RecommendClient: Send + Sync {
    /// Posts one request and returns the decoded JSON body of a 2xx response.
    async fn recommend(&self, request: &RecommendRequest)
        -> Result<serde_json::Value, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRecommendClient {
    endpoint: url::Url,
    client: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestRecommendClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let endpoint = url::Url::parse(&settings.endpoint)
            .map_err(|err| RequestError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RequestError::new(
                FailureKind::InvalidEndpoint,
                format!("unsupported scheme {}", endpoint.scheme()),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            endpoint,
            client,
            max_bytes: settings.max_bytes,
        })
    }

    fn too_large(&self, actual: u64) -> RequestError {
        RequestError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl RecommendClient for ReqwestRecommendClient {
    async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<serde_json::Value, RequestError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| RequestError::new(FailureKind::InvalidBody, err.to_string()))?;
        rec_debug!(
            "POST {} top_k={} prompt_len={}",
            self.endpoint,
            request.top_k,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        rec_info!("Received {} bytes from {}", bytes.len(), self.endpoint);

        decode_json(&bytes, content_type.as_deref())
            .map_err(|err| RequestError::new(FailureKind::InvalidBody, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return RequestError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
