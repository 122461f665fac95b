use futures_util::StreamExt;
use roster_logging::roster_debug;
use serde_json::Value;

use crate::{FailureKind, FeedSettings, FetchError};

pub const TOKEN_HEADER: &str = "x-txadmin-token";
pub const EPOCH_HEADER: &str = "x-txadmin-epoch";

#[async_trait::async_trait]
pub trait FeedClient: Send + Sync {
    /// Requests one feed reply. `epoch` is the token last accepted, if any; the
    /// remote side answers with a diff when it can, a full snapshot otherwise.
    async fn fetch(&self, epoch: Option<&str>) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFeedClient {
    settings: FeedSettings,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestFeedClient {
    pub fn new(settings: FeedSettings) -> Result<Self, FetchError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }
}

#[async_trait::async_trait]
impl FeedClient for ReqwestFeedClient {
    async fn fetch(&self, epoch: Option<&str>) -> Result<Value, FetchError> {
        roster_debug!("Polling {} epoch={:?}", self.endpoint, epoch);

        let mut request = self
            .client
            .get(self.endpoint.clone())
            .header(TOKEN_HEADER, self.settings.token.as_str());
        if let Some(epoch) = epoch {
            request = request.header(EPOCH_HEADER, epoch);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::InvalidJson, err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
