use std::time::Duration;

use futures_util::StreamExt;
use portal_core::{JobPost, NewJobPost};
use portal_logging::portal_trace;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ApiError, FailureKind};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Backend address, e.g. `http://localhost:8080`. Endpoint paths are appended to it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound on a response body; larger bodies fail as `TooLarge`.
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The three calls the client makes against the posts backend.
#[async_trait::async_trait]
pub trait JobPostApi: Send + Sync {
    /// `GET /allPosts`
    async fn fetch_all(&self) -> Result<Vec<JobPost>, ApiError>;
    /// `POST /post`; the returned record must carry a server-assigned id.
    async fn create(&self, post: &NewJobPost) -> Result<JobPost, ApiError>;
    /// `GET /posts/{term}` with `term` interpolated as given.
    async fn search(&self, term: &str) -> Result<Vec<JobPost>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base_url: String,
    max_bytes: u64,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base address", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            max_bytes: settings.max_bytes,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        portal_trace!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(response).await
    }

    /// Checks the status, reads the body under the size cap and decodes it.
    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes).map_err(|err| ApiError::new(FailureKind::Parse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl JobPostApi for ReqwestApi {
    async fn fetch_all(&self) -> Result<Vec<JobPost>, ApiError> {
        self.get_json("/allPosts").await
    }

    async fn create(&self, post: &NewJobPost) -> Result<JobPost, ApiError> {
        let url = self.endpoint("/post")?;
        let body = serde_json::to_vec(post)
            .map_err(|err| ApiError::new(FailureKind::Parse, err.to_string()))?;
        portal_trace!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let created: JobPost = self.read_json(response).await?;
        if created.id.is_none() {
            return Err(ApiError::new(
                FailureKind::Parse,
                "created post has no server-assigned id",
            ));
        }
        Ok(created)
    }

    async fn search(&self, term: &str) -> Result<Vec<JobPost>, ApiError> {
        self.get_json(&format!("/posts/{term}")).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Parse, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
