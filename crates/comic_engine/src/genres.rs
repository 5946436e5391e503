use std::time::Duration;

use comic_logging::{comic_debug, comic_error, comic_info};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use crate::decode::decode_text;
use crate::{FailureKind, FetchError, Genre, GenreFetch};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const GENRES_PATH: &str = "/api/genres/";

/// Where and how to reach the genre API.
///
/// Timeouts left as `None` fall back to the HTTP client's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub api_base_url: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl FetchSettings {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// `{base}/api/genres/?limit=unlimited`; a single trailing `/` on the base is ignored.
pub fn genres_endpoint(api_base_url: &str) -> Result<Url, FetchError> {
    let base = api_base_url.strip_suffix('/').unwrap_or(api_base_url);
    Url::parse(&format!("{base}{GENRES_PATH}?limit=unlimited"))
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

#[async_trait::async_trait]
pub trait GenreClient: Send + Sync {
    /// One attempt, no retry. Errors are returned, not logged.
    async fn request_genres(&self) -> Result<Vec<Genre>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenreClient {
    settings: FetchSettings,
}

impl ReqwestGenreClient {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    pub async fn fetch_genres(&self) -> GenreFetch {
        fetch_genres(self).await
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl GenreClient for ReqwestGenreClient {
    async fn request_genres(&self) -> Result<Vec<Genre>, FetchError> {
        let url = genres_endpoint(&self.settings.api_base_url)?;
        let client = self.build_client()?;

        comic_debug!("GET {}", url);
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        decode_genres(&body, content_type.as_deref())
    }
}

/// Runs one fetch and folds any failure into [`GenreFetch::Failed`].
///
/// Never panics and never retries; the failure is logged here.
pub async fn fetch_genres(client: &dyn GenreClient) -> GenreFetch {
    match client.request_genres().await {
        Ok(genres) => {
            comic_info!("Genres loaded: count={}", genres.len());
            comic_debug!(
                "Genres: {:?}",
                genres.iter().map(|genre| genre.name.as_str()).collect::<Vec<_>>()
            );
            GenreFetch::Loaded(genres)
        }
        Err(err) => {
            comic_error!("Failed to load genres: {}", err);
            GenreFetch::Failed(err)
        }
    }
}

/// Empty bodies and falsy JSON values (`null`, `false`, `0`, `""`) decode to no genres.
pub fn decode_genres(body: &[u8], content_type: Option<&str>) -> Result<Vec<Genre>, FetchError> {
    let decoded = decode_text(body, content_type)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    let text = decoded.text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    if is_falsy(&value) {
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
