use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use sync_core::{Method, SyncError, TransportFailureKind};
use sync_logging::sync_trace;
use url::Url;

use crate::config::{ConfigError, SyncConfig};

/// Header the server uses to report the unpaged size of a collection.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// JSON body, already encoded.
    pub body: Option<Vec<u8>>,
}

/// Any HTTP answer, successful or not. Status handling is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub total_count: Option<u64>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange. Errors are transport failures only.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SyncError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &SyncConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SyncError> {
        sync_trace!("{:?} {}", request.method, request.url);
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(HttpResponse {
            status,
            total_count,
            body,
        })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SyncError {
    if err.is_timeout() {
        return SyncError::transport(TransportFailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return SyncError::transport(TransportFailureKind::Connect, err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return SyncError::transport(TransportFailureKind::Decode, err.to_string());
    }
    SyncError::transport(TransportFailureKind::Network, err.to_string())
}
