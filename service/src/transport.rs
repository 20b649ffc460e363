//! Network execution of core `HttpRequest`s.
//!
//! # Design
//! `Transport` is the only seam between `PostService` and the network. It
//! takes the plain-data request the core built and hands back the plain-data
//! response, leaving status interpretation to `PostClient`. `ReqwestTransport`
//! owns one pooled `reqwest::Client` and is cheap to clone.

use async_trait::async_trait;
use posts_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use reqwest::Method;
use tracing::debug;

use crate::config::ServiceConfig;

/// Performs one HTTP round-trip.
///
/// Implementations return non-2xx responses as data; only failures that
/// produce no response at all become `ApiError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Wrap an already configured client. Its settings, default headers
    /// included, apply to every request.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.path, "HTTP request");

        let mut builder = self
            .inner
            .request(to_reqwest_method(request.method), &request.path);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
