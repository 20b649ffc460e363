//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use std::fmt;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewPost, Post};

/// Collection path of the posts resource, relative to the base URL.
pub const RESOURCE_PATH: &str = "api/posts/";

/// Synchronous, stateless client for the posts API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct PostClient {
    base_url: String,
}

impl PostClient {
    /// An empty `base_url` keeps paths relative (`api/posts/`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_path(&self) -> String {
        if self.base_url.is_empty() {
            RESOURCE_PATH.to_string()
        } else {
            format!("{}/{RESOURCE_PATH}", self.base_url)
        }
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// The id is interpolated verbatim: no encoding, no type coercion
    /// beyond `Display`.
    pub fn build_delete_post(&self, id: impl fmt::Display) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}{id}", self.collection_path()),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Decode the list body, parsing every `createdAt`. One bad record
    /// fails the whole call.
    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Hands back the server's response unchanged on success.
    pub fn parse_create_post(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        check_status(&response)?;
        Ok(response)
    }

    /// Hands back the server's response unchanged on success.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        check_status(&response)?;
        Ok(response)
    }
}

/// Any non-2xx status becomes an `HttpError` carrying the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
