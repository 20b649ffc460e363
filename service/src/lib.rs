//! Asynchronous access to the posts API.
//!
//! `PostService` is the piece a UI layer talks to: three calls, one HTTP
//! request each. Requests are built and responses interpreted by
//! `posts_core::PostClient`; a `Transport` performs the round-trip in
//! between. Failures come back in the `Result` exactly as they occurred.
//!
//! ```no_run
//! # async fn demo() -> Result<(), posts_service::ApiError> {
//! use posts_service::{PostService, ServiceConfig};
//!
//! let service = PostService::new(ServiceConfig::new("http://localhost:3000"))?;
//! service.create("hello").await?;
//! for post in service.list().await? {
//!     println!("{} {:?}", post.created_at, post.text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod transport;

use std::fmt;

use posts_core::{NewPost, PostClient};

pub use config::ServiceConfig;
pub use posts_core::{ApiError, HttpResponse, Post};
pub use transport::{ReqwestTransport, Transport};

/// Stateless adapter over the posts resource.
///
/// Holds no mutable state, so a single instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct PostService<T = ReqwestTransport> {
    client: PostClient,
    transport: T,
}

impl PostService<ReqwestTransport> {
    pub fn new(config: ServiceConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(&config.base_url, transport))
    }
}

impl<T: Transport> PostService<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: PostClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &PostClient {
        &self.client
    }

    /// Fetch every post, in server order, with `createdAt` parsed.
    pub async fn list(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.transport.execute(self.client.build_list_posts()).await?;
        self.client.parse_list_posts(response)
    }

    /// Submit `{ "text": text }` and return the server's reply as-is.
    pub async fn create(&self, text: impl Into<String>) -> Result<HttpResponse, ApiError> {
        let request = self.client.build_create_post(&NewPost::new(text))?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_post(response)
    }

    /// Delete `api/posts/{id}` and return the server's reply as-is.
    pub async fn remove(&self, id: impl fmt::Display) -> Result<HttpResponse, ApiError> {
        let response = self.transport.execute(self.client.build_delete_post(id)).await?;
        self.client.parse_delete_post(response)
    }
}
