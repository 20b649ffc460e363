//! Settings for the async posts service.
//!
//! # Design
//! `ServiceConfig` is plain data with serde defaults, so it can be built in
//! code with the `with_*` methods or deserialized from a partial document.
//! Only `base_url` is usually set; everything else has a working default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for `PostService`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Origin the `api/posts/` path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Overall request timeout. `None` leaves reqwest's default in place.
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: None,
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_user_agent() -> String {
    format!("posts-service/{}", env!("CARGO_PKG_VERSION"))
}
