//! Domain DTOs for the posts API.
//!
//! # Design
//! `createdAt` is the only field this crate interprets. Everything else the
//! server sends (`text`, `_id`, author fields, counters) is kept in `extra`
//! as raw JSON in the order it arrived and written back out unchanged,
//! whatever its type. Accessors read the well-known fields out of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timestamp;

/// A single post returned by the list endpoint, with `createdAt` parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    #[serde(rename = "createdAt", with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// The post's text, when the server sent it as a string.
    pub fn text(&self) -> Option<&str> {
        self.extra.get("text").and_then(Value::as_str)
    }

    /// The server-assigned identifier, from `_id` or `id`.
    ///
    /// Numbers are rendered in decimal so the value can be handed straight
    /// to `PostClient::build_delete_post`.
    pub fn id(&self) -> Option<String> {
        ["_id", "id"]
            .iter()
            .filter_map(|key| self.extra.get(*key))
            .find_map(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Look up any field the server sent that this crate does not model.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// Request payload for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub text: String,
}

impl NewPost {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
