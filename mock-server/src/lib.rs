use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(rename = "createdAt", serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub text: String,
}

/// Posts in insertion order.
pub type Db = Arc<RwLock<Vec<Post>>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

/// Build the router over an existing store, so tests can seed or inspect it.
pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/api/posts/", get(list_posts).post(create_post))
        .route("/api/posts/{id}", delete(delete_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn iso_millis<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    Json(db.read().await.clone())
}

async fn create_post(State(db): State<Db>, Json(input): Json<CreatePost>) -> StatusCode {
    let post = Post::new(input.text);
    tracing::debug!(id = %post.id, "created post");
    db.write().await.push(post);
    StatusCode::CREATED
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut posts = db.write().await;
    let index = posts.iter().position(|p| p.id == id).ok_or(StatusCode::NOT_FOUND)?;
    posts.remove(index);
    tracing::debug!(%id, "deleted post");
    Ok(Json(serde_json::json!({})))
}
