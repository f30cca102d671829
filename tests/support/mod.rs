// In-process mock posts server for integration tests.
// Serves the four REST routes on a random port with an in-memory map.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

// DTOs are defined independently from the crate under test; the integration
// tests catch schema drift between the two.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: String,
}

#[derive(Deserialize)]
struct PostBody {
    id: Option<u64>,
    title: String,
    author: String,
}

pub fn post(id: u64, title: &str, author: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        author: author.to_string(),
    }
}

type Db = Arc<RwLock<BTreeMap<u64, Post>>>;

fn router(db: Db) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", put(update_post).delete(delete_post))
        .with_state(db)
}

/// Start a mock server seeded with the given posts; returns its base URL.
pub async fn spawn(seed: Vec<Post>) -> String {
    let db: Db = Arc::new(RwLock::new(
        seed.into_iter().map(|post| (post.id, post)).collect(),
    ));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(db)).await.unwrap();
    });
    format!("http://{addr}")
}

/// Start a server whose list route answers 200 with a non-JSON body.
pub async fn spawn_garbled() -> String {
    async fn garbled() -> &'static str {
        "not json"
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let app = Router::new().route("/posts", get(garbled));
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// Posts come back in id order, which stands in for the backend's
// server-defined ordering.
async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let posts = db.read().await;
    Json(posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<PostBody>,
) -> Result<(StatusCode, Json<Post>), StatusCode> {
    let mut posts = db.write().await;
    let id = match input.id {
        Some(id) if posts.contains_key(&id) => return Err(StatusCode::CONFLICT),
        Some(id) => id,
        None => posts.keys().next_back().map_or(1, |max| max + 1),
    };
    let post = Post {
        id,
        title: input.title,
        author: input.author,
    };
    posts.insert(id, post.clone());
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PostBody>,
) -> Result<Json<Post>, StatusCode> {
    let mut posts = db.write().await;
    if !posts.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let post = Post {
        id,
        title: input.title,
        author: input.author,
    };
    posts.insert(id, post.clone());
    Ok(Json(post))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut posts = db.write().await;
    posts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
