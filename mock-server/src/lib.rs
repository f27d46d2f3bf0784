use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct ReplacePost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    posts: BTreeMap<u64, Post>,
    next_id: u64,
}

impl Store {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            posts: posts.into_iter().map(|p| (p.id, p)).collect(),
            next_id,
        }
    }

    fn insert(&mut self, input: NewPost) -> Post {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let post = Post {
            id,
            title: input.title,
            body: input.body,
            user_id: input.user_id,
        };
        self.posts.insert(id, post.clone());
        post
    }
}

pub type Db = Arc<RwLock<Store>>;

/// `count` generated posts with ids `1..=count`, ten per user.
pub fn seed_posts(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|id| Post {
            id,
            title: format!("post {id}"),
            body: format!("body of post {id}"),
            user_id: (id - 1) / 10 + 1,
        })
        .collect()
}

pub fn app() -> Router {
    app_with_posts(Vec::new())
}

pub fn app_with_posts(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_posts(posts)));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(replace_post).delete(delete_post))
        .with_state(db)
}

pub async fn run_with_posts(listener: TcpListener, posts: Vec<Post>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_posts(posts)).await
}

/// Case-insensitive substring match over title and body.
fn mentions(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle) || post.body.to_lowercase().contains(needle)
}

async fn list_posts(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Vec<Post>> {
    let store = db.read().await;
    let posts: Vec<Post> = match params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let needle = q.to_lowercase();
            store.posts.values().filter(|p| mentions(p, &needle)).cloned().collect()
        }
        None => store.posts.values().cloned().collect(),
    };
    tracing::debug!(q = ?params.q, count = posts.len(), "list posts");
    Json(posts)
}

async fn create_post(State(db): State<Db>, Json(input): Json<NewPost>) -> (StatusCode, Json<Post>) {
    let post = db.write().await.insert(input);
    tracing::debug!(id = post.id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ReplacePost>,
) -> Result<Json<Post>, StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.title = input.title;
    post.body = input.body;
    post.user_id = input.user_id;
    tracing::debug!(id, "replaced post");
    Ok(Json(post.clone()))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut store = db.write().await;
    store.posts.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(id, "deleted post");
    Ok(Json(serde_json::json!({})))
}
