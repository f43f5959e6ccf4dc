pub mod blogs;
pub mod models;
pub mod posts;

// Re-exports
pub use models::*;

use axum::{extract::State, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

// Health handler (simple, keep here)
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    let total_blogs = state.blogs.count().await?;
    let total_posts = state.posts.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_blogs,
        total_posts,
    }))
}

/// Build the full router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(blogs::routes())
        .merge(posts::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blog, Draft, Post};
    use crate::seed::{seed_if_empty, BUNDLED_RESOURCE};
    use crate::storage::sqlite::MEMORY_PATH;
    use crate::storage::{Database, Store, StoreError, StoreResult};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state_for(db: &Database) -> AppState {
        AppState {
            blogs: Arc::new(db.blogs()),
            posts: Arc::new(db.posts()),
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ACCEPT, "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn posts_returns_seeded_post() {
        let db = Database::connect(MEMORY_PATH).await.unwrap();
        seed_if_empty(&db.posts(), None, "Hello World!")
            .await
            .unwrap();

        let (status, body) = get_json(router(state_for(&db)), "/posts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Hello World!");
        assert_eq!(body[0]["content"], BUNDLED_RESOURCE);
        assert!(body[0]["id"].is_i64());
    }

    #[tokio::test]
    async fn unseeded_blogs_returns_empty_array() {
        let db = Database::connect(MEMORY_PATH).await.unwrap();

        let (status, body) = get_json(router(state_for(&db)), "/blogs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn blogs_lists_every_record_in_id_order() {
        let db = Database::connect(MEMORY_PATH).await.unwrap();
        let first = db.blogs().save(Draft::new("one", "first blog body")).await.unwrap();
        let second = db.blogs().save(Draft::new("two", "second blog body")).await.unwrap();

        let (status, body) = get_json(router(state_for(&db)), "/blogs").await;

        assert_eq!(status, StatusCode::OK);
        let blogs: Vec<Blog> = serde_json::from_value(body).unwrap();
        assert_eq!(blogs, vec![first, second]);
    }

    #[tokio::test]
    async fn health_reports_counts() {
        let db = Database::connect(MEMORY_PATH).await.unwrap();
        db.posts().save(Draft::new("p", "post body text")).await.unwrap();

        let (status, body) = get_json(router(state_for(&db)), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["total_blogs"], 0);
        assert_eq!(body["total_posts"], 1);
    }

    struct BrokenStore;

    #[async_trait]
    impl Store<Post> for BrokenStore {
        async fn count(&self) -> StoreResult<i64> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn save(&self, _draft: Draft) -> StoreResult<Post> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }

        async fn find_all(&self) -> StoreResult<Vec<Post>> {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn store_failure_is_a_server_error() {
        let db = Database::connect(MEMORY_PATH).await.unwrap();
        let state = AppState {
            blogs: Arc::new(db.blogs()),
            posts: Arc::new(BrokenStore),
        };

        let (status, body) = get_json(router(state), "/posts").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "500 Internal Server Error");
        assert!(body["message"].as_str().unwrap().contains("database error"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let db = Database::connect(MEMORY_PATH).await.unwrap();

        let response = router(state_for(&db))
            .oneshot(Request::builder().uri("/comments").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
