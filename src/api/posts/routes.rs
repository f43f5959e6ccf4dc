use crate::api::models::AppState;
use crate::api::posts::handlers::list_posts_handler;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts_handler))
}
