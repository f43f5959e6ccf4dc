use crate::api::models::AppState;
use crate::api::blogs::handlers::list_blogs_handler;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs_handler))
}
