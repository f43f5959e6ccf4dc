use crate::api::models::*;
use crate::model::Blog;
use axum::{extract::State, Json};
use tracing::info;

pub async fn list_blogs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Blog>>, AppError> {
    let blogs = state.blogs.find_all().await?;

    info!(count = blogs.len(), "Listed blogs");

    Ok(Json(blogs))
}
