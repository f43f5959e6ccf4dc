use crate::api::models::*;
use crate::model::Post;
use axum::{extract::State, Json};
use tracing::info;

pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.posts.find_all().await?;

    info!(count = posts.len(), "Listed posts");

    Ok(Json(posts))
}
