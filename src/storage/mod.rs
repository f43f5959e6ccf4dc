pub mod sqlite;

pub use sqlite::Database;

use crate::model::{Draft, ValidationError};
use async_trait::async_trait;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
}

/// Record store for one entity collection.
///
/// The store owns record identity: ids are assigned on `save` and never
/// reused.
#[async_trait]
pub trait Store<T: Send>: Send + Sync {
    async fn count(&self) -> StoreResult<i64>;

    /// Validate and persist a draft, returning the record with its new id.
    async fn save(&self, draft: Draft) -> StoreResult<T>;

    async fn find_all(&self) -> StoreResult<Vec<T>>;
}
