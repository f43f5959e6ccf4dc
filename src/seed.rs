use crate::model::Draft;
use crate::storage::{Store, StoreError};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Seed text compiled into the binary.
pub const BUNDLED_RESOURCE: &str = include_str!("../data/markdown-example.txt");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed resource {path:?}")]
    Resource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Insert one record when `store` holds no records.
///
/// The content is the file at `resource` when given, otherwise
/// [`BUNDLED_RESOURCE`]. Returns the inserted record, or `None` when the
/// store was already populated. The file is only read when an insert is
/// going to happen.
pub async fn seed_if_empty<S, T>(
    store: &S,
    resource: Option<&Path>,
    title: &str,
) -> Result<Option<T>, SeedError>
where
    S: Store<T> + ?Sized,
    T: Debug + Send,
{
    let existing = store.count().await?;
    if existing > 0 {
        info!(existing, "Store already populated, skipping seed");
        return Ok(None);
    }

    let content = match resource {
        Some(path) => read_resource(path).await?,
        None => BUNDLED_RESOURCE.to_string(),
    };
    let record = store.save(Draft::new(title, content)).await?;
    info!("Preloading {:?}", record);

    Ok(Some(record))
}

/// Read the whole resource as UTF-8.
async fn read_resource(path: &Path) -> Result<String, SeedError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Resource {
            path: path.to_path_buf(),
            source,
        })
}
