use super::{Store, StoreResult};
use crate::model::{Blog, Draft, Entity, Post};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, SqlitePool};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{info, warn};

pub const MEMORY_PATH: &str = ":memory:";

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// SQLite connection pool with the schema applied.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Open (or create) the database at `path` and run pending migrations.
    ///
    /// `:memory:` opens a private in-memory database that lives as long as
    /// the pool.
    pub async fn connect(path: &str) -> StoreResult<Self> {
        let pool = if path == MEMORY_PATH {
            // Named per call so parallel tests never share a database.
            let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
            let uri = format!(
                "file:blog-api-memdb-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                id
            );
            let options = SqliteConnectOptions::new()
                .filename(&uri)
                .shared_cache(true)
                .create_if_missing(true);

            // A single pinned connection keeps the memory database alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .connect_with(options)
                .await?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                warn!(path = %parent.display(), error = %e, "Failed to create database directory");
            }

            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .connect_with(options)
                .await?
        };

        info!(path = %path, "Database connected");

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations checked/applied");

        Ok(Self { pool })
    }

    pub fn blogs(&self) -> SqliteStore<Blog> {
        SqliteStore::new(self.pool.clone())
    }

    pub fn posts(&self) -> SqliteStore<Post> {
        SqliteStore::new(self.pool.clone())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// `Store` over the table named by `T::TABLE`.
pub struct SqliteStore<T> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> SqliteStore<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Store<T> for SqliteStore<T>
where
    T: Entity + for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static,
{
    async fn count(&self) -> StoreResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::TABLE);
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn save(&self, draft: Draft) -> StoreResult<T> {
        draft.validate()?;

        let sql = format!("INSERT INTO {} (title, content) VALUES (?1, ?2)", T::TABLE);
        let result = sqlx::query(&sql)
            .bind(&draft.title)
            .bind(&draft.content)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        info!(table = T::TABLE, id, "Saved record");

        Ok(T::from_draft(id, draft))
    }

    async fn find_all(&self) -> StoreResult<Vec<T>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        let records = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}
