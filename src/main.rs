mod api;
mod config;
mod model;
mod seed;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::seed::seed_if_empty;
use crate::storage::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("🚀 Starting Blog API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Database: {}", config.storage.database_path);
    info!("   - Seed: {}", config.seed.enabled);
    info!("   - Server: {}", config.bind_addr());

    // Open storage
    info!("💾 Opening database...");
    let db = Database::connect(&config.storage.database_path).await?;
    let blogs = db.blogs();
    let posts = db.posts();
    info!("✅ Database ready");

    // Seeding completes before the listener is bound
    if config.seed.enabled {
        let resource = config.seed.resource_path.as_deref();
        match resource {
            Some(path) => info!("🌱 Seeding empty stores from {:?}", path),
            None => info!("🌱 Seeding empty stores from bundled text"),
        }
        seed_if_empty(&posts, resource, &config.seed.title).await?;
        seed_if_empty(&blogs, resource, &config.seed.title).await?;
    }

    let state = AppState {
        blogs: Arc::new(blogs),
        posts: Arc::new(posts),
    };
    let app = api::router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health  - Health check");
    info!("   GET  /blogs   - List blogs");
    info!("   GET  /posts   - List posts");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
