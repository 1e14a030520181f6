//! Warden server: session-revocation and request-authorization service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use tracing_subscriber::{EnvFilter, fmt};

use warden_api::{AppState, build_router};
use warden_cache::provider::CacheManager;
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_database::{DatabasePool, MemoryUserRepository, PgUserRepository, UserRepository};

#[tokio::main]
async fn main() {
    let env = std::env::var("WARDEN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Warden v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: User store ───────────────────────────────────────
    let users: Arc<dyn UserRepository> = if config.database.url.is_empty() {
        tracing::warn!("No database URL configured, using the in-memory user store");
        Arc::new(MemoryUserRepository::new())
    } else {
        let db = DatabasePool::connect(&config.database).await?;
        db.migrate().await?;
        Arc::new(PgUserRepository::new(db.into_pool()))
    };

    // ── Step 2: Session store ────────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing session store");
    let cache = CacheManager::new(&config.cache).await?;

    // ── Step 3: Application state ────────────────────────────────
    let state = AppState::new(config, users, cache);
    let auth = &state.config.auth;
    if !auth.admin_password.is_empty()
        && state
            .user_service
            .ensure_admin(&auth.admin_username, &auth.admin_password)
            .await?
    {
        tracing::info!(username = %auth.admin_username, "Seeded startup admin account");
    }

    // ── Step 4: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(addr = %addr, "Warden listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.wait_for(|stop| *stop).await;
    });
    let mut handle = tokio::spawn(server.into_future());

    tokio::select! {
        joined = &mut handle => return flatten(joined),
        () = shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(true);
    match tokio::time::timeout(grace, handle).await {
        Ok(joined) => flatten(joined)?,
        Err(_) => tracing::warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out"),
    }

    tracing::info!("Warden stopped");
    Ok(())
}

fn flatten(joined: Result<std::io::Result<()>, tokio::task::JoinError>) -> Result<(), AppError> {
    match joined {
        Ok(result) => result.map_err(|e| AppError::internal(format!("Server failed: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
