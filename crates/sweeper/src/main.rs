//! Standalone expired-lock sweeper.
//!
//! Deployment vehicle for the periodic slot-lock cleanup in environments
//! that prefer a dedicated process over an in-server background task.
//! Connects, migrates, then runs the sweep loop until SIGINT/SIGTERM.

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookline_sweeper=info,bookline_availability=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = bookline_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    bookline_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    bookline_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let cancel = CancellationToken::new();
    let sweep = tokio::spawn(bookline_availability::sweep::run(pool, cancel.clone()));

    shutdown_signal().await;
    cancel.cancel();
    let _ = sweep.await;
    tracing::info!("Sweeper shut down");
}

/// Wait for SIGINT or SIGTERM so the process shuts down cleanly whether
/// stopped interactively or by a process manager (systemd, Docker,
/// Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
