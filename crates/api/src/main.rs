//! API server entry point.

use std::sync::Arc;

use api::config::Config;
use catalog::PostgresCatalog;
use order_store::PostgresOrderStore;
use publisher::{DisabledPublisher, EventPublisher, RedisPublisher};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use workflow::OrderWorkflow;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Connect to the database and run migrations
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let store = PostgresOrderStore::new(pool.clone());
    store.run_migrations().await.expect("migration failed");
    let catalog = PostgresCatalog::new(pool);

    // 4. Select the event publisher from configuration
    let publisher: Arc<dyn EventPublisher> = match config.event_channel() {
        Some((url, channel)) => {
            tracing::info!(%channel, "event publishing enabled");
            Arc::new(
                RedisPublisher::new(url, channel).expect("failed to create event publisher"),
            )
        }
        None => {
            tracing::info!("event publishing disabled");
            Arc::new(DisabledPublisher)
        }
    };

    // 5. Build the application
    let workflow = OrderWorkflow::new(catalog, store, publisher);
    let state = Arc::new(api::AppState { workflow });
    let app = api::create_app(state, metrics_handle);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
