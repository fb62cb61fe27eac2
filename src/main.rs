use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use class_roster::adapters::http::{app_router, RosterAppState};
use class_roster::adapters::{
    InMemoryClassSessionRepository, InMemoryEventBus, PostgresClassSessionRepository,
    TracingNotifier,
};
use class_roster::config::AppConfig;
use class_roster::ports::ClassSessionRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let repository = build_repository(&config).await?;

    let bus = Arc::new(InMemoryEventBus::new());
    spawn_feed_logger(&bus);

    let state = RosterAppState::new(
        repository,
        Arc::new(TracingNotifier::new()),
        bus,
        config.notifications.enabled,
    );
    let app = app_router(state, config.server.request_timeout());

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, environment = ?config.server.environment, "Class roster listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Class roster shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_repository(
    config: &AppConfig,
) -> Result<Arc<dyn ClassSessionRepository>, Box<dyn std::error::Error>> {
    let Some(url) = config.database.url() else {
        warn!("No database configured; rosters are kept in memory");
        return Ok(Arc::new(InMemoryClassSessionRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresClassSessionRepository::new(pool)))
}

/// Logs the roster change feed at debug level.
fn spawn_feed_logger(bus: &InMemoryEventBus) {
    let mut feed = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match feed.recv().await {
                Ok(event) => debug!(
                    event_type = %event.event_type,
                    class_session_id = %event.aggregate_id,
                    "Roster change"
                ),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Roster feed logger lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                warn!(error = %err, "Failed to install terminate handler");
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
}
