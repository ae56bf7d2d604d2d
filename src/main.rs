use std::sync::Arc;

use anyhow::{Context, Result};
use tablesmith::{
    AddColumnsTranslator, AppConfig, AppState, CatalogExecutor, InMemoryTransformationStore,
    StatementExecutor, build_router,
    web::render::HtmlFormRenderer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_SCHEMA_SQL: &str = r#"
CREATE TABLE inventory (
    id INT NOT NULL,
    sku VARCHAR(32) NOT NULL,
    label VARCHAR(128),
    stock INT DEFAULT 0
);
CREATE TABLE suppliers (
    id INT NOT NULL,
    name VARCHAR(128) NOT NULL,
    contact TEXT
)
"#;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let executor = Arc::new(CatalogExecutor::new());
    let seed = config
        .seed_schema
        .clone()
        .unwrap_or_else(|| DEMO_SCHEMA_SQL.to_string());
    executor
        .execute_ddl(&config.seed_database, &seed)
        .await
        .context("failed to seed the schema catalog")?;
    info!(database = %config.seed_database, "schema catalog seeded");

    let transformations = Arc::new(InMemoryTransformationStore::new());
    let translator = AddColumnsTranslator::new(
        executor.clone(),
        transformations,
        config.browse_mime,
    );
    let state = AppState::new(translator, executor, Arc::new(HtmlFormRenderer));

    let app = build_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "tablesmith started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tablesmith=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
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
