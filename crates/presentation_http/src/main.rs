//! Route Optimizer HTTP Server

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{AccountService, RouteService};
use axum::http::{HeaderValue, Method, header};
use infrastructure::{
    AppConfig, Argon2PasswordHasher, NominatimGeocodingAdapter, OsrmRoutingAdapter, PageRenderer,
    SqliteAccountStore, SqliteDatabaseHealth, create_pool, init_logging,
};
use presentation_http::{
    AppState, DrainOutcome, SessionStore, create_router, run_with_drain_deadline,
    set_expose_internal_errors,
};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        geocoder = %config.geocoding.base_url,
        router = %config.routing.base_url,
        "Route Optimizer starting"
    );

    set_expose_internal_errors(config.expose_internal_errors());

    let pool = Arc::new(create_pool(&config.database).context("Failed to open database")?);

    let geocoder = NominatimGeocodingAdapter::from_config(&config.geocoding)?;
    let router = OsrmRoutingAdapter::from_config(&config.routing)?;
    let route_service = RouteService::new(Arc::new(geocoder), Arc::new(router))
        .with_call_timeout(config.resolver.call_timeout());

    let account_service = AccountService::new(
        Arc::new(SqliteAccountStore::new(Arc::clone(&pool))),
        Arc::new(Argon2PasswordHasher::new()),
    );

    let config = Arc::new(config);
    let state = AppState {
        route_service: Arc::new(route_service),
        account_service: Arc::new(account_service),
        sessions: Arc::new(SessionStore::new()),
        pages: PageRenderer::new()?,
        database: Arc::new(SqliteDatabaseHealth::new(pool)),
        config: Arc::clone(&config),
    };

    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Server listening");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (draining_tx, draining_rx) = oneshot::channel();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = draining_tx.send(());
    });

    match run_with_drain_deadline(server, draining_rx, shutdown_timeout).await? {
        DrainOutcome::Completed => info!("Server shutdown complete"),
        DrainOutcome::TimedOut => warn!("Server shutdown forced after timeout"),
    }
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
