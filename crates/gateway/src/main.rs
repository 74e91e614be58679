//! Tarjuman API Gateway
//!
//! The entry point for all external API requests.
//! Handles:
//! - The translation proxy endpoint
//! - Document and translation records
//! - Rate limiting
//! - Observability (logging, metrics)

mod handlers;
mod middleware;

#[cfg(test)]
mod test_support;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tarjuman_common::{
    config::{AppConfig, ObservabilityConfig, StoreConfig},
    db::{DocumentStore, InMemoryStore, SampleData},
    errors::{AppError, Result},
    metrics::{self, METRICS_PREFIX, TRANSLATION_BUCKETS},
    translator::{self, Translator},
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnFailure, TraceLayer},
};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub translator: Arc<dyn Translator>,
    pub metrics: Option<PrometheusHandle>,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting Tarjuman API Gateway v{}",
        tarjuman_common::VERSION
    );

    // Initialize metrics
    let metrics_handle = if config.observability.metrics_enabled {
        Some(install_metrics_recorder()?)
    } else {
        None
    };

    let translator = translator::create_translator(&config.translation).map_err(|e| {
        tracing::error!(error = %e, "Failed to create translation provider");
        e
    })?;
    info!(model = translator.model_name(), "Translation provider ready");

    let store = build_store(&config.store).await?;
    let (documents, translations) = store.counts().await;
    info!(documents, translations, "Document store initialized");

    // Create app state
    let state = AppState {
        config: config.clone(),
        store: Arc::new(store),
        translator,
        metrics: metrics_handle,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let host: IpAddr = config.server.host.parse().map_err(|e| AppError::Configuration {
        message: format!("Invalid server.host {}: {}", config.server.host, e),
    })?;
    let addr = SocketAddr::new(host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn install_metrics_recorder() -> Result<PrometheusHandle> {
    metrics::register_metrics();

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(format!("{}_translation_duration_seconds", METRICS_PREFIX)),
            TRANSLATION_BUCKETS,
        )
        .and_then(|builder| builder.install_recorder())
        .map_err(|e| AppError::Configuration {
            message: format!("Failed to install metrics recorder: {}", e),
        })
}

/// Build the in-memory store, seeded per configuration
async fn build_store(config: &StoreConfig) -> Result<InMemoryStore> {
    if !config.seed {
        return Ok(InMemoryStore::new());
    }

    let data = match config.seed_path.as_deref() {
        Some(path) => {
            info!(path, "Loading seed data");
            SampleData::from_path(path).await?
        }
        None => SampleData::embedded()?,
    };

    Ok(InMemoryStore::with_data(data))
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let api_routes = Router::new()
        // Translation proxy
        .route("/translate", post(handlers::translate::translate))

        // Document endpoints
        .route(
            "/documents",
            get(handlers::documents::list_documents).post(handlers::documents::create_document),
        )
        .route("/documents/{id}", get(handlers::documents::get_document))
        .route("/documents/{id}/translate", post(handlers::documents::translate_document))

        // Translation record endpoints
        .route(
            "/documents/{id}/translations",
            get(handlers::translations::list_translations)
                .post(handlers::translations::create_translation),
        )
        .route("/translations/{id}", patch(handlers::translations::update_translation))

        // Catalogues
        .route("/languages", get(handlers::catalog::languages))
        .route("/document-types", get(handlers::catalog::document_types));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::health::metrics))
        .nest("/api", api_routes);

    if state.config.rate_limit.enabled {
        let limiter = middleware::rate_limit::create_rate_limiter(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        app = app.layer(axum::middleware::from_fn(move |request: axum::extract::Request, next: axum::middleware::Next| {
            middleware::rate_limit::rate_limit_middleware(request, next, limiter.clone())
        }));
    }

    app.layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        // AppError already logs failed responses at error level
        .layer(TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)))
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
