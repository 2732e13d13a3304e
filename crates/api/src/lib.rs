//! Heart Risk Prediction Server
//!
//! Serves the 13-field form and a JSON endpoint over the prediction context
//! loaded at startup.

use axum::{
    routing::{get, post},
    Router,
};
use data_validator::Validator;
use inference_engine::{InferenceError, ModelLoader, PredictionContext};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod page;
pub mod routes;

pub use self::config::{AppConfig, LogFormat, LoggingConfig};
pub use self::error::ApiError;

/// Application state shared across handlers, immutable after startup
pub struct AppState {
    /// Loaded scaler and classifier
    pub context: PredictionContext,
    /// Widget-level input checks
    pub validator: Validator,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        context: PredictionContext,
        validator: Validator,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            context,
            validator,
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Load artifacts and assemble state; must succeed before anything binds
pub fn build_state(
    config: &AppConfig,
    metrics: Option<PrometheusHandle>,
) -> Result<Arc<AppState>, InferenceError> {
    let paths = config.artifact_paths();
    info!(
        "Loading artifacts: scaler={}, models=[{}, {}]",
        paths.scaler.display(),
        paths.continuous_model.display(),
        paths.discrete_model.display()
    );

    let context = ModelLoader::new(paths).load()?;
    info!("Prediction context ready (format={})", context.model_format());

    let validator = Validator::new(config.validation.clone());
    Ok(Arc::new(AppState::new(context, validator, metrics)))
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::form::index))
        .route("/predict", post(routes::form::submit))
        .route("/api/v1/predict", post(routes::predictions::predict))
        .route("/api/v1/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Initialize logging; `RUST_LOG` overrides the configured level
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
}

/// Serve on an already-bound listener
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    axum::serve(listener, create_router(state)).await
}

/// Bind and run the server
pub async fn run_server(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Serving prediction form on http://{}", listener.local_addr()?);
    serve(listener, state).await
}
