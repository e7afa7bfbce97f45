//! Heart Risk Server
//!
//! Scores heart-disease risk from a clinical record with a pre-trained
//! classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    HEART RISK SERVER                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌─────────────┐   ┌──────────────────┐  │
//! │  │  API      │   │  Feature    │   │  Inference       │  │
//! │  │  (Axum)   │──▶│  Encoder    │──▶│  scaler + model  │  │
//! │  └───────────┘   └──────┬──────┘   └────────┬─────────┘  │
//! │                         └─────────┬─────────┘            │
//! │                                   ▼                      │
//! │                        ┌────────────────────┐            │
//! │                        │ ModelContext (Arc) │            │
//! │                        │ loaded at startup  │            │
//! │                        └────────────────────┘            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};
pub use logic::ModelContext;

use config::{Config, LogFormat};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ModelContext>,
    pub config: Config,
}

/// Install the global tracing subscriber
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "heart_risk=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/model", get(handlers::model::info))
        .route("/api/v1/form", get(handlers::model::form))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
