//! cardiorisk-web library - HTTP surface of the risk form service
//!
//! Exposes the router and application state for the binary and for
//! integration tests.

pub mod api;
pub mod error;
pub mod render;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use cardiorisk_common::{InferenceBoundary, ModelState};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
///
/// Built once in `main`; nothing in it is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Validation and model invocation for `/predict`
    pub inference: Arc<InferenceBoundary>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(model: ModelState) -> Self {
        Self {
            inference: Arc::new(InferenceBoundary::new(model)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::predict_routes())
        .merge(api::schema_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
