//! Feature schema endpoint

use axum::{routing::get, Json, Router};
use cardiorisk_common::FEATURE_SPEC;
use serde::Serialize;

use crate::AppState;

/// One schema entry with its position in the model input
#[derive(Debug, Serialize)]
pub struct FeatureEntry {
    pub position: usize,
    pub name: &'static str,
    pub valid_range: &'static str,
    pub description: &'static str,
}

/// Build schema routes
pub fn schema_routes() -> Router<AppState> {
    Router::new().route("/api/features", get(get_features))
}

/// GET /api/features
pub async fn get_features() -> Json<Vec<FeatureEntry>> {
    Json(
        FEATURE_SPEC
            .iter()
            .enumerate()
            .map(|(position, f)| FeatureEntry {
                position,
                name: f.name,
                valid_range: f.valid_range,
                description: f.description,
            })
            .collect(),
    )
}
