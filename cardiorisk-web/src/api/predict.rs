//! Prediction endpoint

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::post,
    Form, Router,
};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::render;
use crate::AppState;

/// Build prediction routes
pub fn predict_routes() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}

/// POST /predict
///
/// Accepts a form-encoded body with up to 14 clinical fields and renders the
/// risk label. Failures come back as a JSON diagnostic (HTTP 200).
pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> ApiResult<Html<String>> {
    let model_available = state.inference.model_state().is_available();

    let raw_fields = match form {
        Ok(Form(pairs)) => first_occurrences(pairs),
        // An unavailable model is reported ahead of a malformed body
        Err(_) if !model_available => HashMap::new(),
        Err(rejection) => {
            warn!("Rejected prediction request: {}", rejection);
            return Err(ApiError::InvalidRequest(rejection.body_text()));
        }
    };

    match state.inference.predict(&raw_fields) {
        Ok(label) => {
            info!("Prediction: {}", label);
            Ok(Html(render::render_result(label.as_str())))
        }
        Err(e) => {
            warn!("Prediction failed: {}", e);
            Err(e.into())
        }
    }
}

/// Collapse repeated field names, keeping the first submitted value
fn first_occurrences(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut fields = HashMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        fields.entry(name).or_insert(value);
    }
    fields
}
