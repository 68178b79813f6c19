//! Integration tests for cardiorisk-web HTTP endpoints
//!
//! Tests cover:
//! - GET / renders the form with or without a model
//! - POST /predict end-to-end with stub imputer/classifier
//! - Diagnostics (HTTP 200 JSON) for unavailable model, invalid values,
//!   and malformed bodies
//! - Health, build info and feature schema endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use cardiorisk_common::{Classifier, Imputer, ModelArtifacts, ModelError, ModelState};
use cardiorisk_web::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

const SCENARIO_BODY: &str = "AGE=55&SEX=1&SIM_GIPERT=1&STENOK_AN=0&FK_STENOK=0&IBS_POST=1&IBS_NASL=0\
&K_BLOOD=4.2&L_BLOOD=6.5&ROE=15&S_AD_KBRIG=140&D_AD_KBRIG=90&GIPO_K=0&CHOL=5.5";

struct IdentityImputer;

impl Imputer for IdentityImputer {
    fn transform(&self, input: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(input.to_vec())
    }
}

struct FixedClassifier(f64);

impl Classifier for FixedClassifier {
    fn predict(&self, _input: &[f64]) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

/// Classifier that answers 1 only for a 55 year old, to check field routing
struct AgeClassifier;

impl Classifier for AgeClassifier {
    fn predict(&self, input: &[f64]) -> Result<f64, ModelError> {
        Ok(if input[0] == 55.0 { 1.0 } else { 0.0 })
    }
}

/// Test helper: app with stub artifacts
fn app_with(classifier: Arc<dyn Classifier>) -> Router {
    let artifacts = ModelArtifacts::new(Arc::new(IdentityImputer), classifier);
    build_router(AppState::new(ModelState::Ready(artifacts)))
}

/// Test helper: app started with artifact files that do not exist
fn app_without_model() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let state = ModelState::load(
        &dir.path().join("imputer.json"),
        &dir.path().join("myocardial_model.json"),
    );
    (build_router(AppState::new(state)), dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

async fn body_json(body: Body) -> Value {
    serde_json::from_str(&body_text(body).await).expect("Should parse JSON")
}

fn content_type(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// =============================================================================
// Form page
// =============================================================================

#[tokio::test]
async fn test_form_page_lists_features() {
    let app = app_with(Arc::new(FixedClassifier(0.0)));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).contains("text/html"));

    let html = body_text(response.into_body()).await;
    assert!(html.contains("action=\"/predict\""));
    assert!(html.contains("name=\"S_AD_KBRIG\""));
    assert!(html.contains("Erythrocyte Sedimentation Rate"));
}

#[tokio::test]
async fn test_form_page_served_without_model() {
    let (app, _dir) = app_without_model();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("name=\"CHOL\""));
}

// =============================================================================
// Prediction
// =============================================================================

#[tokio::test]
async fn test_predict_high_risk_scenario() {
    let app = app_with(Arc::new(FixedClassifier(1.0)));

    let response = app.oneshot(post_form(SCENARIO_BODY)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).contains("text/html"));

    let html = body_text(response.into_body()).await;
    assert!(html.contains("High Risk of Myocardial Infarction"));
}

#[tokio::test]
async fn test_predict_low_risk_scenario() {
    let app = app_with(Arc::new(FixedClassifier(0.0)));

    let response = app.oneshot(post_form(SCENARIO_BODY)).await.unwrap();
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Low Risk of Myocardial Infarction"));
}

#[tokio::test]
async fn test_predict_empty_body_uses_zeros() {
    let app = app_with(Arc::new(AgeClassifier));

    let response = app.oneshot(post_form("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("Low Risk of Myocardial Infarction"));
}

#[tokio::test]
async fn test_predict_field_order_in_body_does_not_matter() {
    let app = app_with(Arc::new(AgeClassifier));

    let response = app
        .oneshot(post_form("CHOL=5.5&ROE=15&SEX=1&AGE=55"))
        .await
        .unwrap();
    let html = body_text(response.into_body()).await;
    assert!(html.contains("High Risk of Myocardial Infarction"));
}

#[tokio::test]
async fn test_predict_repeated_field_keeps_first_value() {
    let app = app_with(Arc::new(AgeClassifier));

    let response = app.oneshot(post_form("AGE=55&AGE=30")).await.unwrap();
    let html = body_text(response.into_body()).await;
    assert!(html.contains("High Risk of Myocardial Infarction"));
}

#[tokio::test]
async fn test_predict_invalid_value_diagnostic() {
    let app = app_with(Arc::new(FixedClassifier(1.0)));

    let response = app
        .oneshot(post_form("AGE=fifty-five&SEX=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).contains("application/json"));

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INVALID_FEATURE_VALUE");
    assert!(body["error"]["message"].as_str().unwrap().contains("AGE"));
}

#[tokio::test]
async fn test_predict_without_model_diagnostic() {
    let (app, _dir) = app_without_model();

    let response = app.oneshot(post_form(SCENARIO_BODY)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");
    assert_eq!(body["error"]["message"], "Model or imputer file not found!");
}

#[tokio::test]
async fn test_predict_without_model_ignores_malformed_body() {
    let (app, _dir) = app_without_model();

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");
}

#[tokio::test]
async fn test_predict_wrong_content_type_diagnostic() {
    let app = app_with(Arc::new(FixedClassifier(1.0)));

    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("AGE=55"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_predict_model_failure_diagnostic() {
    struct BrokenClassifier;

    impl Classifier for BrokenClassifier {
        fn predict(&self, input: &[f64]) -> Result<f64, ModelError> {
            Err(ModelError::ShapeMismatch {
                expected: 20,
                actual: input.len(),
            })
        }
    }

    let app = app_with(Arc::new(BrokenClassifier));

    let response = app.oneshot(post_form(SCENARIO_BODY)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INFERENCE_FAILURE");
}

// =============================================================================
// Health, build info, schema
// =============================================================================

#[tokio::test]
async fn test_health_ok_with_model() {
    let app = app_with(Arc::new(FixedClassifier(0.0)));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "cardiorisk-web");
    assert_eq!(body["model_available"], true);
    assert!(body.get("model_error").is_none());
    assert!(body["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_health_degraded_without_model() {
    let (app, _dir) = app_without_model();

    let response = app.oneshot(get("/health")).await.unwrap();
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["model_available"], false);
    assert!(body["model_error"]
        .as_str()
        .unwrap()
        .contains("myocardial_model.json"));
}

#[tokio::test]
async fn test_build_info() {
    let app = app_with(Arc::new(FixedClassifier(0.0)));

    let response = app.oneshot(get("/api/buildinfo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
    assert!(body["build_timestamp"].is_string());
}

#[tokio::test]
async fn test_feature_schema() {
    let app = app_with(Arc::new(FixedClassifier(0.0)));

    let response = app.oneshot(get("/api/features")).await.unwrap();
    let body = body_json(response.into_body()).await;

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 14);
    assert_eq!(entries[0]["name"], "AGE");
    assert_eq!(entries[13]["name"], "CHOL");
    assert_eq!(entries[7]["valid_range"], "3.5 - 5.5 (mmol/L)");
    assert_eq!(entries[13]["position"], 13);
}
