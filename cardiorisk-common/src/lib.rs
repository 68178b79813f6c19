//! # cardiorisk common library
//!
//! Shared code for the myocardial infarction risk service:
//! - Clinical feature schema (`FEATURE_SPEC`) and fixed-order feature vectors
//! - Model capability traits and the JSON artifact backends
//! - The inference boundary turning raw form fields into a risk label
//! - Bootstrap configuration loading

pub mod config;
pub mod error;
pub mod features;
pub mod inference;
pub mod model;

pub use error::{Error, Result};
pub use features::{FeatureInfo, FeatureVector, FEATURE_COUNT, FEATURE_SPEC};
pub use inference::{assemble_features, InferenceBoundary, InferenceError, RiskLabel};
pub use model::{Classifier, Imputer, ModelArtifacts, ModelError, ModelState};
