//! Inference boundary
//!
//! Turns untrusted form fields into a [`FeatureVector`], runs the imputer and
//! classifier, and maps the raw class output to a [`RiskLabel`]. Every failure
//! comes back as an [`InferenceError`]; nothing here panics on user input.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_SPEC};
use crate::model::{ModelError, ModelState};

/// Value used for a field that was not submitted at all
const ABSENT_FIELD_VALUE: f64 = 0.0;

/// Raw class output that means "high risk"
const HIGH_RISK_CLASS: f64 = 1.0;

/// Binary risk classification shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    HighRisk,
    LowRisk,
}

impl RiskLabel {
    /// Map the classifier's raw output to a label
    ///
    /// Only an exact `1` is high risk. Any other value, including ones a
    /// binary model should never produce, is reported as low risk.
    pub fn from_raw_output(raw: f64) -> Self {
        if raw == HIGH_RISK_CLASS {
            Self::HighRisk
        } else {
            Self::LowRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk of Myocardial Infarction",
            Self::LowRisk => "Low Risk of Myocardial Infarction",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a prediction request could not produce a label
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Artifacts were not loaded at startup
    #[error("Model or imputer file not found!")]
    ModelUnavailable,

    /// A submitted value is not a number
    #[error("could not convert {field} value to float: '{value}'")]
    InvalidFeatureValue { field: &'static str, value: String },

    /// The imputer or classifier rejected the vector
    #[error("inference failed: {0}")]
    InferenceFailure(#[from] ModelError),
}

impl InferenceError {
    /// Stable machine-readable code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModelUnavailable => "MODEL_UNAVAILABLE",
            Self::InvalidFeatureValue { .. } => "INVALID_FEATURE_VALUE",
            Self::InferenceFailure(_) => "INFERENCE_FAILURE",
        }
    }
}

/// Validates raw fields and runs the loaded model
///
/// Holds only the immutable [`ModelState`] built at startup, so a single
/// instance is shared by every request without locking.
#[derive(Debug, Clone)]
pub struct InferenceBoundary {
    model: ModelState,
}

impl InferenceBoundary {
    pub fn new(model: ModelState) -> Self {
        Self { model }
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    /// Run one prediction over raw form fields
    pub fn predict(&self, raw_fields: &HashMap<String, String>) -> Result<RiskLabel, InferenceError> {
        let artifacts = self
            .model
            .artifacts()
            .ok_or(InferenceError::ModelUnavailable)?;

        let features = assemble_features(raw_fields)?;

        let imputed = artifacts.imputer().transform(features.as_slice())?;
        if imputed.len() != FEATURE_COUNT {
            return Err(ModelError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: imputed.len(),
            }
            .into());
        }

        let raw = artifacts.classifier().predict(&imputed)?;
        let label = RiskLabel::from_raw_output(raw);
        debug!("Prediction raw output {} -> {}", raw, label);

        Ok(label)
    }
}

/// Coerce raw fields into a vector in `FEATURE_SPEC` order
///
/// Absent fields become `0.0`. Present fields are trimmed and parsed as
/// `f64`; `nan` is accepted and left for the imputer. Unknown field names are
/// ignored.
pub fn assemble_features(raw_fields: &HashMap<String, String>) -> Result<FeatureVector, InferenceError> {
    let mut values = [ABSENT_FIELD_VALUE; FEATURE_COUNT];

    for (slot, feature) in values.iter_mut().zip(FEATURE_SPEC.iter()) {
        if let Some(raw) = raw_fields.get(feature.name) {
            *slot = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| InferenceError::InvalidFeatureValue {
                    field: feature.name,
                    value: raw.clone(),
                })?;
        }
    }

    Ok(FeatureVector::new(values))
}
