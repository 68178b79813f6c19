//! Model capabilities and artifact loading
//!
//! The trained model is opaque to this service. It is reached only through
//! two capabilities: [`Imputer::transform`] and [`Classifier::predict`].
//! Concrete backends live in the submodules; tests substitute stubs.

pub mod classifier;
pub mod imputer;

pub use classifier::ClassifierArtifact;
pub use imputer::{ImputeStrategy, SimpleImputer};

use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::{Error, Result};

/// Failure raised by a model backend while processing one vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Input length does not match what the artifact was trained on
    #[error("expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Artifact content is internally inconsistent
    #[error("malformed artifact: {0}")]
    Malformed(String),

    /// A NaN or infinite value reached a step that cannot handle it
    #[error("input contains NaN or infinite values")]
    NonFinite,
}

/// Missing-value transform applied before prediction
pub trait Imputer: Send + Sync {
    fn transform(&self, input: &[f64]) -> std::result::Result<Vec<f64>, ModelError>;
}

/// Maps an imputed feature vector to a raw class output
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &[f64]) -> std::result::Result<f64, ModelError>;
}

/// Imputer and classifier pair, loaded once and shared read-only
#[derive(Clone)]
pub struct ModelArtifacts {
    imputer: Arc<dyn Imputer>,
    classifier: Arc<dyn Classifier>,
}

impl ModelArtifacts {
    pub fn new(imputer: Arc<dyn Imputer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            imputer,
            classifier,
        }
    }

    /// Load both JSON artifacts from disk
    pub fn load(imputer_path: &Path, model_path: &Path) -> Result<Self> {
        let imputer: SimpleImputer = read_artifact(imputer_path)?;
        let classifier: ClassifierArtifact = read_artifact(model_path)?;

        info!(
            "Loaded imputer ({} strategy, {} columns) from {}",
            imputer.strategy(),
            imputer.n_features(),
            imputer_path.display()
        );
        info!(
            "Loaded {} classifier from {}",
            classifier.kind_name(),
            model_path.display()
        );

        Ok(Self::new(Arc::new(imputer), Arc::new(classifier)))
    }

    pub fn imputer(&self) -> &dyn Imputer {
        self.imputer.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

impl fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifacts").finish_non_exhaustive()
    }
}

/// Outcome of the one-time artifact load at startup
#[derive(Debug, Clone)]
pub enum ModelState {
    Ready(ModelArtifacts),
    Unavailable { reason: String },
}

impl ModelState {
    /// Load artifacts, absorbing any failure into `Unavailable`
    ///
    /// Never fails: a missing or unreadable artifact degrades inference for
    /// the process lifetime but must not prevent the form from being served.
    pub fn load(imputer_path: &Path, model_path: &Path) -> Self {
        let missing: Vec<&Path> = [imputer_path, model_path]
            .into_iter()
            .filter(|p| !p.exists())
            .collect();

        if !missing.is_empty() {
            let list = missing
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            warn!("Model artifact file(s) not found: {}", list);
            warn!("Inference disabled until restart");
            return Self::Unavailable {
                reason: format!("artifact file(s) not found: {}", list),
            };
        }

        match ModelArtifacts::load(imputer_path, model_path) {
            Ok(artifacts) => Self::Ready(artifacts),
            Err(e) => {
                warn!("Failed to load model artifacts: {}", e);
                warn!("Inference disabled until restart");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn artifacts(&self) -> Option<&ModelArtifacts> {
        match self {
            Self::Ready(artifacts) => Some(artifacts),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Why inference is disabled, if it is
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let artifact_error = |message: String| Error::Artifact {
        path: PathBuf::from(path),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| artifact_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| artifact_error(e.to_string()))
}
