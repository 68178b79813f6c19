//! Column-wise constant imputer
//!
//! Equivalent of a fitted `SimpleImputer`: every missing entry in column `i`
//! is replaced by `statistics[i]`. The strategy is recorded for display only,
//! the statistics were computed at training time.

use serde::Deserialize;
use std::fmt;

use super::{Imputer, ModelError};

/// How the training process derived the fill values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    Mean,
    Median,
    MostFrequent,
    Constant,
}

impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::MostFrequent => "most_frequent",
            Self::Constant => "constant",
        };
        f.write_str(name)
    }
}

/// Fitted imputer artifact
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
    /// Sentinel marking a missing entry; `None` means NaN
    #[serde(default)]
    missing_value: Option<f64>,
    /// Per-column fill values
    statistics: Vec<f64>,
}

impl SimpleImputer {
    pub fn new(strategy: ImputeStrategy, missing_value: Option<f64>, statistics: Vec<f64>) -> Self {
        Self {
            strategy,
            missing_value,
            statistics,
        }
    }

    pub fn strategy(&self) -> ImputeStrategy {
        self.strategy
    }

    pub fn n_features(&self) -> usize {
        self.statistics.len()
    }

    fn is_missing(&self, value: f64) -> bool {
        match self.missing_value {
            Some(sentinel) => value == sentinel || value.is_nan(),
            None => value.is_nan(),
        }
    }
}

impl Imputer for SimpleImputer {
    fn transform(&self, input: &[f64]) -> Result<Vec<f64>, ModelError> {
        if input.len() != self.statistics.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.statistics.len(),
                actual: input.len(),
            });
        }

        Ok(input
            .iter()
            .zip(&self.statistics)
            .map(|(&value, &fill)| if self.is_missing(value) { fill } else { value })
            .collect())
    }
}
