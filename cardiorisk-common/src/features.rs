//! Clinical feature schema
//!
//! The order of `FEATURE_SPEC` is the positional contract with the trained
//! model: the imputer and classifier only ever see column indices, never
//! names.

use serde::Serialize;

/// Number of clinical inputs the model consumes
pub const FEATURE_COUNT: usize = 14;

/// One entry of the input schema shown on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    /// Form field name (also the column name used at training time)
    pub name: &'static str,
    /// Human-readable valid range, display only
    pub valid_range: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

impl FeatureInfo {
    const fn new(name: &'static str, valid_range: &'static str, description: &'static str) -> Self {
        Self {
            name,
            valid_range,
            description,
        }
    }
}

/// Fixed, ordered schema of the 14 clinical inputs
pub static FEATURE_SPEC: [FeatureInfo; FEATURE_COUNT] = [
    FeatureInfo::new("AGE", "18 - 100", "Patient's Age"),
    FeatureInfo::new("SEX", "0 = Female, 1 = Male", "Biological Sex"),
    FeatureInfo::new("SIM_GIPERT", "0 = No, 1 = Yes", "Hypertension History"),
    FeatureInfo::new("STENOK_AN", "0 = No, 1 = Yes", "History of Stenocardia"),
    FeatureInfo::new("FK_STENOK", "0 = No, 1 = Yes", "Family History of Stenocardia"),
    FeatureInfo::new("IBS_POST", "0 = No, 1 = Yes", "History of Past Myocardial Infarction"),
    FeatureInfo::new("IBS_NASL", "0 = No, 1 = Yes", "Ischemic Heart Disease"),
    FeatureInfo::new("K_BLOOD", "3.5 - 5.5 (mmol/L)", "Potassium in Blood"),
    FeatureInfo::new("L_BLOOD", "3.0 - 10.0 (10^9/L)", "Leukocytes in Blood"),
    FeatureInfo::new("ROE", "1 - 30 (mm/hr)", "Erythrocyte Sedimentation Rate"),
    FeatureInfo::new("S_AD_KBRIG", "90 - 180 (mmHg)", "Systolic Blood Pressure"),
    FeatureInfo::new("D_AD_KBRIG", "60 - 120 (mmHg)", "Diastolic Blood Pressure"),
    FeatureInfo::new("GIPO_K", "0 = No, 1 = Yes", "Hypokalemia (Low Potassium)"),
    FeatureInfo::new("CHOL", "3.0 - 8.0 (mmol/L)", "Cholesterol Level"),
];

/// Position of a feature in the schema, if the name is known
pub fn position_of(name: &str) -> Option<usize> {
    FEATURE_SPEC.iter().position(|f| f.name == name)
}

/// Ordered numeric inputs matching `FEATURE_SPEC` positions
///
/// The fixed-size array makes the length invariant a property of the type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Build from a slice, returning `None` unless it has exactly 14 values
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        <[f64; FEATURE_COUNT]>::try_from(values).ok().map(Self)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value for a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        position_of(name).map(|i| self.0[i])
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self([0.0; FEATURE_COUNT])
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
