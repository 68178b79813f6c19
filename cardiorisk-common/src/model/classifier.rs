//! Classifier artifacts
//!
//! Each variant reproduces the decision function of the exported model and
//! returns the raw class label as `f64`, the way the training library
//! reports it.

use serde::Deserialize;

use super::{Classifier, ModelError};

/// Exported classifier, tagged by `kind` in the JSON artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
        /// Labels for the negative and positive class
        #[serde(default = "default_classes")]
        classes: [f64; 2],
    },
    DecisionTree {
        nodes: Vec<TreeNode>,
    },
    RandomForest {
        trees: Vec<Vec<TreeNode>>,
    },
}

/// Node of a flattened decision tree; node 0 is the root
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

fn default_threshold() -> f64 {
    0.5
}

fn default_classes() -> [f64; 2] {
    [0.0, 1.0]
}

impl ClassifierArtifact {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::DecisionTree { .. } => "decision_tree",
            Self::RandomForest { .. } => "random_forest",
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn predict(&self, input: &[f64]) -> Result<f64, ModelError> {
        if input.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite);
        }

        match self {
            Self::LogisticRegression {
                coefficients,
                intercept,
                threshold,
                classes,
            } => {
                if coefficients.len() != input.len() {
                    return Err(ModelError::ShapeMismatch {
                        expected: coefficients.len(),
                        actual: input.len(),
                    });
                }
                let z: f64 = coefficients
                    .iter()
                    .zip(input)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + intercept;
                let probability = 1.0 / (1.0 + (-z).exp());
                Ok(if probability >= *threshold {
                    classes[1]
                } else {
                    classes[0]
                })
            }
            Self::DecisionTree { nodes } => walk_tree(nodes, input),
            Self::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ModelError::Malformed("random forest has no trees".to_string()));
                }
                let votes = trees
                    .iter()
                    .map(|tree| walk_tree(tree, input))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(majority_vote(&votes))
            }
        }
    }
}

fn walk_tree(nodes: &[TreeNode], input: &[f64]) -> Result<f64, ModelError> {
    let mut index = 0;
    // A well-formed tree reaches a leaf in fewer steps than it has nodes
    for _ in 0..nodes.len() {
        let node = nodes
            .get(index)
            .ok_or_else(|| ModelError::Malformed(format!("node index {} out of range", index)))?;
        match node {
            TreeNode::Leaf { value } => return Ok(*value),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let value = input.get(*feature).ok_or(ModelError::ShapeMismatch {
                    expected: feature + 1,
                    actual: input.len(),
                })?;
                index = if value <= threshold { *left } else { *right };
            }
        }
    }
    Err(ModelError::Malformed("decision tree contains a cycle or no leaf".to_string()))
}

/// Most frequent label; ties go to the smallest label
fn majority_vote(votes: &[f64]) -> f64 {
    let mut sorted = votes.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut best = sorted[0];
    let mut best_count = 0;
    let mut i = 0;
    while i < sorted.len() {
        let label = sorted[i];
        let count = sorted[i..].iter().take_while(|&&v| v == label).count();
        if count > best_count {
            best = label;
            best_count = count;
        }
        i += count;
    }
    best
}
