//! Classifier Variants
//!
//! A loaded model is either a continuous scorer thresholded at 0.5 or an
//! estimator that emits the class label directly. The branch is fixed at load
//! time; callers only see [`Classifier::classify`].

use crate::InferenceError;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores strictly above this are high risk
pub const SCORE_THRESHOLD: f64 = 0.5;

/// Runtime format of the loaded model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    /// Probability-like output, needs thresholding
    ContinuousScore,
    /// Output is already a class label
    DiscreteLabel,
}

impl ModelFormat {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFormat::ContinuousScore => "continuous_score",
            ModelFormat::DiscreteLabel => "discrete_label",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend producing a continuous score for a scaled feature vector
pub trait Scorer: Send + Sync {
    /// Positive-class score, usually in [0, 1]
    fn score(&self, features: &FeatureVector) -> Result<f64, InferenceError>;

    /// Backend name for diagnostics
    fn name(&self) -> &str {
        "scorer"
    }
}

/// Continuous-score model with its decision threshold
pub struct ScoreModel {
    scorer: Box<dyn Scorer>,
}

impl ScoreModel {
    /// Wrap a scoring backend
    pub fn new(scorer: impl Scorer + 'static) -> Self {
        Self {
            scorer: Box::new(scorer),
        }
    }

    /// Raw score
    pub fn score(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        self.scorer.score(features)
    }

    /// Thresholded label; a score of exactly 0.5 is not high risk
    pub fn classify(&self, features: &FeatureVector) -> Result<bool, InferenceError> {
        Ok(self.score(features)? > SCORE_THRESHOLD)
    }
}

impl fmt::Debug for ScoreModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreModel")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

/// Linear decision function, label 1 when `w·x + b > 0`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Signed distance to the decision boundary
    pub fn decision(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.values().iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

/// Node of a flattened decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Positive-class fraction at this leaf
    Leaf { value: f64 },
}

/// Single decision tree, root at index 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Leaf value reached by the features
    ///
    /// The walk is bounded by the node count, so a malformed tree built
    /// without [`LabelModel::validate`] errors instead of looping.
    pub fn evaluate(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let x = features.values();
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(&TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(feature).ok_or_else(|| {
                        InferenceError::InferenceFailed(format!(
                            "split on unknown feature {}",
                            feature
                        ))
                    })?;
                    idx = if *value <= threshold { left } else { right };
                }
                None => {
                    return Err(InferenceError::InferenceFailed(format!(
                        "tree node {} out of bounds ({} nodes)",
                        idx,
                        self.nodes.len()
                    )))
                }
            }
        }
        Err(InferenceError::InferenceFailed(
            "tree walk did not reach a leaf".to_string(),
        ))
    }

    /// Children must point forward so evaluation always terminates
    fn validate(&self, tree: usize) -> Result<(), InferenceError> {
        if self.nodes.is_empty() {
            return Err(invalid(format!("tree {} has no nodes", tree)));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                if feature >= FEATURE_DIMENSION {
                    return Err(invalid(format!(
                        "tree {} node {} splits on feature {} (only {} features)",
                        tree, idx, feature, FEATURE_DIMENSION
                    )));
                }
                for child in [left, right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(invalid(format!(
                            "tree {} node {} has invalid child {}",
                            tree, idx, child
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Averaged tree ensemble, label 1 when the mean leaf value is above 0.5
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    /// Mean positive-class fraction across trees
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        if self.trees.is_empty() {
            return Err(InferenceError::InferenceFailed(
                "ensemble has no trees".to_string(),
            ));
        }
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(features)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

/// Estimator whose prediction is already a class label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelModel {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl LabelModel {
    /// Check structure once, so prediction cannot fail later
    pub fn validate(&self) -> Result<(), InferenceError> {
        match self {
            LabelModel::Linear(model) => {
                if model.coefficients.len() != FEATURE_DIMENSION {
                    return Err(InferenceError::InvalidInputShape {
                        expected: format!("{} coefficients", FEATURE_DIMENSION),
                        actual: format!("{} coefficients", model.coefficients.len()),
                    });
                }
                Ok(())
            }
            LabelModel::TreeEnsemble(ensemble) => {
                if ensemble.trees.is_empty() {
                    return Err(invalid("ensemble has no trees".to_string()));
                }
                ensemble
                    .trees
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, tree)| tree.validate(i))
            }
        }
    }

    /// Predicted label, 1 meaning high risk
    pub fn predict(&self, features: &FeatureVector) -> Result<u8, InferenceError> {
        let positive = match self {
            LabelModel::Linear(model) => model.decision(features) > 0.0,
            LabelModel::TreeEnsemble(ensemble) => ensemble.probability(features)? > 0.5,
        };
        Ok(u8::from(positive))
    }
}

fn invalid(reason: String) -> InferenceError {
    InferenceError::ModelLoadError(format!("invalid tree ensemble: {}", reason))
}

/// Loaded classifier, resolved once at startup
#[derive(Debug)]
pub enum Classifier {
    ContinuousScore(ScoreModel),
    DiscreteLabel(LabelModel),
}

impl Classifier {
    /// Discrete-label classifier, structure checked up front
    pub fn discrete(model: LabelModel) -> Result<Self, InferenceError> {
        model.validate()?;
        Ok(Classifier::DiscreteLabel(model))
    }

    /// Whether the scaled features are classified high risk
    pub fn classify(&self, features: &FeatureVector) -> Result<bool, InferenceError> {
        match self {
            Classifier::ContinuousScore(model) => model.classify(features),
            Classifier::DiscreteLabel(model) => Ok(model.predict(features)? == 1),
        }
    }

    /// Runtime format tag
    pub fn format(&self) -> ModelFormat {
        match self {
            Classifier::ContinuousScore(_) => ModelFormat::ContinuousScore,
            Classifier::DiscreteLabel(_) => ModelFormat::DiscreteLabel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScore(f64);

    impl Scorer for FixedScore {
        fn score(&self, _: &FeatureVector) -> Result<f64, InferenceError> {
            Ok(self.0)
        }
    }

    fn zeros() -> FeatureVector {
        FeatureVector::new([0.0; FEATURE_DIMENSION])
    }

    #[test]
    fn test_threshold_is_strict() {
        let at = Classifier::ContinuousScore(ScoreModel::new(FixedScore(0.5)));
        let above = Classifier::ContinuousScore(ScoreModel::new(FixedScore(0.500001)));
        assert!(!at.classify(&zeros()).unwrap());
        assert!(above.classify(&zeros()).unwrap());
    }

    #[test]
    fn test_linear_decision() {
        let mut coefficients = vec![0.0; FEATURE_DIMENSION];
        coefficients[0] = 2.0;
        let model = LabelModel::Linear(LinearModel {
            coefficients,
            intercept: -1.0,
        });
        model.validate().unwrap();

        let mut x = [0.0; FEATURE_DIMENSION];
        assert_eq!(model.predict(&FeatureVector::new(x)).unwrap(), 0);
        x[0] = 0.5;
        // Exactly on the boundary stays negative
        assert_eq!(model.predict(&FeatureVector::new(x)).unwrap(), 0);
        x[0] = 0.6;
        assert_eq!(model.predict(&FeatureVector::new(x)).unwrap(), 1);
    }

    #[test]
    fn test_tree_ensemble_from_json() {
        let json = r#"{
            "kind": "tree_ensemble",
            "trees": [
                {"nodes": [
                    {"feature": 2, "threshold": 0.5, "left": 1, "right": 2},
                    {"value": 0.1},
                    {"value": 0.9}
                ]},
                {"nodes": [{"value": 0.6}]}
            ]
        }"#;
        let model: LabelModel = serde_json::from_str(json).unwrap();
        model.validate().unwrap();

        let mut x = [0.0; FEATURE_DIMENSION];
        // (0.1 + 0.6) / 2 = 0.35
        assert_eq!(model.predict(&FeatureVector::new(x)).unwrap(), 0);
        x[2] = 1.0;
        // (0.9 + 0.6) / 2 = 0.75
        assert_eq!(model.predict(&FeatureVector::new(x)).unwrap(), 1);
    }

    #[test]
    fn test_tree_rejects_backward_child() {
        let model = LabelModel::TreeEnsemble(TreeEnsemble {
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 0,
                        right: 1,
                    },
                    TreeNode::Leaf { value: 1.0 },
                ],
            }],
        });
        assert!(matches!(
            model.validate(),
            Err(InferenceError::ModelLoadError(_))
        ));
    }

    #[test]
    fn test_tree_rejects_unknown_feature() {
        let json = r#"{"kind":"tree_ensemble","trees":[{"nodes":[
            {"feature": 13, "threshold": 0.0, "left": 1, "right": 2},
            {"value": 0.0}, {"value": 1.0}]}]}"#;
        let model: LabelModel = serde_json::from_str(json).unwrap();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_linear_wrong_length() {
        let model = LabelModel::Linear(LinearModel {
            coefficients: vec![1.0; 4],
            intercept: 0.0,
        });
        assert!(matches!(
            model.validate(),
            Err(InferenceError::InvalidInputShape { .. })
        ));
    }

    fn single_tree(nodes: Vec<TreeNode>) -> LabelModel {
        LabelModel::TreeEnsemble(TreeEnsemble {
            trees: vec![DecisionTree { nodes }],
        })
    }

    #[test]
    fn test_self_loop_errors_instead_of_hanging() {
        let model = single_tree(vec![
            TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 1,
            },
            TreeNode::Leaf { value: 1.0 },
        ]);
        // x[0] = 0 keeps taking the left edge back to the root
        let classifier = Classifier::DiscreteLabel(model.clone());
        assert!(matches!(
            classifier.classify(&zeros()),
            Err(InferenceError::InferenceFailed(_))
        ));
        assert!(Classifier::discrete(model).is_err());
    }

    #[test]
    fn test_out_of_range_child_errors() {
        let model = single_tree(vec![
            TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 7,
                right: 1,
            },
            TreeNode::Leaf { value: 1.0 },
        ]);
        let classifier = Classifier::DiscreteLabel(model.clone());
        assert!(matches!(
            classifier.classify(&zeros()),
            Err(InferenceError::InferenceFailed(_))
        ));
        assert!(matches!(
            Classifier::discrete(model),
            Err(InferenceError::ModelLoadError(_))
        ));
    }

    #[test]
    fn test_discrete_constructor_checks_linear_length() {
        let model = LabelModel::Linear(LinearModel {
            coefficients: vec![1.0; 4],
            intercept: 0.0,
        });
        assert!(Classifier::discrete(model).is_err());
    }

    #[test]
    fn test_format_tags() {
        let continuous = Classifier::ContinuousScore(ScoreModel::new(FixedScore(0.7)));
        assert_eq!(continuous.format(), ModelFormat::ContinuousScore);
        assert_eq!(continuous.format().to_string(), "continuous_score");
    }
}
