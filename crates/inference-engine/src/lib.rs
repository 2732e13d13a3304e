//! Heart Risk Inference Engine
//!
//! Loads the fitted scaler and the classifier at startup and maps a patient
//! record to a risk label. ONNX models run on tract.

mod classifier;
mod engine;
mod loader;
mod onnx;

pub use classifier::{
    Classifier, DecisionTree, LabelModel, LinearModel, ModelFormat, ScoreModel, Scorer,
    TreeEnsemble, TreeNode, SCORE_THRESHOLD,
};
pub use engine::{PredictionContext, RiskLabel};
pub use loader::{
    ArtifactPaths, ModelLoader, DEFAULT_CONTINUOUS_MODEL_FILE, DEFAULT_DISCRETE_MODEL_FILE,
    DEFAULT_MODELS_DIR, DEFAULT_SCALER_FILE,
};
pub use onnx::OnnxScorer;

use feature_engine::ScalerError;
use thiserror::Error;

/// Errors during artifact loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Required {artifact} artifact not found at {path}")]
    ArtifactMissing { artifact: &'static str, path: String },
    #[error("No model found; looked for {candidates}")]
    NoModelFound { candidates: String },
    #[error(transparent)]
    Scaler(#[from] ScalerError),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
}
