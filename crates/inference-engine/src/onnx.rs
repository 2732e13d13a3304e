//! ONNX Scoring Backend
//!
//! Runs the exported neural network with tract on a single `[1, 13]` row.

use crate::classifier::Scorer;
use crate::InferenceError;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use std::path::{Path, PathBuf};
use tract_onnx::prelude::*;
use tracing::info;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Continuous scorer backed by an optimized tract plan
#[derive(Debug)]
pub struct OnnxScorer {
    plan: OnnxPlan,
    path: PathBuf,
}

impl OnnxScorer {
    /// Load and optimize the model at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, FEATURE_DIMENSION]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                InferenceError::ModelLoadError(format!("{}: {:#}", path.display(), e))
            })?;

        Ok(Self {
            plan,
            path: path.to_path_buf(),
        })
    }

    /// Model path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Scorer for OnnxScorer {
    fn score(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let input: Tensor =
            tract_ndarray::Array2::from_shape_vec((1, FEATURE_DIMENSION), features.to_f32())
                .map_err(|e| InferenceError::InvalidInputShape {
                    expected: format!("[1, {}]", FEATURE_DIMENSION),
                    actual: e.to_string(),
                })?
                .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(format!("{:#}", e)))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no outputs".into()))?;
        let values: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(format!("{:#}", e)))?
            .iter()
            .copied()
            .collect();

        // Sigmoid head yields one value; a softmax head yields [p0, p1].
        match values.as_slice() {
            [score] | [_, score] => Ok(f64::from(*score)),
            other => Err(InferenceError::InferenceFailed(format!(
                "expected 1 or 2 output values, got {}",
                other.len()
            ))),
        }
    }

    fn name(&self) -> &str {
        "onnx"
    }
}
