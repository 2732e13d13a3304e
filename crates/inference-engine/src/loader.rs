//! Artifact Loader
//!
//! Resolves the scaler and classifier artifacts at startup. The continuous
//! model file wins over the discrete one; whichever is found first fixes the
//! model format. Any failure here is fatal to startup.

use crate::classifier::{Classifier, LabelModel, ModelFormat, ScoreModel};
use crate::engine::PredictionContext;
use crate::onnx::OnnxScorer;
use crate::InferenceError;
use feature_engine::StandardScaler;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default artifact directory
pub const DEFAULT_MODELS_DIR: &str = "saved_models";
/// Default scaler file name
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
/// Default continuous-score model file name
pub const DEFAULT_CONTINUOUS_MODEL_FILE: &str = "best_model.onnx";
/// Default discrete-label model file name
pub const DEFAULT_DISCRETE_MODEL_FILE: &str = "best_model.json";

/// Locations of the startup artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    /// Fitted scaler parameters (required)
    pub scaler: PathBuf,
    /// Continuous-score model, checked first
    pub continuous_model: PathBuf,
    /// Discrete-label model, checked second
    pub discrete_model: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            scaler: dir.join(DEFAULT_SCALER_FILE),
            continuous_model: dir.join(DEFAULT_CONTINUOUS_MODEL_FILE),
            discrete_model: dir.join(DEFAULT_DISCRETE_MODEL_FILE),
        }
    }

    /// Candidate classifier paths in priority order
    pub fn model_candidates(&self) -> [(ModelFormat, &Path); 2] {
        [
            (ModelFormat::ContinuousScore, self.continuous_model.as_path()),
            (ModelFormat::DiscreteLabel, self.discrete_model.as_path()),
        ]
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_MODELS_DIR)
    }
}

/// Loader for the scaler and classifier
pub struct ModelLoader {
    paths: ArtifactPaths,
}

impl ModelLoader {
    /// Create a loader for the given artifact locations
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    /// Artifact locations
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Load the scaler; absence is an error
    pub fn load_scaler(&self) -> Result<StandardScaler, InferenceError> {
        let path = &self.paths.scaler;
        if !path.exists() {
            return Err(InferenceError::ArtifactMissing {
                artifact: "scaler",
                path: path.display().to_string(),
            });
        }
        let scaler = StandardScaler::load(path)?;
        info!("Scaler loaded from {}", path.display());
        Ok(scaler)
    }

    /// First existing classifier file and the format it implies
    pub fn resolve_model(&self) -> Result<(ModelFormat, PathBuf), InferenceError> {
        for (format, path) in self.paths.model_candidates() {
            if path.exists() {
                debug!("Found {} model at {}", format, path.display());
                return Ok((format, path.to_path_buf()));
            }
            debug!("No model at {}", path.display());
        }

        Err(InferenceError::NoModelFound {
            candidates: self
                .paths
                .model_candidates()
                .iter()
                .map(|(_, p)| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Load the highest-priority classifier; never falls through on a bad file
    pub fn load_classifier(&self) -> Result<Classifier, InferenceError> {
        let (format, path) = self.resolve_model()?;

        let classifier = match format {
            ModelFormat::ContinuousScore => {
                Classifier::ContinuousScore(ScoreModel::new(OnnxScorer::load(&path)?))
            }
            ModelFormat::DiscreteLabel => Classifier::discrete(load_label_model(&path)?)?,
        };

        info!("Classifier loaded from {} (format={})", path.display(), format);
        Ok(classifier)
    }

    /// Scaler first, then classifier
    pub fn load(&self) -> Result<PredictionContext, InferenceError> {
        let scaler = self.load_scaler()?;
        let classifier = self.load_classifier()?;
        Ok(PredictionContext::new(scaler, classifier))
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new(ArtifactPaths::default())
    }
}

fn load_label_model(path: &Path) -> Result<LabelModel, InferenceError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))
}
