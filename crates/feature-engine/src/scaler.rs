//! Standard Scaler
//!
//! Applies fitted per-feature standardization. Parameters are loaded once and
//! never refit.

use crate::features::FeatureVector;
use crate::schema::{feature_names, FEATURE_DIMENSION};
use crate::ScalerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// On-disk scaler parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature scale (standard deviation)
    pub scale: Vec<f64>,
    /// Feature names the scaler was fitted on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

/// Fitted standardization transform
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_DIMENSION],
    scale: [f64; FEATURE_DIMENSION],
}

impl StandardScaler {
    /// Build from fitted mean and scale
    pub fn new(
        mean: [f64; FEATURE_DIMENSION],
        scale: [f64; FEATURE_DIMENSION],
    ) -> Result<Self, ScalerError> {
        for (i, (&m, &s)) in mean.iter().zip(scale.iter()).enumerate() {
            if !m.is_finite() || !s.is_finite() {
                return Err(ScalerError::NonFinite { index: i });
            }
        }
        // Constant features were fitted with zero variance; leave them unscaled.
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Ok(Self { mean, scale })
    }

    /// Identity transform
    pub fn identity() -> Self {
        Self {
            mean: [0.0; FEATURE_DIMENSION],
            scale: [1.0; FEATURE_DIMENSION],
        }
    }

    /// Validate and convert on-disk parameters
    pub fn from_params(params: ScalerParams) -> Result<Self, ScalerError> {
        if let Some(names) = &params.feature_names {
            let expected: Vec<&str> = feature_names().collect();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(ScalerError::FeatureOrder {
                    expected: expected.join(","),
                    actual: names.join(","),
                });
            }
        }

        let mean = to_array("mean", params.mean)?;
        let scale = to_array("scale", params.scale)?;
        Self::new(mean, scale)
    }

    /// Load parameters from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScalerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ScalerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let params: ScalerParams = serde_json::from_str(&raw)?;
        debug!("Loaded scaler parameters from {}", path.display());
        Self::from_params(params)
    }

    /// Apply the transform to one row
    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let raw = features.values();
        let mut out = [0.0; FEATURE_DIMENSION];
        for i in 0..FEATURE_DIMENSION {
            out[i] = (raw[i] - self.mean[i]) / self.scale[i];
        }
        FeatureVector::new(out)
    }

    /// Fitted means
    pub fn mean(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.mean
    }

    /// Fitted scales, zeros replaced by one
    pub fn scale(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.scale
    }
}

fn to_array(field: &'static str, values: Vec<f64>) -> Result<[f64; FEATURE_DIMENSION], ScalerError> {
    let actual = values.len();
    values
        .try_into()
        .map_err(|_| ScalerError::DimensionMismatch {
            field,
            expected: FEATURE_DIMENSION,
            actual,
        })
}
