//! Feature Engineering Engine
//!
//! Field schema, feature vector assembly, and fitted standardization for the
//! heart risk model.

mod features;
mod scaler;
pub mod schema;

pub use features::{FeatureVector, PatientRecord};
pub use scaler::{ScalerParams, StandardScaler};
pub use schema::{FieldKind, FieldSpec, FEATURE_DIMENSION, FIELDS};

use thiserror::Error;

/// Errors loading or applying the scaler
#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("Failed to read scaler artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed scaler artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Scaler {field} has {actual} entries, expected {expected}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Scaler fitted on features [{actual}], expected [{expected}]")]
    FeatureOrder { expected: String, actual: String },
    #[error("Scaler parameter at index {index} is not finite")]
    NonFinite { index: usize },
}
