//! Prediction Context
//!
//! Holds the immutable scaler and classifier loaded at startup and turns a
//! patient record into a risk label.

use crate::classifier::{Classifier, ModelFormat};
use crate::InferenceError;
use feature_engine::{FeatureVector, PatientRecord, StandardScaler};
use serde::{Deserialize, Serialize};

/// Risk outcome of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    /// Model predicts the positive class
    HighRisk,
    /// Model predicts the negative class
    NoRisk,
}

impl RiskLabel {
    /// Map a classifier decision to a label
    pub fn from_high_risk(high_risk: bool) -> Self {
        if high_risk {
            RiskLabel::HighRisk
        } else {
            RiskLabel::NoRisk
        }
    }

    /// Text shown to the user
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::HighRisk => "High risk of heart attack",
            RiskLabel::NoRisk => "No risk detected",
        }
    }

    /// Short metric label
    pub fn metric_label(&self) -> &'static str {
        match self {
            RiskLabel::HighRisk => "high_risk",
            RiskLabel::NoRisk => "no_risk",
        }
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self, RiskLabel::HighRisk)
    }
}

/// Loaded scaler and classifier, read-only for the process lifetime
#[derive(Debug)]
pub struct PredictionContext {
    scaler: StandardScaler,
    classifier: Classifier,
}

impl PredictionContext {
    /// Bundle already-loaded state
    pub fn new(scaler: StandardScaler, classifier: Classifier) -> Self {
        Self { scaler, classifier }
    }

    /// Scale the record, classify, and map to a label
    pub fn predict(&self, record: &PatientRecord) -> Result<RiskLabel, InferenceError> {
        self.predict_features(&record.to_features())
    }

    /// Same as [`predict`](Self::predict) for a raw feature vector
    pub fn predict_features(&self, features: &FeatureVector) -> Result<RiskLabel, InferenceError> {
        let scaled = self.scaler.transform(features);
        let high_risk = self.classifier.classify(&scaled)?;
        Ok(RiskLabel::from_high_risk(high_risk))
    }

    /// Format of the loaded classifier
    pub fn model_format(&self) -> ModelFormat {
        self.classifier.format()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }
}
