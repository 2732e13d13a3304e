//! Patient Record and Feature Vector Assembly

use crate::schema::FEATURE_DIMENSION;
use serde::{Deserialize, Serialize};

/// One form submission, keyed by field name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years
    pub age: f64,
    /// Sex (0 = female, 1 = male)
    pub sex: f64,
    /// Chest pain type
    pub cp: f64,
    /// Resting blood pressure (mm Hg)
    pub trestbps: f64,
    /// Serum cholesterol (mg/dl)
    pub chol: f64,
    /// Fasting blood sugar > 120 mg/dl
    pub fbs: f64,
    /// Resting ECG result
    pub restecg: f64,
    /// Maximum heart rate achieved
    pub thalach: f64,
    /// Exercise induced angina
    pub exang: f64,
    /// ST depression induced by exercise
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment
    pub slope: f64,
    /// Number of major vessels colored by fluoroscopy
    pub ca: f64,
    /// Thalassemia code
    pub thal: f64,
}

impl PatientRecord {
    /// Assemble the feature vector in fitted order
    pub fn to_features(&self) -> FeatureVector {
        FeatureVector::new([
            self.age,
            self.sex,
            self.cp,
            self.trestbps,
            self.chol,
            self.fbs,
            self.restecg,
            self.thalach,
            self.exang,
            self.oldpeak,
            self.slope,
            self.ca,
            self.thal,
        ])
    }

    /// Rebuild a record from values in feature order
    pub fn from_features(features: &FeatureVector) -> Self {
        let [age, sex, cp, trestbps, chol, fbs, restecg, thalach, exang, oldpeak, slope, ca, thal] =
            *features.values();
        Self {
            age,
            sex,
            cp,
            trestbps,
            chol,
            fbs,
            restecg,
            thalach,
            exang,
            oldpeak,
            slope,
            ca,
            thal,
        }
    }

    /// Value for a field key
    pub fn get(&self, key: &str) -> Option<f64> {
        let idx = crate::schema::feature_names().position(|name| name == key)?;
        Some(self.to_features().values()[idx])
    }
}

/// Ordered feature vector for ML inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    /// Wrap raw values already in feature order
    pub fn new(values: [f64; FEATURE_DIMENSION]) -> Self {
        Self { values }
    }

    /// Raw values
    pub fn values(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.values
    }

    /// Values as f32, for backends that take single precision
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

impl From<&PatientRecord> for FeatureVector {
    fn from(record: &PatientRecord) -> Self {
        record.to_features()
    }
}
