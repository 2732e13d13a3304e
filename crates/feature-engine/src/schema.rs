//! Input Field Schema
//!
//! The 13 patient fields in the order the scaler and model were fitted on.

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 13;

/// Widget kind for a form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free numeric entry with a prefilled default
    Number { default: f64 },
    /// Radio group restricted to a small integer set
    Choice(&'static [i64]),
}

/// Description of one input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Form and JSON key
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Widget kind
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn number(key: &'static str, label: &'static str, default: f64) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number { default },
        }
    }

    const fn choice(key: &'static str, label: &'static str, options: &'static [i64]) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Choice(options),
        }
    }

    /// Allowed choices, if this is a choice field
    pub fn choices(&self) -> Option<&'static [i64]> {
        match self.kind {
            FieldKind::Choice(options) => Some(options),
            FieldKind::Number { .. } => None,
        }
    }
}

/// Field table in feature order
pub const FIELDS: [FieldSpec; FEATURE_DIMENSION] = [
    FieldSpec::number("age", "Age", 50.0),
    FieldSpec::choice("sex", "Sex (0=Female, 1=Male)", &[0, 1]),
    FieldSpec::choice("cp", "Chest Pain Type", &[0, 1, 2, 3]),
    FieldSpec::number("trestbps", "Resting Blood Pressure (mm Hg)", 120.0),
    FieldSpec::number("chol", "Serum Cholesterol (mg/dl)", 200.0),
    FieldSpec::choice("fbs", "Fasting Blood Sugar > 120", &[0, 1]),
    FieldSpec::choice("restecg", "Resting ECG Results", &[0, 1, 2]),
    FieldSpec::number("thalach", "Max Heart Rate Achieved", 150.0),
    FieldSpec::choice("exang", "Exercise Induced Angina", &[0, 1]),
    FieldSpec::number("oldpeak", "ST Depression (oldpeak)", 1.0),
    FieldSpec::choice("slope", "Slope of ST Segment", &[0, 1, 2]),
    FieldSpec::choice("ca", "Number of Major Vessels", &[0, 1, 2, 3]),
    FieldSpec::choice("thal", "Thalassemia", &[1, 2, 3]),
];

/// Feature keys in order
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|f| f.key)
}
