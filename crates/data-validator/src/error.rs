//! Validation Error Types

use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value not among the widget's choices
    #[error("{field} value {value} is not one of {allowed:?}")]
    NotAChoice {
        field: &'static str,
        value: f64,
        allowed: &'static [i64],
    },

    /// NaN or infinite number
    #[error("{field} value {value} is not a finite number")]
    NotFinite { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Offending field key
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotAChoice { field, .. } | ValidationError::NotFinite { field, .. } => {
                field
            }
        }
    }
}
