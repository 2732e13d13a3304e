//! Widget-Level Input Validator
//!
//! Enforces only what the form controls enforce: choice fields must hold one of
//! their declared integers and every number must be finite. No clinical range
//! checks.

use crate::error::ValidationError;
use feature_engine::{FieldKind, FieldSpec, PatientRecord, FIELDS};
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Whether checks run at all
    pub enabled: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }

    /// Human-readable summary of all errors
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validator for patient records
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validator that accepts everything
    pub fn disabled() -> Self {
        Self::new(ValidationConfig { enabled: false })
    }

    /// Whether checks are active
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Validate a single value against its field's widget
    pub fn validate_field(&self, field: &FieldSpec, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.key,
                value,
            });
        }

        match field.kind {
            FieldKind::Number { .. } => Ok(()),
            FieldKind::Choice(allowed) => {
                if allowed.iter().any(|&choice| choice as f64 == value) {
                    Ok(())
                } else {
                    Err(ValidationError::NotAChoice {
                        field: field.key,
                        value,
                        allowed,
                    })
                }
            }
        }
    }

    /// Validate every field of a record
    pub fn validate(&self, record: &PatientRecord) -> ValidationResult {
        if !self.config.enabled {
            return ValidationResult::valid(0);
        }

        let features = record.to_features();
        let errors: Vec<ValidationError> = FIELDS
            .iter()
            .zip(features.values().iter())
            .filter_map(|(field, &value)| self.validate_field(field, value).err())
            .collect();

        if errors.is_empty() {
            ValidationResult::valid(FIELDS.len())
        } else {
            ValidationResult::invalid(errors, FIELDS.len())
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
