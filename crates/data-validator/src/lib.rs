//! Input Validation
//!
//! Widget-level checks for patient records submitted through the form.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
