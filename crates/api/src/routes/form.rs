//! Form Routes

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use feature_engine::{FeatureVector, PatientRecord, FEATURE_DIMENSION, FIELDS};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::run_prediction;
use crate::error::ApiError;
use crate::{page, AppState};

/// Blank form
pub async fn index() -> Html<String> {
    Html(page::render(&HashMap::new(), None))
}

/// Handle a form submission and re-render with the result
pub async fn submit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let values = match form {
        Ok(Form(values)) => values,
        Err(rejection) => {
            let err = ApiError::MalformedBody(rejection.body_text());
            return (err.status(), Html(page::render(&HashMap::new(), Some(&err.to_string()))))
                .into_response();
        }
    };

    let result = parse_record(&values).and_then(|record| run_prediction(&state, &record));
    match result {
        Ok(label) => Html(page::render(&values, Some(label.as_str()))).into_response(),
        Err(err) => {
            warn!("Rejected form submission: {}", err);
            (err.status(), Html(page::render(&values, Some(&err.to_string())))).into_response()
        }
    }
}

/// Read all 13 fields from raw form values
pub fn parse_record(values: &HashMap<String, String>) -> Result<PatientRecord, ApiError> {
    let mut raw = [0.0; FEATURE_DIMENSION];
    for (slot, field) in raw.iter_mut().zip(FIELDS.iter()) {
        let text = values
            .get(field.key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::MissingField(field.label))?;
        *slot = text.parse::<f64>().map_err(|_| ApiError::InvalidNumber {
            label: field.label,
            value: text.to_string(),
        })?;
    }
    Ok(PatientRecord::from_features(&FeatureVector::new(raw)))
}
