//! Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use feature_engine::PatientRecord;
use inference_engine::ModelFormat;
use serde::Serialize;
use std::sync::Arc;

use super::run_prediction;
use crate::error::ApiError;
use crate::AppState;

/// Response for the prediction endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Text shown in the form's output box
    pub label: &'static str,
    pub high_risk: bool,
    pub model_format: ModelFormat,
}

/// Predict from a JSON patient record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PatientRecord>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(record) = body.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    let label = run_prediction(&state, &record)?;

    Ok(Json(PredictionResponse {
        label: label.as_str(),
        high_risk: label.is_high_risk(),
        model_format: state.context.model_format(),
    }))
}
