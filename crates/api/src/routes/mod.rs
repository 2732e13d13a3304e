//! HTTP Routes

pub mod form;
pub mod health;
pub mod predictions;

use crate::error::ApiError;
use crate::AppState;
use feature_engine::PatientRecord;
use inference_engine::RiskLabel;
use std::time::Instant;
use tracing::debug;

/// Validate, predict, and record metrics for one submission
pub(crate) fn run_prediction(state: &AppState, record: &PatientRecord) -> Result<RiskLabel, ApiError> {
    let validation = state.validator.validate(record);
    if !validation.valid {
        metrics::counter!("heart_risk_rejected_inputs_total").increment(1);
        return Err(ApiError::Validation(validation.summary()));
    }

    let start = Instant::now();
    let label = state.context.predict(record)?;
    metrics::histogram!("heart_risk_prediction_latency_seconds").record(start.elapsed().as_secs_f64());
    metrics::counter!("heart_risk_predictions_total", "label" => label.metric_label()).increment(1);

    debug!("Prediction: {} ({}us)", label.metric_label(), start.elapsed().as_micros());
    Ok(label)
}
