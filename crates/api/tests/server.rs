//! End-to-end tests against a server bound to an ephemeral port

use api::{serve, AppState};
use data_validator::Validator;
use feature_engine::{FeatureVector, StandardScaler};
use inference_engine::{
    Classifier, InferenceError, LabelModel, LinearModel, PredictionContext, ScoreModel, Scorer,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

struct FixedScore(f64);

impl Scorer for FixedScore {
    fn score(&self, _: &FeatureVector) -> Result<f64, InferenceError> {
        Ok(self.0)
    }
}

async fn spawn(classifier: Classifier, validator: Validator) -> SocketAddr {
    let context = PredictionContext::new(StandardScaler::identity(), classifier);
    let state = Arc::new(AppState::new(context, validator, None));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, state).await.unwrap();
    });
    addr
}

fn continuous(score: f64) -> Classifier {
    Classifier::ContinuousScore(ScoreModel::new(FixedScore(score)))
}

fn always_zero() -> Classifier {
    Classifier::DiscreteLabel(LabelModel::Linear(LinearModel {
        coefficients: vec![0.0; 13],
        intercept: -1.0,
    }))
}

fn patient() -> Value {
    json!({
        "age": 63, "sex": 1, "cp": 3, "trestbps": 145, "chol": 233, "fbs": 1,
        "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 2.3, "slope": 0, "ca": 0, "thal": 1
    })
}

fn form_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("age", "63"),
        ("sex", "1"),
        ("cp", "3"),
        ("trestbps", "145"),
        ("chol", "233"),
        ("fbs", "1"),
        ("restecg", "0"),
        ("thalach", "150"),
        ("exang", "0"),
        ("oldpeak", "2.3"),
        ("slope", "0"),
        ("ca", "0"),
        ("thal", "1"),
    ]
}

#[tokio::test]
async fn test_index_serves_form() {
    let addr = spawn(always_zero(), Validator::default()).await;
    let body = reqwest::get(format!("http://{addr}/")).await.unwrap().text().await.unwrap();
    assert!(body.contains("Heart Attack Prediction"));
    assert!(body.contains("Thalassemia"));
    assert!(body.contains("action=\"/predict\""));
}

#[tokio::test]
async fn test_form_submission_shows_result() {
    let addr = spawn(always_zero(), Validator::default()).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/predict"))
        .form(&form_fields())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("readonly>No risk detected</textarea>"));
    assert!(body.contains("name=\"oldpeak\" value=\"2.3\""));
}

#[tokio::test]
async fn test_form_missing_radio() {
    let addr = spawn(always_zero(), Validator::default()).await;
    let fields: Vec<_> = form_fields().into_iter().filter(|(k, _)| *k != "cp").collect();
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/predict"))
        .form(&fields)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert!(response.text().await.unwrap().contains("Missing value for Chest Pain Type"));
}

#[tokio::test]
async fn test_json_high_score() {
    let addr = spawn(continuous(0.7), Validator::default()).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/predict"))
        .json(&patient())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["label"], "High risk of heart attack");
    assert_eq!(body["high_risk"], true);
    assert_eq!(body["model_format"], "continuous_score");
}

#[tokio::test]
async fn test_json_boundary_score() {
    let addr = spawn(continuous(0.5), Validator::default()).await;
    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/predict"))
        .json(&patient())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["label"], "No risk detected");
}

#[tokio::test]
async fn test_json_out_of_set_choice() {
    let addr = spawn(continuous(0.7), Validator::default()).await;
    let mut record = patient();
    record["thal"] = json!(0);
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/predict"))
        .json(&record)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("thal"));
}

#[tokio::test]
async fn test_validation_disabled_passes_through() {
    let addr = spawn(continuous(0.7), Validator::disabled()).await;
    let mut record = patient();
    record["thal"] = json!(0);
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/predict"))
        .json(&record)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_json_missing_field() {
    let addr = spawn(continuous(0.7), Validator::default()).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/predict"))
        .json(&json!({"age": 63}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let addr = spawn(always_zero(), Validator::default()).await;
    let health: Value = reqwest::get(format!("http://{addr}/api/v1/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["model_format"], "discrete_label");
    assert_eq!(health["validation_enabled"], true);

    let metrics = reqwest::get(format!("http://{addr}/metrics")).await.unwrap();
    assert_eq!(metrics.status(), 404);
}
