use serde::{Deserialize, Serialize};

/// Response for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub churn_probability: f64,
    pub risk_level: String,
    pub prediction: u8,
}

/// Response for `POST /dashboard/predict`
///
/// Scoring fields are `None` when an advisory blocked the prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub churn_probability: Option<f64>,
    pub probability_percent: Option<f64>,
    pub risk_level: Option<String>,
    pub likely_to_churn: Option<bool>,
    pub recommendation: Option<String>,
    pub advisories: Vec<String>,
}

/// Static liveness message for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub features: usize,
}

/// Cut points of one named risk policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPolicyInfo {
    pub name: String,
    pub medium_from: f64,
    pub high_from: f64,
}

/// Response for `GET /model`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model: String,
    pub problem_type: String,
    pub use_case: String,
    pub features: usize,
    pub strict_encoding: bool,
    pub decision_threshold: f64,
    pub risk_policies: Vec<RiskPolicyInfo>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
