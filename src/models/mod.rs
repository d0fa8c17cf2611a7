// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{FieldValue, RawCustomerInput, FeatureVector, ScaledVector, Probability, RiskTier, Decision, RiskAssessment};
pub use requests::{CustomerData, DashboardRequest};
pub use responses::{PredictResponse, DashboardResponse, LivenessResponse, HealthResponse, ModelInfoResponse, RiskPolicyInfo, ErrorResponse};
