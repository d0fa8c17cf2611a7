//! Churn Serve - scoring service for a pre-trained customer churn classifier
//!
//! Raw customer fields are projected onto the training-time feature schema,
//! standardised, scored by a logistic model and mapped to a risk tier.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{FeatureEncoder, FeatureSchema, Predictor, RiskPolicy, DECISION_THRESHOLD};
pub use models::{RawCustomerInput, Probability, RiskTier, Decision, RiskAssessment, CustomerData, PredictResponse};
