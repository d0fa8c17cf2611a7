// Core pipeline exports
pub mod encoder;
pub mod error;
pub mod model;
pub mod predictor;
pub mod risk;
pub mod scaler;

pub use encoder::{FeatureEncoder, FeatureSchema, EncodingMode, one_hot_column};
pub use error::{ArtifactError, PipelineError};
pub use model::{LogisticModel, ProbabilityModel, sigmoid};
pub use predictor::Predictor;
pub use risk::{RiskPolicy, DECISION_THRESHOLD, classify, decide};
pub use scaler::{Scaler, StandardScaler};
