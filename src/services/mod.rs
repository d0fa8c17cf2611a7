// Service exports
pub mod artifacts;

pub use artifacts::{load_json, load_predictor, ModelArtifact, ScalerArtifact, SchemaArtifact};
