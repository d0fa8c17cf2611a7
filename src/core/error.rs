use thiserror::Error;

/// Errors raised while loading or validating model artifacts.
///
/// These only surface at startup; a process that hits one must not serve.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Feature schema is empty")]
    EmptySchema,

    #[error("Feature schema lists column '{0}' more than once")]
    DuplicateColumn(String),

    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(String),
}

/// Errors raised while scoring a single request
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("Shape mismatch in {stage}: expected {expected} features, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },

    #[error("Field '{0}' does not map to any feature column")]
    UnknownField(String),

    #[error("Field '{0}' is not a finite number")]
    NonFinite(String),

    #[error("Probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

impl PipelineError {
    /// True for errors caused by the caller's payload rather than the artifacts
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            PipelineError::ShapeMismatch { .. } | PipelineError::InvalidProbability(_)
        )
    }
}
