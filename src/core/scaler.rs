use ndarray::Array1;
use crate::core::error::{ArtifactError, PipelineError};
use crate::models::{FeatureVector, ScaledVector};

/// A pre-fit, dimension-preserving transform applied before scoring
pub trait Scaler: Send + Sync {
    /// Number of features the transform was fit on
    fn dimension(&self) -> usize;

    fn transform(&self, features: &FeatureVector) -> Result<ScaledVector, PipelineError>;
}

/// Standardisation: `(x - mean) / scale`, per column
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Build from fitted parameters. A zero scale is replaced by 1 so
    /// constant columns pass through centred but unscaled.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        if mean.is_empty() {
            return Err(ArtifactError::Inconsistent("scaler has no features".to_string()));
        }
        if mean.len() != scale.len() {
            return Err(ArtifactError::Inconsistent(format!(
                "scaler mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::Inconsistent(
                "scaler parameters must be finite".to_string(),
            ));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Vec<_>>();

        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }
}

impl Scaler for StandardScaler {
    fn dimension(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &FeatureVector) -> Result<ScaledVector, PipelineError> {
        if features.len() != self.dimension() {
            return Err(PipelineError::ShapeMismatch {
                stage: "scaler",
                expected: self.dimension(),
                actual: features.len(),
            });
        }

        let scaled = (features.values() - &self.mean) / &self.scale;
        Ok(ScaledVector::new(scaled))
    }
}
