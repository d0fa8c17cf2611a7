use ndarray::Array1;
use crate::core::error::{ArtifactError, PipelineError};
use crate::models::{Probability, ScaledVector};

/// A pre-fit binary classifier that yields a churn probability
pub trait ProbabilityModel: Send + Sync {
    fn dimension(&self) -> usize;

    fn predict_probability(&self, input: &ScaledVector) -> Result<Probability, PipelineError>;
}

/// Logistic regression with fixed coefficients and intercept
#[derive(Debug, Clone)]
pub struct LogisticModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ArtifactError> {
        if coefficients.is_empty() {
            return Err(ArtifactError::Inconsistent("model has no coefficients".to_string()));
        }
        if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::Inconsistent(
                "model parameters must be finite".to_string(),
            ));
        }

        Ok(Self {
            coefficients: Array1::from(coefficients),
            intercept,
        })
    }

    /// Raw log-odds for an input of the right dimension
    pub fn decision_function(&self, input: &ScaledVector) -> Result<f64, PipelineError> {
        if input.len() != self.dimension() {
            return Err(PipelineError::ShapeMismatch {
                stage: "model",
                expected: self.dimension(),
                actual: input.len(),
            });
        }
        Ok(self.coefficients.dot(input.values()) + self.intercept)
    }
}

impl ProbabilityModel for LogisticModel {
    fn dimension(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_probability(&self, input: &ScaledVector) -> Result<Probability, PipelineError> {
        let z = self.decision_function(input)?;
        Probability::new(sigmoid(z))
    }
}

/// Logistic function, evaluated without overflowing for large |z|
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
