use std::sync::Arc;
use crate::core::{
    encoder::FeatureEncoder,
    error::{ArtifactError, PipelineError},
    model::{LogisticModel, ProbabilityModel},
    risk::RiskPolicy,
    scaler::{Scaler, StandardScaler},
};
use crate::models::{Probability, RawCustomerInput, RiskAssessment, ScaledVector};

/// Scoring pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Feature encoding against the training schema
/// 2. Scaling with the fitted scaler
/// 3. Probability from the fitted classifier
/// 4. Tiering and decision under a named risk policy
///
/// All artifacts are shared read-only; cloning is cheap.
#[derive(Debug)]
pub struct Predictor<S = StandardScaler, M = LogisticModel> {
    encoder: Arc<FeatureEncoder>,
    scaler: Arc<S>,
    model: Arc<M>,
}

impl<S, M> Clone for Predictor<S, M> {
    fn clone(&self) -> Self {
        Self {
            encoder: Arc::clone(&self.encoder),
            scaler: Arc::clone(&self.scaler),
            model: Arc::clone(&self.model),
        }
    }
}

impl<S: Scaler, M: ProbabilityModel> Predictor<S, M> {
    /// Assemble a predictor, refusing artifacts that disagree on dimensionality
    pub fn new(encoder: FeatureEncoder, scaler: S, model: M) -> Result<Self, ArtifactError> {
        let columns = encoder.dimension();
        if scaler.dimension() != columns || model.dimension() != columns {
            return Err(ArtifactError::Inconsistent(format!(
                "schema has {} columns, scaler expects {}, model expects {}",
                columns,
                scaler.dimension(),
                model.dimension()
            )));
        }

        Ok(Self {
            encoder: Arc::new(encoder),
            scaler: Arc::new(scaler),
            model: Arc::new(model),
        })
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn dimension(&self) -> usize {
        self.encoder.dimension()
    }

    /// Stages 1 and 2
    pub fn encode_and_scale(&self, raw: &RawCustomerInput) -> Result<ScaledVector, PipelineError> {
        let features = self.encoder.encode(raw)?;
        self.scaler.transform(&features)
    }

    /// Stages 1 to 3
    pub fn score(&self, raw: &RawCustomerInput) -> Result<Probability, PipelineError> {
        let scaled = self.encode_and_scale(raw)?;
        self.model.predict_probability(&scaled)
    }

    /// Run the full pipeline and classify under `policy`
    pub fn predict(
        &self,
        raw: &RawCustomerInput,
        policy: RiskPolicy,
    ) -> Result<RiskAssessment, PipelineError> {
        let probability = self.score(raw)?;
        let assessment = policy.classify(probability);

        tracing::debug!(
            "Scored {} fields under {}: p={:.4}, tier={:?}, decision={:?}",
            raw.len(),
            policy.name(),
            probability.value(),
            assessment.tier,
            assessment.decision
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoder::FeatureSchema;
    use crate::models::{Decision, FeatureVector, RiskTier};

    fn create_test_encoder() -> FeatureEncoder {
        let schema = FeatureSchema::new(vec![
            "tenure".to_string(),
            "Contract_Two year".to_string(),
        ])
        .unwrap();
        FeatureEncoder::lenient(schema)
    }

    /// Scaler that ignores its fitted shape, to exercise the model's own check
    struct LooseScaler;

    impl Scaler for LooseScaler {
        fn dimension(&self) -> usize {
            2
        }

        fn transform(&self, features: &FeatureVector) -> Result<ScaledVector, PipelineError> {
            let mut values = features.values().to_vec();
            values.pop();
            Ok(ScaledVector::from(values))
        }
    }

    #[test]
    fn test_predict_end_to_end() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let model = LogisticModel::new(vec![0.0, -4.0], 1.0).unwrap();
        let predictor = Predictor::new(create_test_encoder(), scaler, model).unwrap();

        let month_to_month = RawCustomerInput::new().with_numeric("tenure", 3.0);
        let assessment = predictor.predict(&month_to_month, RiskPolicy::Api).unwrap();
        assert!(assessment.probability.value() > 0.7);
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.decision, Decision::Churn);

        let two_year = RawCustomerInput::new()
            .with_numeric("tenure", 3.0)
            .with_category("Contract", "Two year");
        let assessment = predictor.predict(&two_year, RiskPolicy::Api).unwrap();
        assert_eq!(assessment.tier, RiskTier::Low);
        assert_eq!(assessment.decision, Decision::Stay);
    }

    #[test]
    fn test_rejects_inconsistent_artifacts() {
        let scaler = StandardScaler::new(vec![0.0; 3], vec![1.0; 3]).unwrap();
        let model = LogisticModel::new(vec![1.0, 1.0], 0.0).unwrap();
        let result = Predictor::new(create_test_encoder(), scaler, model);
        assert!(matches!(result, Err(ArtifactError::Inconsistent(_))));
    }

    #[test]
    fn test_model_catches_shape_drift() {
        let model = LogisticModel::new(vec![1.0, 1.0], 0.0).unwrap();
        let predictor = Predictor::new(create_test_encoder(), LooseScaler, model).unwrap();

        let raw = RawCustomerInput::new().with_numeric("tenure", 1.0);
        assert_eq!(
            predictor.score(&raw),
            Err(PipelineError::ShapeMismatch { stage: "model", expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_clone_shares_artifacts() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let model = LogisticModel::new(vec![0.5, 0.5], 0.0).unwrap();
        let predictor = Predictor::new(create_test_encoder(), scaler, model).unwrap();
        let cloned = predictor.clone();

        let raw = RawCustomerInput::new().with_numeric("tenure", 2.0);
        assert_eq!(predictor.score(&raw), cloned.score(&raw));
    }
}
