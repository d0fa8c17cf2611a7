use ndarray::Array1;
use crate::core::PipelineError;

/// A single raw value supplied for a customer field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Numeric(f64),
    Category(String),
}

/// Raw customer fields, in the order the caller supplied them
///
/// Built per request and dropped after scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCustomerInput {
    fields: Vec<(String, FieldValue)>,
}

impl RawCustomerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.push((name.into(), FieldValue::Numeric(value)));
        self
    }

    pub fn with_category(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FieldValue::Category(value.into())));
        self
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Encoded features in training-schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    pub fn new(values: Array1<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(Array1::from(values))
    }
}

/// Feature vector after the fitted scaler has been applied
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledVector(Array1<f64>);

impl ScaledVector {
    pub fn new(values: Array1<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }
}

impl From<Vec<f64>> for ScaledVector {
    fn from(values: Vec<f64>) -> Self {
        Self(Array1::from(values))
    }
}

/// Estimated churn likelihood, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    pub fn new(value: f64) -> Result<Self, PipelineError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PipelineError::InvalidProbability(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Value rounded half away from zero to `decimals` places
    pub fn rounded(&self, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (self.0 * factor).round() / factor
    }
}

/// Discrete risk bucket, ordered Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Label used by the HTTP API
    pub fn api_label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    /// Label used by the dashboard surface
    pub fn dashboard_label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }
}

/// Binary churn call, decoupled from the tier boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Stay,
    Churn,
}

impl Decision {
    pub fn is_churn(&self) -> bool {
        matches!(self, Decision::Churn)
    }

    /// 1 for churn, 0 for stay
    pub fn as_flag(&self) -> u8 {
        match self {
            Decision::Stay => 0,
            Decision::Churn => 1,
        }
    }
}

/// Outcome of classifying one probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub probability: Probability,
    pub tier: RiskTier,
    pub decision: Decision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_bounds() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(1.0).is_ok());
        assert_eq!(
            Probability::new(1.5),
            Err(PipelineError::InvalidProbability(1.5))
        );
        assert!(Probability::new(f64::NAN).is_err());
    }

    #[test]
    fn test_probability_rounding() {
        let p = Probability::new(0.123456).unwrap();
        assert_eq!(p.rounded(4), 0.1235);
        assert_eq!(p.rounded(2), 0.12);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(RiskTier::Low < RiskTier::Medium);
        assert!(RiskTier::Medium < RiskTier::High);
    }

    #[test]
    fn test_raw_input_lookup() {
        let raw = RawCustomerInput::new()
            .with_numeric("tenure", 12.0)
            .with_category("gender", "Male");

        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get("tenure"), Some(&FieldValue::Numeric(12.0)));
        assert_eq!(raw.get("gender"), Some(&FieldValue::Category("Male".to_string())));
        assert_eq!(raw.get("Partner"), None);
    }
}
