use crate::models::{Decision, Probability, RiskAssessment, RiskTier};

/// Churn is predicted when the probability reaches this value
pub const DECISION_THRESHOLD: f64 = 0.45;

/// Named tiering policies
///
/// The dashboard and the API were shipped with different High cut points.
/// Both are kept as-is until product decides which one is intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskPolicy {
    /// Low < 0.30 <= Medium < 0.60 <= High
    Dashboard,
    /// Low < 0.30 <= Medium < 0.70 <= High
    Api,
}

impl RiskPolicy {
    pub const ALL: [RiskPolicy; 2] = [RiskPolicy::Dashboard, RiskPolicy::Api];

    pub fn name(&self) -> &'static str {
        match self {
            RiskPolicy::Dashboard => "DashboardRiskPolicy",
            RiskPolicy::Api => "ApiRiskPolicy",
        }
    }

    /// Inclusive lower bound of the Medium tier
    pub fn medium_from(&self) -> f64 {
        0.30
    }

    /// Inclusive lower bound of the High tier
    pub fn high_from(&self) -> f64 {
        match self {
            RiskPolicy::Dashboard => 0.60,
            RiskPolicy::Api => 0.70,
        }
    }

    pub fn tier(&self, probability: Probability) -> RiskTier {
        let p = probability.value();
        if p < self.medium_from() {
            RiskTier::Low
        } else if p < self.high_from() {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn classify(&self, probability: Probability) -> RiskAssessment {
        classify(*self, probability)
    }
}

#[inline]
pub fn decide(probability: Probability) -> Decision {
    if probability.value() >= DECISION_THRESHOLD {
        Decision::Churn
    } else {
        Decision::Stay
    }
}

/// Map a probability to its tier under `policy` and the binary decision
pub fn classify(policy: RiskPolicy, probability: Probability) -> RiskAssessment {
    RiskAssessment {
        probability,
        tier: policy.tier(probability),
        decision: decide(probability),
    }
}
