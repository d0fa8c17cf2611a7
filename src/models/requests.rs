use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::RawCustomerInput;

pub const CONTRACT_TYPES: [&str; 3] = ["Month-to-month", "One year", "Two year"];
pub const INTERNET_SERVICES: [&str; 3] = ["DSL", "Fiber optic", "No"];
pub const PAYMENT_METHODS: [&str; 4] = [
    "Electronic check",
    "Mailed check",
    "Bank transfer (automatic)",
    "Credit card (automatic)",
];

/// Customer record accepted by `POST /predict`
///
/// Field names follow the training data's column names.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerData {
    #[validate(range(max = 1))]
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: u8,
    #[validate(range(min = 0.0))]
    pub tenure: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[validate(length(min = 1))]
    pub gender: String,
    #[validate(length(min = 1))]
    #[serde(rename = "Partner")]
    pub partner: String,
    #[validate(length(min = 1))]
    #[serde(rename = "Dependents")]
    pub dependents: String,
    #[validate(length(min = 1))]
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[validate(length(min = 1))]
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[validate(length(min = 1))]
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[validate(length(min = 1))]
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[validate(length(min = 1))]
    #[serde(rename = "Contract", default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    #[validate(length(min = 1))]
    #[serde(rename = "PaymentMethod", default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl From<&CustomerData> for RawCustomerInput {
    fn from(data: &CustomerData) -> Self {
        let mut raw = RawCustomerInput::new()
            .with_numeric("SeniorCitizen", f64::from(data.senior_citizen))
            .with_numeric("tenure", data.tenure)
            .with_numeric("MonthlyCharges", data.monthly_charges)
            .with_numeric("TotalCharges", data.total_charges)
            .with_category("gender", data.gender.as_str())
            .with_category("Partner", data.partner.as_str())
            .with_category("Dependents", data.dependents.as_str())
            .with_category("PhoneService", data.phone_service.as_str())
            .with_category("MultipleLines", data.multiple_lines.as_str())
            .with_category("InternetService", data.internet_service.as_str())
            .with_category("OnlineSecurity", data.online_security.as_str());

        if let Some(contract) = &data.contract {
            raw = raw.with_category("Contract", contract.as_str());
        }
        if let Some(method) = &data.payment_method {
            raw = raw.with_category("PaymentMethod", method.as_str());
        }

        raw
    }
}

/// Inputs collected by the dashboard's form controls
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DashboardRequest {
    /// Whole months, as picked on the dashboard slider
    #[validate(range(max = 72))]
    pub tenure: u8,
    #[validate(range(min = 0.0, max = 200.0))]
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[validate(range(min = 0.0, max = 10000.0))]
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[validate(custom(function = "validate_contract"))]
    #[serde(rename = "Contract")]
    pub contract: String,
    #[validate(custom(function = "validate_internet_service"))]
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[validate(custom(function = "validate_payment_method"))]
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
}

impl From<&DashboardRequest> for RawCustomerInput {
    fn from(data: &DashboardRequest) -> Self {
        RawCustomerInput::new()
            .with_numeric("tenure", f64::from(data.tenure))
            .with_numeric("MonthlyCharges", data.monthly_charges)
            .with_numeric("TotalCharges", data.total_charges)
            .with_category("Contract", data.contract.as_str())
            .with_category("InternetService", data.internet_service.as_str())
            .with_category("PaymentMethod", data.payment_method.as_str())
    }
}

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new(code);
        err.message = Some(format!("must be one of: {}", allowed.join(", ")).into());
        Err(err)
    }
}

fn validate_contract(value: &str) -> Result<(), ValidationError> {
    one_of(value, &CONTRACT_TYPES, "contract")
}

fn validate_internet_service(value: &str) -> Result<(), ValidationError> {
    one_of(value, &INTERNET_SERVICES, "internet_service")
}

fn validate_payment_method(value: &str) -> Result<(), ValidationError> {
    one_of(value, &PAYMENT_METHODS, "payment_method")
}
