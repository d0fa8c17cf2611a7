// Feature encoder tests against the telco training schema

use churn_serve::core::{EncodingMode, FeatureEncoder, FeatureSchema, PipelineError};
use churn_serve::models::{CustomerData, FeatureVector, RawCustomerInput};
use churn_serve::services::{load_json, SchemaArtifact};
use proptest::prelude::*;
use std::path::Path;

const CATEGORICAL_FIELDS: [&str; 9] = [
    "gender",
    "Partner",
    "Dependents",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "Contract",
    "PaymentMethod",
];

fn fixture_schema() -> FeatureSchema {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/feature_columns.json");
    load_json::<SchemaArtifact>(&path)
        .unwrap()
        .into_schema()
        .unwrap()
}

/// The columns the hand-written API rules populate, minus `OnlineSecurity_Yes`
fn api_rule_schema() -> FeatureSchema {
    let columns = [
        "SeniorCitizen",
        "tenure",
        "MonthlyCharges",
        "TotalCharges",
        "gender_Male",
        "Partner_Yes",
        "Dependents_Yes",
        "PhoneService_Yes",
        "MultipleLines_No phone service",
        "MultipleLines_Yes",
        "InternetService_Fiber optic",
        "InternetService_No",
        "OnlineSecurity_No internet service",
    ];
    FeatureSchema::new(columns.iter().map(|c| c.to_string()).collect()).unwrap()
}

fn scenario_two() -> CustomerData {
    serde_json::from_value(serde_json::json!({
        "SeniorCitizen": 0,
        "tenure": 24,
        "MonthlyCharges": 55.5,
        "TotalCharges": 1200.0,
        "gender": "Male",
        "Partner": "Yes",
        "Dependents": "No",
        "PhoneService": "Yes",
        "MultipleLines": "No",
        "InternetService": "DSL",
        "OnlineSecurity": "Yes"
    }))
    .unwrap()
}

fn slot(encoder: &FeatureEncoder, features: &FeatureVector, column: &str) -> f64 {
    let position = encoder.schema().index_of(column).unwrap();
    features.get(position).unwrap()
}

fn group_sum(encoder: &FeatureEncoder, features: &FeatureVector, field: &str) -> f64 {
    encoder
        .schema()
        .one_hot_positions(field)
        .into_iter()
        .map(|position| features.get(position).unwrap())
        .sum()
}

#[test]
fn test_scenario_two_zero_fill() {
    let encoder = FeatureEncoder::lenient(api_rule_schema());
    let raw = RawCustomerInput::from(&scenario_two());
    let features = encoder.encode(&raw).unwrap();

    assert_eq!(features.len(), 13);
    assert_eq!(slot(&encoder, &features, "SeniorCitizen"), 0.0);
    assert_eq!(slot(&encoder, &features, "tenure"), 24.0);
    assert_eq!(slot(&encoder, &features, "MonthlyCharges"), 55.5);
    assert_eq!(slot(&encoder, &features, "TotalCharges"), 1200.0);
    assert_eq!(slot(&encoder, &features, "gender_Male"), 1.0);
    assert_eq!(slot(&encoder, &features, "Partner_Yes"), 1.0);
    assert_eq!(slot(&encoder, &features, "PhoneService_Yes"), 1.0);
    assert_eq!(slot(&encoder, &features, "Dependents_Yes"), 0.0);

    // "No", "DSL" and an OnlineSecurity value with no column leave their groups empty
    assert_eq!(group_sum(&encoder, &features, "MultipleLines"), 0.0);
    assert_eq!(group_sum(&encoder, &features, "InternetService"), 0.0);
    assert_eq!(group_sum(&encoder, &features, "OnlineSecurity"), 0.0);
}

#[test]
fn test_scenario_two_full_schema_sets_online_security() {
    let encoder = FeatureEncoder::lenient(fixture_schema());
    let features = encoder.encode(&RawCustomerInput::from(&scenario_two())).unwrap();

    assert_eq!(features.len(), 19);
    assert_eq!(slot(&encoder, &features, "OnlineSecurity_Yes"), 1.0);
    assert_eq!(slot(&encoder, &features, "OnlineSecurity_No internet service"), 0.0);
    assert_eq!(group_sum(&encoder, &features, "MultipleLines"), 0.0);
    assert_eq!(group_sum(&encoder, &features, "InternetService"), 0.0);
    assert_eq!(group_sum(&encoder, &features, "Contract"), 0.0);
}

#[test]
fn test_strict_mode_accepts_reference_categories() {
    let encoder = FeatureEncoder::new(fixture_schema(), EncodingMode::Strict).unwrap();
    let raw = RawCustomerInput::new()
        .with_category("gender", "Female")
        .with_category("Contract", "Month-to-month")
        .with_category("PaymentMethod", "Bank transfer (automatic)");

    let features = encoder.encode(&raw).unwrap();
    assert_eq!(features.values().sum(), 0.0);
}

#[test]
fn test_strict_mode_rejects_schema_drift() {
    let encoder = FeatureEncoder::new(fixture_schema(), EncodingMode::Strict).unwrap();
    let raw = RawCustomerInput::new().with_category("InternetService", "Satellite");

    assert_eq!(
        encoder.encode(&raw),
        Err(PipelineError::UnknownCategory {
            field: "InternetService".to_string(),
            value: "Satellite".to_string(),
        })
    );
}

proptest! {
    #[test]
    fn encoded_length_and_one_hot_groups(
        gender in prop::sample::select(vec!["Female", "Male", "Unknown"]),
        partner in prop::sample::select(vec!["Yes", "No"]),
        lines in prop::sample::select(vec!["Yes", "No", "No phone service", "Maybe"]),
        internet in prop::sample::select(vec!["DSL", "Fiber optic", "No", "Cable"]),
        security in prop::sample::select(vec!["Yes", "No", "No internet service"]),
        contract in prop::sample::select(vec!["Month-to-month", "One year", "Two year"]),
        payment in prop::sample::select(vec![
            "Electronic check",
            "Mailed check",
            "Bank transfer (automatic)",
            "Credit card (automatic)",
        ]),
        tenure in 0.0f64..72.0,
        monthly in 0.0f64..200.0,
    ) {
        let encoder = FeatureEncoder::lenient(fixture_schema());
        let raw = RawCustomerInput::new()
            .with_numeric("tenure", tenure)
            .with_numeric("MonthlyCharges", monthly)
            .with_numeric("TotalCharges", tenure * monthly)
            .with_category("gender", gender)
            .with_category("Partner", partner)
            .with_category("MultipleLines", lines)
            .with_category("InternetService", internet)
            .with_category("OnlineSecurity", security)
            .with_category("Contract", contract)
            .with_category("PaymentMethod", payment);

        let features = encoder.encode(&raw).unwrap();
        prop_assert_eq!(features.len(), encoder.dimension());

        for field in CATEGORICAL_FIELDS {
            let sum = group_sum(&encoder, &features, field);
            prop_assert!(sum == 0.0 || sum == 1.0, "group {} sums to {}", field, sum);
        }

        let again = encoder.encode(&raw).unwrap();
        prop_assert_eq!(features, again);
    }
}
