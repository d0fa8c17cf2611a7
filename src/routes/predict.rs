use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;
use crate::core::{RiskPolicy, DECISION_THRESHOLD};
use crate::models::{
    CustomerData, HealthResponse, LivenessResponse, ModelInfoResponse, PredictResponse,
    RawCustomerInput, RiskPolicyInfo,
};
use crate::routes::{pipeline_error_response, validation_error_response, with_request_id, AppState};

/// Configure the API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(liveness))
        .route("/health", web::get().to(health_check))
        .route("/model", web::get().to(model_info))
        .route("/predict", web::post().to(predict));
}

/// Static liveness message
async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(LivenessResponse {
        message: "Churn Prediction API is running".to_string(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        features: state.predictor.dimension(),
    })
}

/// Model information, including both tier policies side by side
async fn model_info(state: web::Data<AppState>) -> impl Responder {
    let risk_policies = RiskPolicy::ALL
        .iter()
        .map(|policy| RiskPolicyInfo {
            name: policy.name().to_string(),
            medium_from: policy.medium_from(),
            high_from: policy.high_from(),
        })
        .collect();

    HttpResponse::Ok().json(ModelInfoResponse {
        model: "Logistic Regression".to_string(),
        problem_type: "Binary Classification".to_string(),
        use_case: "Customer Retention Analytics".to_string(),
        features: state.predictor.dimension(),
        strict_encoding: state.strict_encoding,
        decision_threshold: DECISION_THRESHOLD,
        risk_policies,
    })
}

/// Prediction endpoint
///
/// POST /predict
///
/// Request body:
/// ```json
/// {
///   "SeniorCitizen": 0,
///   "tenure": 24,
///   "MonthlyCharges": 55.5,
///   "TotalCharges": 1200.0,
///   "gender": "Male",
///   "Partner": "Yes",
///   "Dependents": "No",
///   "PhoneService": "Yes",
///   "MultipleLines": "No",
///   "InternetService": "DSL",
///   "OnlineSecurity": "Yes"
/// }
/// ```
async fn predict(
    state: web::Data<AppState>,
    req: web::Json<CustomerData>,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", request_id = %request_id);
    let _guard = span.enter();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for predict request: {}", errors);
        return with_request_id(validation_error_response(&errors), request_id);
    }

    let raw = RawCustomerInput::from(&*req);
    let assessment = match state.predictor.predict(&raw, RiskPolicy::Api) {
        Ok(assessment) => assessment,
        Err(e) => {
            tracing::info!("Prediction rejected: {}", e);
            return with_request_id(pipeline_error_response(&e), request_id);
        }
    };

    tracing::info!(
        "Churn probability {:.4}, risk {}, prediction {}",
        assessment.probability.value(),
        assessment.tier.api_label(),
        assessment.decision.as_flag()
    );

    let response = HttpResponse::Ok().json(PredictResponse {
        churn_probability: assessment.probability.rounded(4),
        risk_level: assessment.tier.api_label().to_string(),
        prediction: assessment.decision.as_flag(),
    });
    with_request_id(response, request_id)
}
