use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;
use crate::core::RiskPolicy;
use crate::models::{DashboardRequest, DashboardResponse, RawCustomerInput, RiskAssessment};
use crate::routes::{pipeline_error_response, validation_error_response, with_request_id, AppState};

pub const NON_POSITIVE_CHARGES_ADVISORY: &str = "Monthly charges should be greater than 0.";

/// Configure the dashboard back-end routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict", web::post().to(dashboard_predict));
}

/// Advisories the dashboard shows instead of a prediction
pub fn advisories_for(req: &DashboardRequest) -> Vec<String> {
    let mut advisories = Vec::new();
    if req.monthly_charges <= 0.0 {
        advisories.push(NON_POSITIVE_CHARGES_ADVISORY.to_string());
    }
    advisories
}

fn recommendation(assessment: &RiskAssessment) -> &'static str {
    if assessment.decision.is_churn() {
        "Customer is likely to churn"
    } else {
        "Customer is likely to stay"
    }
}

/// Dashboard prediction endpoint
///
/// POST /dashboard/predict
///
/// Scores with the dashboard's own tier policy. A non-positive monthly
/// charge returns the advisory and no prediction.
async fn dashboard_predict(
    state: web::Data<AppState>,
    req: web::Json<DashboardRequest>,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("dashboard_predict", request_id = %request_id);
    let _guard = span.enter();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for dashboard request: {}", errors);
        return with_request_id(validation_error_response(&errors), request_id);
    }

    let advisories = advisories_for(&req);
    if !advisories.is_empty() {
        tracing::info!("Dashboard prediction skipped: {}", advisories.join("; "));
        let response = HttpResponse::Ok().json(DashboardResponse {
            churn_probability: None,
            probability_percent: None,
            risk_level: None,
            likely_to_churn: None,
            recommendation: None,
            advisories,
        });
        return with_request_id(response, request_id);
    }

    let raw = RawCustomerInput::from(&*req);
    let assessment = match state.predictor.predict(&raw, RiskPolicy::Dashboard) {
        Ok(assessment) => assessment,
        Err(e) => {
            tracing::info!("Dashboard prediction rejected: {}", e);
            return with_request_id(pipeline_error_response(&e), request_id);
        }
    };

    tracing::info!(
        "Dashboard churn probability {:.4}, {}",
        assessment.probability.value(),
        assessment.tier.dashboard_label()
    );

    let response = HttpResponse::Ok().json(DashboardResponse {
        churn_probability: Some(assessment.probability.rounded(4)),
        probability_percent: Some((assessment.probability.value() * 10000.0).round() / 100.0),
        risk_level: Some(assessment.tier.dashboard_label().to_string()),
        likely_to_churn: Some(assessment.decision.is_churn()),
        recommendation: Some(recommendation(&assessment).to_string()),
        advisories,
    });
    with_request_id(response, request_id)
}
