// Route exports
pub mod dashboard;
pub mod predict;

use actix_web::{
    error,
    http::header::{HeaderName, HeaderValue},
    http::StatusCode,
    web, HttpResponse,
};
use uuid::Uuid;
use validator::ValidationErrors;
use crate::config::Settings;
use crate::core::{ArtifactError, PipelineError, Predictor};
use crate::models::ErrorResponse;
use crate::services::load_predictor;

/// Application state shared across all handlers
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub strict_encoding: bool,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        let strict_encoding = predictor.encoder().mode() == crate::core::EncodingMode::Strict;
        Self {
            predictor,
            strict_encoding,
        }
    }

    /// Load every artifact named in `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, ArtifactError> {
        let predictor = load_predictor(&settings.artifacts, settings.encoder.mode())?;
        Ok(Self::new(predictor))
    }
}

/// Header carrying the id of the prediction request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag a prediction response, success or failure, with its request id
pub fn with_request_id(mut response: HttpResponse, request_id: Uuid) -> HttpResponse {
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(predict::configure)
        .service(web::scope("/dashboard").configure(dashboard::configure));
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.error.clone(),
            message: self.message.clone(),
            status_code: self.status_code,
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// 400 response for a request that failed field validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Map a scoring failure to its HTTP response
///
/// Bad payloads are 400. A shape mismatch means the artifacts and encoder
/// disagree, so the request is refused with 422 instead of scored.
pub fn pipeline_error_response(err: &PipelineError) -> HttpResponse {
    match err {
        PipelineError::ShapeMismatch { .. } => {
            tracing::error!("Refusing to score: {}", err);
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "Schema mismatch".to_string(),
                message: err.to_string(),
                status_code: 422,
            })
        }
        PipelineError::InvalidProbability(_) => {
            tracing::error!("Model produced an invalid score: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Scoring failed".to_string(),
                message: err.to_string(),
                status_code: 500,
            })
        }
        _ => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid input".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
    }
}
