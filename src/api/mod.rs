pub mod attendance;
pub mod employee;

use crate::error::ApiError;
use actix_web::{HttpRequest, HttpResponse, Responder, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

/// Health message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = Object, example = json!({
            "message": "HRMS Backend with Database is running"
        }))
    ),
    tag = "Health"
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "HRMS Backend with Database is running"
    }))
}

/// JSON extractor config: malformed bodies, missing fields and bad dates
/// become 422 responses instead of actix's default 400 text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        debug!(error = %err, path = %req.path(), "Rejected request body");
        ApiError::InvalidPayload(err.to_string()).into()
    })
}
