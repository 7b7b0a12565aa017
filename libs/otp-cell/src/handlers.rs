use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{IssueOtpRequest, OtpValidation, VerifyOtpRequest};
use crate::services::lifecycle::OtpService;

#[axum::debug_handler]
pub async fn issue_code(
    State(service): State<Arc<OtpService>>,
    Json(request): Json<IssueOtpRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let issued = service.issue(request.appointment_id, &request.phone).await?;

    Ok((StatusCode::CREATED, Json(json!({
        "issued": true,
        "appointment_id": issued.owner_id,
        "expires_at": issued.expires_at
    }))))
}

#[axum::debug_handler]
pub async fn verify_code(
    State(service): State<Arc<OtpService>>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<OtpValidation>, AppError> {
    let validation = service
        .validate(request.appointment_id, &request.code, &request.phone)
        .await?;

    Ok(Json(validation))
}
