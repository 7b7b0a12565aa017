use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{BlockReasonKind, BlockRequest, ClinicEvent, CreateEventRequest, ManualBlockRequest, ScheduleBlock};
use crate::services::{blocker::SlotBlocker, event::EventService};

/// Calendar blocking failures are not part of the response: the event was
/// created either way.
#[axum::debug_handler]
pub async fn create_event(
    State(service): State<Arc<EventService>>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<ClinicEvent>), AppError> {
    let creation = service.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(creation.event)))
}

#[axum::debug_handler]
pub async fn create_block(
    State(blocker): State<Arc<dyn SlotBlocker>>,
    Json(request): Json<ManualBlockRequest>,
) -> Result<(StatusCode, Json<ScheduleBlock>), AppError> {
    if request.label.trim().is_empty() {
        return Err(AppError::ValidationError("Block label is required".to_string()));
    }

    let block_request = BlockRequest::new(
        request.dentist_ref,
        request.start,
        request.end,
        request.reason_kind.unwrap_or(BlockReasonKind::Manual),
        request.reason_ref.unwrap_or_else(Uuid::new_v4),
        request.label,
        request.created_by_code,
    )?;

    let block = blocker.block_slots(block_request).await?;
    Ok((StatusCode::CREATED, Json(block)))
}
