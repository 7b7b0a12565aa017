use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;

use crate::models::CodeScope;
use crate::services::code::CodeGenerator;

#[axum::debug_handler]
pub async fn issue_next_code(
    State(generator): State<Arc<CodeGenerator>>,
    Path(scope): Path<String>,
) -> Result<Json<Value>, AppError> {
    let scope: CodeScope = scope.parse()?;
    let generated = generator.next_code(scope).await?;

    info!("Issued code {} for scope {}", generated.code, generated.scope);

    Ok(Json(json!(generated)))
}

#[axum::debug_handler]
pub async fn get_counter(
    State(generator): State<Arc<CodeGenerator>>,
    Path(scope): Path<String>,
) -> Result<Json<Value>, AppError> {
    let scope: CodeScope = scope.parse()?;
    let counter = generator.current(scope).await?;
    Ok(Json(json!(counter)))
}

#[axum::debug_handler]
pub async fn reset_counter(
    State(generator): State<Arc<CodeGenerator>>,
    Path(scope): Path<String>,
) -> Result<Json<Value>, AppError> {
    let scope: CodeScope = scope.parse()?;
    let counter = generator.reset(scope).await?;

    Ok(Json(json!({
        "scope": counter.scope,
        "seq": counter.seq,
        "reset": true
    })))
}
