use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::code::CodeGenerator;

pub fn sequence_routes(generator: Arc<CodeGenerator>) -> Router {
    Router::new()
        .route("/{scope}", get(handlers::get_counter))
        .route("/{scope}/next", post(handlers::issue_next_code))
        .route("/{scope}/reset", post(handlers::reset_counter))
        .with_state(generator)
}
