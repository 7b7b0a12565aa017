use std::sync::Arc;

use axum::{
    Router,
    routing::post,
};

use crate::handlers;
use crate::services::{blocker::SlotBlocker, event::EventService};

pub fn event_routes(service: Arc<EventService>) -> Router {
    Router::new()
        .route("/", post(handlers::create_event))
        .with_state(service)
}

pub fn block_routes(blocker: Arc<dyn SlotBlocker>) -> Router {
    Router::new()
        .route("/blocks", post(handlers::create_block))
        .with_state(blocker)
}
