use std::sync::Arc;

use axum::{
    Router,
    routing::post,
};

use crate::handlers;
use crate::services::lifecycle::OtpService;

pub fn otp_routes(service: Arc<OtpService>) -> Router {
    Router::new()
        .route("/issue", post(handlers::issue_code))
        .route("/verify", post(handlers::verify_code))
        .with_state(service)
}
