use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use otp_cell::{otp_routes, OtpService};
use schedule_cell::{block_routes, event_routes, EventService, SlotBlocker};
use sequence_cell::{sequence_routes, CodeGenerator};

pub struct AppServices {
    pub codes: Arc<CodeGenerator>,
    pub otp: Arc<OtpService>,
    pub events: Arc<EventService>,
    pub blocker: Arc<dyn SlotBlocker>,
}

pub fn create_router(services: AppServices) -> Router {
    Router::new()
        .route("/", get(|| async { "Dental Clinic API is running!" }))
        .nest("/sequences", sequence_routes(services.codes))
        .nest("/otp", otp_routes(services.otp))
        .nest("/events", event_routes(services.events))
        .nest("/schedule", block_routes(services.blocker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use otp_cell::{InMemoryOtpStore, LogOnlySender};
    use schedule_cell::{
        EventScheduleOrchestrator, InMemoryEventStore, InMemorySlotBlocker, StaticDentistDirectory,
    };
    use sequence_cell::InMemoryCounterStore;
    use tower::ServiceExt;

    fn in_memory_services() -> AppServices {
        let codes = Arc::new(CodeGenerator::new(Arc::new(InMemoryCounterStore::new())));
        let blocker: Arc<dyn SlotBlocker> = Arc::new(InMemorySlotBlocker::new());
        let events = Arc::new(EventService::new(
            codes.clone(),
            Arc::new(InMemoryEventStore::new()),
            Arc::new(StaticDentistDirectory::new(Vec::new())),
            EventScheduleOrchestrator::new(blocker.clone()),
        ));

        AppServices {
            codes,
            otp: Arc::new(OtpService::new(Arc::new(InMemoryOtpStore::new()), Arc::new(LogOnlySender))),
            events,
            blocker,
        }
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let app = create_router(in_memory_services());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cells_are_mounted() {
        let app = create_router(in_memory_services());

        let response = app
            .clone()
            .oneshot(Request::builder().method("POST").uri("/sequences/supplier/next").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/sequences/supplier").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
