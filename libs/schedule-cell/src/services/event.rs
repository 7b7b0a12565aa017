use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use sequence_cell::{CodeGenerator, CodeScope};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::error::ScheduleError;
use crate::models::{BlockingReport, ClinicEvent, CreateEventRequest, EventCreation, NewClinicEvent};
use crate::services::directory::DentistDirectory;
use crate::services::orchestrator::EventScheduleOrchestrator;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert_event(&self, event: NewClinicEvent) -> Result<ClinicEvent, ScheduleError>;
}

pub struct SupabaseEventStore {
    supabase: SupabaseClient,
}

impl SupabaseEventStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl EventStore for SupabaseEventStore {
    async fn insert_event(&self, event: NewClinicEvent) -> Result<ClinicEvent, ScheduleError> {
        let row = json!({
            "code": event.code,
            "title": event.title,
            "description": event.description,
            "start_date": event.start_date.to_rfc3339(),
            "end_date": event.end_date.to_rfc3339(),
            "is_published": event.is_published,
            "is_deleted": event.is_deleted,
            "created_by_code": event.created_by_code,
            "created_at": Utc::now().to_rfc3339()
        });

        self.supabase
            .insert_returning("clinic_events", row)
            .await
            .map_err(|e| {
                error!("Failed to store clinic event {}: {}", event.code, e);
                ScheduleError::StorageError(e.to_string())
            })
    }
}

/// Keeps events in process memory; for tests and local development.
#[derive(Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<ClinicEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<ClinicEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn insert_event(&self, event: NewClinicEvent) -> Result<ClinicEvent, ScheduleError> {
        let stored = ClinicEvent {
            id: Uuid::new_v4(),
            code: event.code,
            title: event.title,
            description: event.description,
            start_date: event.start_date,
            end_date: event.end_date,
            is_published: event.is_published,
            is_deleted: event.is_deleted,
            created_by_code: event.created_by_code,
            created_at: Utc::now(),
        };

        self.events.lock().await.push(stored.clone());
        Ok(stored)
    }
}

/// Creates clinic-wide events. Code generation and the event insert are
/// the only steps that can fail creation; calendar blocking afterwards is
/// best effort.
pub struct EventService {
    codes: Arc<CodeGenerator>,
    events: Arc<dyn EventStore>,
    directory: Arc<dyn DentistDirectory>,
    orchestrator: EventScheduleOrchestrator,
}

impl EventService {
    pub fn new(
        codes: Arc<CodeGenerator>,
        events: Arc<dyn EventStore>,
        directory: Arc<dyn DentistDirectory>,
        orchestrator: EventScheduleOrchestrator,
    ) -> Self {
        Self {
            codes,
            events,
            directory,
            orchestrator,
        }
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> Result<EventCreation, ScheduleError> {
        request.validate()?;

        let generated = self.codes.next_code(CodeScope::Event).await?;

        let event = self.events.insert_event(NewClinicEvent {
            code: generated.code,
            title: request.title.trim().to_string(),
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            is_published: request.is_published.unwrap_or(true),
            is_deleted: false,
            created_by_code: request.created_by_code,
        }).await?;

        info!("Clinic event {} created ({})", event.code, event.id);

        let report = match self.directory.active_dentists().await {
            Ok(dentists) => self.orchestrator.block_for_event(&event, &dentists).await,
            Err(e) => {
                warn!("Skipping slot blocking for event {}: {}", event.code, e);
                BlockingReport {
                    directory_error: Some(e.to_string()),
                    ..BlockingReport::empty(event.id)
                }
            }
        };

        Ok(EventCreation { event, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::blocker::MockSlotBlocker;
    use crate::services::directory::MockDentistDirectory;
    use assert_matches::assert_matches;
    use chrono::Duration;
    use sequence_cell::InMemoryCounterStore;

    fn request() -> CreateEventRequest {
        let start = Utc::now() + Duration::days(3);
        CreateEventRequest {
            title: "Vesak holiday".to_string(),
            description: Some("Clinic closed".to_string()),
            start_date: start,
            end_date: start + Duration::days(1),
            is_published: None,
            created_by_code: "ADM-001".to_string(),
        }
    }

    fn codes() -> Arc<CodeGenerator> {
        Arc::new(CodeGenerator::new(Arc::new(InMemoryCounterStore::new())))
    }

    #[tokio::test]
    async fn test_directory_failure_keeps_event() {
        let mut directory = MockDentistDirectory::new();
        directory
            .expect_active_dentists()
            .times(1)
            .returning(|| Err(ScheduleError::DirectoryError("timeout".to_string())));

        let mut blocker = MockSlotBlocker::new();
        blocker.expect_block_slots().times(0);

        let store = Arc::new(InMemoryEventStore::new());
        let service = EventService::new(
            codes(),
            store.clone(),
            Arc::new(directory),
            EventScheduleOrchestrator::new(Arc::new(blocker)),
        );

        let creation = service.create_event(request()).await.unwrap();

        assert_eq!(creation.event.code, "EVT-001");
        assert!(creation.report.directory_error.is_some());
        assert_eq!(store.events().await.len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_fails_creation_before_blocking() {
        let mut events = MockEventStore::new();
        events
            .expect_insert_event()
            .times(1)
            .returning(|_| Err(ScheduleError::StorageError("insert failed".to_string())));

        let mut directory = MockDentistDirectory::new();
        directory.expect_active_dentists().times(0);

        let mut blocker = MockSlotBlocker::new();
        blocker.expect_block_slots().times(0);

        let service = EventService::new(
            codes(),
            Arc::new(events),
            Arc::new(directory),
            EventScheduleOrchestrator::new(Arc::new(blocker)),
        );

        let result = service.create_event(request()).await;
        assert_matches!(result, Err(ScheduleError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_consumes_no_code() {
        let codes = codes();
        let mut events = MockEventStore::new();
        events.expect_insert_event().times(0);

        let service = EventService::new(
            codes.clone(),
            Arc::new(events),
            Arc::new(MockDentistDirectory::new()),
            EventScheduleOrchestrator::new(Arc::new(MockSlotBlocker::new())),
        );

        let mut bad = request();
        bad.title = String::new();

        assert_matches!(service.create_event(bad).await, Err(ScheduleError::ValidationError(_)));
        assert_eq!(codes.current(CodeScope::Event).await.unwrap().seq, 0);
    }
}
