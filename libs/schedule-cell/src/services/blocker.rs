use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, error};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::error::ScheduleError;
use crate::models::{BlockRequest, ScheduleBlock};

/// Writes one unavailability block per call. No overlap check and no merge:
/// two identical requests give two blocks. Storage errors are returned as-is,
/// never retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlotBlocker: Send + Sync {
    async fn block_slots(&self, request: BlockRequest) -> Result<ScheduleBlock, ScheduleError>;
}

pub struct SupabaseSlotBlocker {
    supabase: SupabaseClient,
}

impl SupabaseSlotBlocker {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl SlotBlocker for SupabaseSlotBlocker {
    async fn block_slots(&self, request: BlockRequest) -> Result<ScheduleBlock, ScheduleError> {
        debug!("Blocking dentist {} from {} to {}", request.dentist_ref, request.start, request.end);

        let row = json!({
            "dentist_ref": request.dentist_ref,
            "start": request.start.to_rfc3339(),
            "end": request.end.to_rfc3339(),
            "reason_kind": request.reason_kind,
            "reason_ref": request.reason_ref,
            "label": request.label,
            "created_by_code": request.created_by_code,
            "created_at": Utc::now().to_rfc3339()
        });

        let block: ScheduleBlock = self.supabase
            .insert_returning("schedule_blocks", row)
            .await
            .map_err(|e| {
                error!("Failed to store schedule block for dentist {}: {}", request.dentist_ref, e);
                ScheduleError::StorageError(e.to_string())
            })?;

        debug!("Schedule block {} created", block.id);
        Ok(block)
    }
}

/// Keeps blocks in process memory; for tests and local development.
#[derive(Default)]
pub struct InMemorySlotBlocker {
    blocks: Mutex<Vec<ScheduleBlock>>,
}

impl InMemorySlotBlocker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn blocks(&self) -> Vec<ScheduleBlock> {
        self.blocks.lock().await.clone()
    }

    pub async fn blocks_for(&self, dentist_ref: Uuid) -> Vec<ScheduleBlock> {
        self.blocks
            .lock()
            .await
            .iter()
            .filter(|b| b.dentist_ref == dentist_ref)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SlotBlocker for InMemorySlotBlocker {
    async fn block_slots(&self, request: BlockRequest) -> Result<ScheduleBlock, ScheduleError> {
        let block = ScheduleBlock {
            id: Uuid::new_v4(),
            dentist_ref: request.dentist_ref,
            start: request.start,
            end: request.end,
            reason_kind: request.reason_kind,
            reason_ref: request.reason_ref,
            label: request.label,
            created_by_code: request.created_by_code,
            created_at: Utc::now(),
        };

        self.blocks.lock().await.push(block.clone());
        Ok(block)
    }
}
