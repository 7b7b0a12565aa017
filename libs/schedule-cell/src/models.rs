use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockReasonKind {
    Event,
    Leave,
    Manual,
}

/// A stretch of a dentist's calendar marked unavailable. Blocks are only
/// ever added; overlapping blocks for one dentist are kept as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub id: Uuid,
    pub dentist_ref: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason_kind: BlockReasonKind,
    pub reason_ref: Uuid,
    pub label: String,
    pub created_by_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRequest {
    pub dentist_ref: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason_kind: BlockReasonKind,
    pub reason_ref: Uuid,
    pub label: String,
    pub created_by_code: String,
}

impl BlockRequest {
    pub fn new(
        dentist_ref: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        reason_kind: BlockReasonKind,
        reason_ref: Uuid,
        label: impl Into<String>,
        created_by_code: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        if start > end {
            return Err(ScheduleError::ValidationError(
                "Block start must not be after its end".to_string(),
            ));
        }

        Ok(Self {
            dentist_ref,
            start,
            end,
            reason_kind,
            reason_ref,
            label: label.into(),
            created_by_code: created_by_code.into(),
        })
    }

    /// The same window and reason, for another dentist.
    pub fn for_dentist(&self, dentist_ref: Uuid) -> Self {
        Self {
            dentist_ref,
            ..self.clone()
        }
    }
}

/// Request body for blocking one dentist outside of an event, e.g. for an
/// approved leave.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualBlockRequest {
    pub dentist_ref: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason_kind: Option<BlockReasonKind>,
    pub reason_ref: Option<Uuid>,
    pub label: String,
    pub created_by_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicEvent {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_published: bool,
    pub is_deleted: bool,
    pub created_by_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_published: Option<bool>,
    pub created_by_code: String,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.title.trim().is_empty() {
            return Err(ScheduleError::ValidationError("Event title is required".to_string()));
        }

        if self.start_date > self.end_date {
            return Err(ScheduleError::ValidationError(
                "Event start date must not be after its end date".to_string(),
            ));
        }

        if self.created_by_code.trim().is_empty() {
            return Err(ScheduleError::ValidationError("created_by_code is required".to_string()));
        }

        Ok(())
    }
}

/// Event row ready to persist; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClinicEvent {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_published: bool,
    pub is_deleted: bool,
    pub created_by_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockOutcome {
    Blocked { dentist_ref: Uuid, block_id: Uuid },
    Failed { dentist_ref: Uuid, error: String },
}

impl BlockOutcome {
    pub fn dentist_ref(&self) -> Uuid {
        match self {
            BlockOutcome::Blocked { dentist_ref, .. } | BlockOutcome::Failed { dentist_ref, .. } => {
                *dentist_ref
            }
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, BlockOutcome::Blocked { .. })
    }
}

/// Diagnostics from blocking calendars for one event. Never decides whether
/// the event itself was created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockingReport {
    pub event_id: Uuid,
    pub outcomes: Vec<BlockOutcome>,
    pub directory_error: Option<String>,
}

impl BlockingReport {
    pub fn empty(event_id: Uuid) -> Self {
        Self {
            event_id,
            outcomes: Vec::new(),
            directory_error: None,
        }
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn blocked(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_blocked()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.blocked()
    }
}

#[derive(Debug, Clone)]
pub struct EventCreation {
    pub event: ClinicEvent,
    pub report: BlockingReport,
}
