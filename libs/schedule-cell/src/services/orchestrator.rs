use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{BlockOutcome, BlockReasonKind, BlockRequest, BlockingReport, ClinicEvent};
use crate::services::blocker::SlotBlocker;

/// Fans a clinic-wide event out to every dentist's calendar.
pub struct EventScheduleOrchestrator {
    blocker: Arc<dyn SlotBlocker>,
}

impl EventScheduleOrchestrator {
    pub fn new(blocker: Arc<dyn SlotBlocker>) -> Self {
        Self { blocker }
    }

    /// One block per dentist, all in flight at once. A failing dentist is
    /// logged and recorded; the rest still get their block. The report is
    /// diagnostic and the caller's outcome never depends on it.
    pub async fn block_for_event(&self, event: &ClinicEvent, dentists: &[Uuid]) -> BlockingReport {
        let mut report = BlockingReport::empty(event.id);

        if dentists.is_empty() {
            info!("No active dentists to block for event {}", event.code);
            return report;
        }

        let base = match BlockRequest::new(
            dentists[0],
            event.start_date,
            event.end_date,
            BlockReasonKind::Event,
            event.id,
            event.title.clone(),
            event.created_by_code.clone(),
        ) {
            Ok(request) => request,
            Err(e) => {
                warn!("Event {} has an invalid window, no slots blocked: {}", event.code, e);
                report.outcomes = dentists
                    .iter()
                    .map(|dentist_ref| BlockOutcome::Failed {
                        dentist_ref: *dentist_ref,
                        error: e.to_string(),
                    })
                    .collect();
                return report;
            }
        };

        let calls = dentists.iter().map(|dentist_ref| {
            let request = base.for_dentist(*dentist_ref);
            let blocker = self.blocker.clone();
            async move {
                let dentist_ref = request.dentist_ref;
                match blocker.block_slots(request).await {
                    Ok(block) => BlockOutcome::Blocked {
                        dentist_ref,
                        block_id: block.id,
                    },
                    Err(e) => {
                        warn!("Could not block dentist {} for event {}: {}", dentist_ref, event.code, e);
                        BlockOutcome::Failed {
                            dentist_ref,
                            error: e.to_string(),
                        }
                    }
                }
            }
        });

        report.outcomes = join_all(calls).await;

        info!(
            "Event {} blocked {}/{} dentist calendars",
            event.code,
            report.blocked(),
            report.attempted()
        );

        report
    }
}
