//! Result reconciler.
//!
//! Turns accepted placements into calendar writes and aggregates the
//! outcome. Writes are issued in placement start-time order; a failed write
//! records that task as `write-failed` and the run continues — there is no
//! cross-task transaction and nothing is rolled back.
//!
//! # Idempotency
//!
//! Every event the engine creates is tagged with its task id. Before
//! writing, the reconciler looks the tag up among the horizon's existing
//! events: an event already at the placement's exact interval is kept as-is
//! (no write), an event at a different interval is stale — it is deleted and
//! re-created at the new time. Repeated runs over unchanged inputs therefore
//! write nothing at all.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::adapters::CalendarStore;
use crate::models::{
    CalendarEvent, EventDraft, Placement, Task, Unscheduled, UnscheduledReason, WriteStats,
};

/// Description attached to events the engine creates.
const EVENT_DESCRIPTION: &str = "Scheduled by autoschedule";

/// What the write phase produced.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// Placements that now exist on the calendar, in start-time order.
    pub confirmed: Vec<Placement>,
    /// Placements whose write failed, as report entries.
    pub failed: Vec<Unscheduled>,
    /// Write statistics.
    pub stats: WriteStats,
}

/// Materializes placements on a calendar store.
pub struct Reconciler<'a, C> {
    calendar: &'a C,
}

impl<'a, C: CalendarStore> Reconciler<'a, C> {
    /// Creates a reconciler over a calendar store.
    pub fn new(calendar: &'a C) -> Self {
        Self { calendar }
    }

    /// Writes placements to the calendar, skipping or replacing existing
    /// tagged events.
    ///
    /// `demands` supplies event summaries (task titles); `existing` is the
    /// event snapshot the run was planned against.
    pub async fn reconcile(
        &self,
        placements: &[Placement],
        demands: &[Task],
        existing: &[CalendarEvent],
    ) -> ReconcileOutcome {
        let titles: HashMap<&str, &str> = demands
            .iter()
            .map(|t| (t.id.as_str(), t.title.as_str()))
            .collect();
        let tagged: HashMap<&str, &CalendarEvent> = existing
            .iter()
            .filter_map(|e| e.task_id.as_deref().map(|id| (id, e)))
            .collect();

        let mut ordered: Vec<Placement> = placements.to_vec();
        ordered.sort_by(|a, b| {
            a.interval
                .start
                .cmp(&b.interval.start)
                .then_with(|| a.task_id.cmp(&b.task_id))
        });

        let mut outcome = ReconcileOutcome::default();

        for placement in ordered {
            match tagged.get(placement.task_id.as_str()) {
                Some(event) if event.interval == placement.interval => {
                    debug!(task = %placement.task_id, event = %event.id, "event already in place");
                    outcome.stats.skipped_existing += 1;
                    outcome.confirmed.push(placement);
                }
                Some(event) => match self.calendar.delete_event(&event.id).await {
                    Ok(()) => match self.create(&placement, &titles).await {
                        Ok(()) => {
                            outcome.stats.replaced += 1;
                            outcome.confirmed.push(placement);
                        }
                        Err(message) => record_failure(&mut outcome, placement, message),
                    },
                    Err(err) => record_failure(
                        &mut outcome,
                        placement,
                        format!("failed to replace stale event {}: {err}", event.id),
                    ),
                },
                None => match self.create(&placement, &titles).await {
                    Ok(()) => {
                        outcome.stats.created += 1;
                        outcome.confirmed.push(placement);
                    }
                    Err(message) => record_failure(&mut outcome, placement, message),
                },
            }
        }

        info!(
            created = outcome.stats.created,
            replaced = outcome.stats.replaced,
            skipped = outcome.stats.skipped_existing,
            failed = outcome.failed.len(),
            "reconcile complete"
        );
        outcome
    }

    async fn create(
        &self,
        placement: &Placement,
        titles: &HashMap<&str, &str>,
    ) -> Result<(), String> {
        let summary = titles
            .get(placement.task_id.as_str())
            .copied()
            .filter(|t| !t.is_empty())
            .unwrap_or(placement.task_id.as_str());
        let draft = EventDraft::new(placement.task_id.as_str(), summary, placement.interval)
            .with_description(EVENT_DESCRIPTION);
        self.calendar
            .create_event(&draft)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

fn record_failure(outcome: &mut ReconcileOutcome, placement: Placement, message: String) {
    warn!(task = %placement.task_id, %message, "calendar write failed, continuing");
    if outcome.stats.first_error.is_none() {
        outcome.stats.first_error = Some(message.clone());
    }
    outcome.failed.push(Unscheduled::new(
        placement.task_id,
        UnscheduledReason::WriteFailed { message },
    ));
}
