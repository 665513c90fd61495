//! The trigger operation.
//!
//! `Autoscheduler` owns the two adapter ports, the working-hours profile,
//! and the engine config, and runs the whole pipeline once per trigger:
//!
//! ```text
//! reads (concurrent) → normalize → screen → build → schedule → reconcile
//! ```
//!
//! Each invocation is one self-contained, synchronous run over a fresh
//! snapshot; the only suspension points are the adapter calls. Nothing is
//! retried and no state survives between runs — a failed run is always safe
//! to re-trigger because writes are idempotent. Concurrent triggers against
//! the same calendar are not coordinated here; deployments that can fire
//! them need a run-level mutual-exclusion guard in front of the engine, and
//! until then the idempotency tag is the only protection against duplicate
//! writes.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::adapters::{normalize_tasks, CalendarStore, TaskSource};
use crate::builder::SchedulingProblem;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    Horizon, RunOutcome, RunReport, RunStatus, TimeInterval, WorkingHoursProfile,
};
use crate::reconcile::Reconciler;
use crate::scheduler::GreedyScheduler;
use crate::validation::screen_demands;

/// The auto-scheduling engine.
///
/// Stateless between runs: both collaborators are re-read on every trigger.
pub struct Autoscheduler<S, C> {
    source: S,
    calendar: C,
    profile: WorkingHoursProfile,
    config: EngineConfig,
}

impl<S: TaskSource, C: CalendarStore> Autoscheduler<S, C> {
    /// Creates an engine over its collaborators.
    pub fn new(source: S, calendar: C, profile: WorkingHoursProfile, config: EngineConfig) -> Self {
        Self {
            source,
            calendar,
            profile,
            config,
        }
    }

    /// Runs one scheduling pass over the configured horizon.
    ///
    /// `now` is the horizon start; passing it in (rather than reading a
    /// clock) keeps runs reproducible. Never panics and never returns an
    /// `Err`: abort-level failures come back as `success: false` with the
    /// cause in `error`.
    pub async fn trigger(&self, now: DateTime<Utc>) -> RunOutcome {
        self.trigger_with_horizon(now, self.config.horizon_length())
            .await
    }

    /// Runs one scheduling pass with an explicit horizon length.
    pub async fn trigger_with_horizon(&self, now: DateTime<Utc>, length: Duration) -> RunOutcome {
        match self.run(Horizon::starting_at(now, length)).await {
            Ok(report) => RunOutcome::from_report(report),
            Err(err) => {
                warn!(error = %err, "run aborted before scheduling");
                RunOutcome::from_error(err.to_string())
            }
        }
    }

    async fn run(&self, horizon: Horizon) -> Result<RunReport> {
        info!(start = %horizon.start, end = %horizon.end, "autoschedule run starting");

        // The two reads are independent; issue them concurrently.
        let (tasks, events) = tokio::join!(
            self.source.fetch_open_tasks(),
            self.calendar.list_events(&horizon),
        );
        let raw = tasks.map_err(EngineError::SourceUnavailable)?;
        let events = events.map_err(EngineError::CalendarUnavailable)?;
        debug!(tasks = raw.len(), events = events.len(), "snapshot read");

        let demands = normalize_tasks(raw, &self.config);
        let (demands, rejected) = screen_demands(demands);

        // Events tagged for a task we are about to (re)plan are the engine's
        // own prior output, not busy time; everything else blocks the slot.
        let demand_ids: HashSet<&str> = demands.iter().map(|t| t.id.as_str()).collect();
        let busy: Vec<TimeInterval> = events
            .iter()
            .filter(|e| match e.task_id.as_deref() {
                Some(id) => !demand_ids.contains(id),
                None => true,
            })
            .map(|e| e.interval)
            .collect();

        let problem = SchedulingProblem::build(
            horizon,
            &self.profile,
            &busy,
            demands,
            self.config.min_slot(),
        );
        debug!(
            free = problem.free_intervals.len(),
            demands = problem.demands.len(),
            "problem built"
        );

        let outcome = GreedyScheduler::new().schedule(&problem);
        let reconciled = Reconciler::new(&self.calendar)
            .reconcile(&outcome.placements, &problem.demands, &events)
            .await;

        let mut unscheduled = rejected;
        unscheduled.extend(outcome.unscheduled);
        unscheduled.extend(reconciled.failed);

        let status = if unscheduled.is_empty() {
            RunStatus::AllScheduled
        } else if reconciled.confirmed.is_empty() {
            RunStatus::Failed
        } else {
            RunStatus::Partial
        };

        info!(
            scheduled = reconciled.confirmed.len(),
            unscheduled = unscheduled.len(),
            status = ?status,
            "run complete"
        );

        Ok(RunReport {
            status,
            placements: reconciled.confirmed,
            unscheduled,
            warnings: outcome.warnings,
            writes: reconciled.stats,
        })
    }
}
