//! Greedy earliest-fit placement.
//!
//! # Algorithm
//!
//! 1. Order demands by the dispatch policy (`ordering`), prerequisites
//!    before dependents.
//! 2. For each demand, scan free intervals chronologically and carve the
//!    needed duration out of the first interval with enough remaining
//!    capacity; a fully consumed interval is removed outright.
//! 3. A demand whose earliest possible slot finishes after its deadline is
//!    still placed there — availability wins over deadline feasibility —
//!    and flagged `PastDeadline`. A demand that fits nowhere is marked
//!    unscheduled with `no-capacity`.
//!
//! One pass, no backtracking, no randomness: identical problems yield
//! identical outcomes.
//!
//! # Complexity
//! O(n log n + n·f) for n demands and f free intervals.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::builder::SchedulingProblem;
use crate::models::{Placement, TimeInterval, Unscheduled, UnscheduledReason, Warning};
use crate::scheduler::ordering::{order_demands, OrderedDemands};

/// The scheduler's raw output, before reconciliation with the calendar.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOutcome {
    /// Successful placements, in placement (dispatch) order.
    pub placements: Vec<Placement>,
    /// Demands that could not be placed.
    pub unscheduled: Vec<Unscheduled>,
    /// Deadline-pressure annotations.
    pub warnings: Vec<Warning>,
}

impl ScheduleOutcome {
    /// Finds the placement for a task.
    pub fn placement_for(&self, task_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.task_id == task_id)
    }

    /// Finds the unscheduled entry for a task.
    pub fn unscheduled_for(&self, task_id: &str) -> Option<&Unscheduled> {
        self.unscheduled.iter().find(|u| u.task_id == task_id)
    }
}

/// Deterministic single-pass earliest-fit scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Maps each demand to a placement or an unscheduled entry.
    pub fn schedule(&self, problem: &SchedulingProblem) -> ScheduleOutcome {
        let mut free = problem.free_intervals.clone();
        let OrderedDemands { ordered, cyclic } = order_demands(problem.demands.clone());

        let mut outcome = ScheduleOutcome::default();
        let mut finished: HashMap<String, DateTime<Utc>> = HashMap::new();
        let mut failed: HashSet<String> = HashSet::new();

        for task_id in cyclic {
            failed.insert(task_id.clone());
            outcome
                .unscheduled
                .push(Unscheduled::new(task_id, UnscheduledReason::DependencyCycle));
        }

        for task in &ordered {
            // Prerequisite gate: a dependent may not start before its
            // prerequisites end, and falls through with them.
            let mut earliest = problem.horizon.start;
            let mut blocked_on: Option<String> = None;
            for dep in &task.depends_on {
                if failed.contains(dep.as_str()) {
                    blocked_on = Some(dep.clone());
                    break;
                }
                if let Some(&end) = finished.get(dep.as_str()) {
                    earliest = earliest.max(end);
                }
            }
            if let Some(dependency) = blocked_on {
                debug!(task = %task.id, %dependency, "prerequisite unscheduled, skipping dependent");
                outcome.unscheduled.push(Unscheduled::new(
                    task.id.clone(),
                    UnscheduledReason::DependencyUnscheduled { dependency },
                ));
                failed.insert(task.id.clone());
                continue;
            }

            match carve(&mut free, earliest, task.duration()) {
                Some(interval) => {
                    if let Some(deadline) = task.deadline {
                        if deadline < problem.horizon.start {
                            outcome.warnings.push(Warning::overdue(
                                task.id.clone(),
                                format!("deadline {deadline} predates the horizon; placed best-effort"),
                            ));
                        } else if interval.end > deadline {
                            let late = (interval.end - deadline).num_minutes();
                            outcome.warnings.push(Warning::past_deadline(
                                task.id.clone(),
                                format!("finishes {late}m past the deadline"),
                            ));
                        }
                    }
                    finished.insert(task.id.clone(), interval.end);
                    outcome.placements.push(Placement::new(task.id.clone(), interval));
                }
                None => {
                    outcome
                        .unscheduled
                        .push(Unscheduled::new(task.id.clone(), UnscheduledReason::NoCapacity));
                    failed.insert(task.id.clone());
                }
            }
        }

        outcome
    }
}

/// Carves `needed` time out of the first free interval that can hold it, no
/// earlier than `earliest`. The consumed range is removed from the free
/// set; surrounding remainders stay, fully consumed intervals vanish.
fn carve(
    free: &mut Vec<TimeInterval>,
    earliest: DateTime<Utc>,
    needed: Duration,
) -> Option<TimeInterval> {
    for idx in 0..free.len() {
        let iv = free[idx];
        let start = iv.start.max(earliest);
        let end = start + needed;
        if end <= iv.end {
            let mut remainder = Vec::with_capacity(2);
            if start > iv.start {
                remainder.push(TimeInterval::new(iv.start, start));
            }
            if end < iv.end {
                remainder.push(TimeInterval::new(end, iv.end));
            }
            free.splice(idx..=idx, remainder);
            return Some(TimeInterval::new(start, end));
        }
    }
    None
}
