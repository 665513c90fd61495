//! Run report and trigger response models.
//!
//! A run's aggregate output: the placements that materialized, the tasks
//! that did not (with a machine-readable reason each), warning annotations,
//! and write statistics. `RunOutcome` is the wire shape returned by the
//! trigger operation.

use serde::{Deserialize, Serialize};

use super::TimeInterval;

/// A concrete time assignment of one task.
///
/// The interval's length equals the task's estimate and lies fully inside
/// one free interval of the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Placed task id.
    pub task_id: String,
    /// Assigned time range.
    pub interval: TimeInterval,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(task_id: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            task_id: task_id.into(),
            interval,
        }
    }
}

/// Why a task could not be materialized this run.
///
/// Serializes with a kebab-case `reason` code; variants carrying context
/// flatten it alongside (`{"reason":"write-failed","message":"..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum UnscheduledReason {
    /// No free interval had enough remaining capacity.
    NoCapacity,
    /// The calendar rejected the event write.
    WriteFailed { message: String },
    /// A prerequisite task was itself not scheduled.
    DependencyUnscheduled { dependency: String },
    /// The task sits on a dependency cycle.
    DependencyCycle,
    /// The demand failed input screening.
    InvalidDemand { message: String },
}

impl UnscheduledReason {
    /// The stable reason code, as serialized.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoCapacity => "no-capacity",
            Self::WriteFailed { .. } => "write-failed",
            Self::DependencyUnscheduled { .. } => "dependency-unscheduled",
            Self::DependencyCycle => "dependency-cycle",
            Self::InvalidDemand { .. } => "invalid-demand",
        }
    }
}

/// One task that was not scheduled, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unscheduled {
    /// The task id.
    pub task_id: String,
    /// The reason it fell through.
    #[serde(flatten)]
    pub reason: UnscheduledReason,
}

impl Unscheduled {
    /// Creates a new unscheduled entry.
    pub fn new(task_id: impl Into<String>, reason: UnscheduledReason) -> Self {
        Self {
            task_id: task_id.into(),
            reason,
        }
    }
}

/// Classification of non-fatal annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Placed, but the placement ends after the task's deadline.
    PastDeadline,
    /// The deadline already predates the horizon start; placed best-effort.
    Overdue,
}

/// A warning annotation on the run report.
///
/// Warnings never change a placement; they surface deadline pressure the
/// greedy policy chose to accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Warning classification.
    pub kind: WarningKind,
    /// Related task id.
    pub task_id: String,
    /// Human-readable description.
    pub message: String,
}

impl Warning {
    /// Creates a past-deadline warning.
    pub fn past_deadline(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::PastDeadline,
            task_id: task_id.into(),
            message: message.into(),
        }
    }

    /// Creates an overdue warning.
    pub fn overdue(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Overdue,
            task_id: task_id.into(),
            message: message.into(),
        }
    }
}

/// Overall disposition of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// Every demand was placed and materialized on the calendar.
    AllScheduled,
    /// Some tasks materialized, some did not.
    Partial,
    /// No task materialized.
    Failed,
}

/// Calendar-write statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteStats {
    /// Events newly created.
    pub created: usize,
    /// Stale events replaced (placement moved since a prior run).
    pub replaced: usize,
    /// Placements whose event already existed at the same time; no write.
    pub skipped_existing: usize,
    /// First write error encountered, if any.
    pub first_error: Option<String>,
}

/// The aggregate output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Overall disposition.
    pub status: RunStatus,
    /// Materialized placements, in start-time order.
    pub placements: Vec<Placement>,
    /// Tasks that were not scheduled, with reasons.
    pub unscheduled: Vec<Unscheduled>,
    /// Deadline-pressure annotations.
    pub warnings: Vec<Warning>,
    /// Calendar-write statistics.
    pub writes: WriteStats,
}

impl RunReport {
    /// Number of tasks that materialized.
    pub fn scheduled_count(&self) -> usize {
        self.placements.len()
    }

    /// Number of tasks that fell through.
    pub fn unscheduled_count(&self) -> usize {
        self.unscheduled.len()
    }

    /// Scheduled task ids, in placement start order.
    pub fn scheduled_task_ids(&self) -> Vec<String> {
        self.placements.iter().map(|p| p.task_id.clone()).collect()
    }

    /// Finds the placement for a task.
    pub fn placement_for(&self, task_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.task_id == task_id)
    }

    /// Finds the unscheduled entry for a task.
    pub fn unscheduled_for(&self, task_id: &str) -> Option<&Unscheduled> {
        self.unscheduled.iter().find(|u| u.task_id == task_id)
    }
}

/// Count and ids of the tasks placed by a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSummary {
    /// Number of placed tasks.
    pub count: usize,
    /// Their ids, in placement start order.
    pub task_ids: Vec<String>,
}

/// The structured trigger response.
///
/// `success` means the pipeline executed to completion — a run with
/// unscheduled tasks is still a success. It is `false` only when an input
/// adapter was unreachable, in which case `error` carries the cause and
/// nothing was scheduled or written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Whether the run completed.
    pub success: bool,
    /// Placed tasks.
    pub scheduled: ScheduledSummary,
    /// Tasks not placed, with reasons.
    pub unscheduled: Vec<Unscheduled>,
    /// Abort cause; present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Full report; absent when the run aborted before scheduling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RunReport>,
}

impl RunOutcome {
    /// Wraps a completed run's report.
    pub fn from_report(report: RunReport) -> Self {
        Self {
            success: true,
            scheduled: ScheduledSummary {
                count: report.scheduled_count(),
                task_ids: report.scheduled_task_ids(),
            },
            unscheduled: report.unscheduled.clone(),
            error: None,
            report: Some(report),
        }
    }

    /// Wraps an abort-level failure.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            scheduled: ScheduledSummary::default(),
            unscheduled: Vec::new(),
            error: Some(message.into()),
            report: None,
        }
    }
}
