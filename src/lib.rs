//! Auto-scheduling engine for kanban task boards.
//!
//! Given the board's open tasks (duration estimate, optional deadline,
//! priority, tags) and a calendar of already-committed time, computes a
//! feasible assignment of tasks to concrete time intervals within a bounded
//! planning horizon, respecting working-hours constraints, and writes the
//! result back as tagged calendar events. Placement is greedy, single-pass,
//! and fully deterministic; repeated runs over unchanged inputs are
//! idempotent at the calendar.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `TimeInterval`, `Horizon`,
//!   `WorkingHoursProfile`, `CalendarEvent`, `Placement`, `RunReport`
//! - **`validation`**: Demand integrity checks (duplicate IDs, bad estimates)
//! - **`builder`**: Free-interval derivation (working windows minus busy time)
//! - **`scheduler`**: Deterministic ordering policy + greedy earliest-fit placement
//! - **`reconcile`**: Idempotent calendar writes and per-run write statistics
//! - **`adapters`**: Ports to the external board and calendar backends
//! - **`engine`**: The trigger operation running the whole pipeline once
//!
//! # Pipeline
//!
//! ```text
//! Autoscheduler::trigger
//!   ├── TaskSource::fetch_open_tasks ┐ (concurrent reads)
//!   ├── CalendarStore::list_events   ┘
//!   ├── normalize + screen demands
//!   ├── SchedulingProblem::build   (free intervals)
//!   ├── GreedyScheduler::schedule  (placements / unscheduled)
//!   ├── Reconciler::reconcile      (tagged event writes)
//!   └── RunOutcome
//! ```
//!
//! Task and calendar data are owned by external systems; the engine is
//! stateless between runs and reads a fresh snapshot every time.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Jackson (1955), earliest-due-date sequencing

pub mod adapters;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod scheduler;
pub mod validation;
