//! Scheduler: deterministic ordering policy + greedy earliest-fit placement.
//!
//! The placement policy is greedy, single pass, and never revisits an
//! earlier decision. This trades optimality for predictability and
//! O(n log n) cost: a later tightly-deadlined task can be starved by an
//! earlier task that consumed the only large-enough interval. That is the
//! documented behavior, not a defect — tests assert the ordering, never
//! optimality.
//!
//! # Usage
//!
//! ```
//! use autoschedule::builder::SchedulingProblem;
//! use autoschedule::scheduler::GreedyScheduler;
//! # use autoschedule::models::{Horizon, WorkingHoursProfile};
//! # use chrono::{Duration, TimeZone, Utc};
//!
//! # let horizon = Horizon::starting_at(
//! #     Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
//! #     Duration::days(1),
//! # );
//! let problem = SchedulingProblem::build(
//!     horizon,
//!     &WorkingHoursProfile::business_hours(),
//!     &[],
//!     Vec::new(),
//!     Duration::zero(),
//! );
//! let outcome = GreedyScheduler::new().schedule(&problem);
//! assert!(outcome.placements.is_empty());
//! ```

mod greedy;
mod ordering;

pub use greedy::{GreedyScheduler, ScheduleOutcome};
pub use ordering::{demand_order, order_demands, OrderedDemands};
