//! Constraint model builder.
//!
//! Combines the working-hours profile, the calendar's busy intervals, and
//! the normalized demands into a single scheduling problem instance: a
//! sorted list of free intervals plus the demands to place into them.
//!
//! # Algorithm
//!
//! 1. Enumerate the profile's working windows for every local date the
//!    horizon touches; convert to UTC; clamp to the horizon.
//! 2. Merge overlapping busy intervals, then subtract them from the
//!    windows, keeping the remaining sub-windows.
//! 3. Discard fragments shorter than `min_slot` (zero-length fragments are
//!    always discarded) and sort what remains by start time.
//!
//! The builder never judges feasibility: a demand larger than every free
//! interval still reaches the scheduler, which is where infeasibility is
//! decided and reported.

use chrono::Duration;

use crate::models::{Horizon, Task, TimeInterval, WorkingHoursProfile};

/// A fully-prepared scheduling problem: free time plus demands.
///
/// Ephemeral — rebuilt from a fresh snapshot on every run.
#[derive(Debug, Clone)]
pub struct SchedulingProblem {
    /// The planning window.
    pub horizon: Horizon,
    /// Schedulable time, pairwise disjoint and sorted by start.
    pub free_intervals: Vec<TimeInterval>,
    /// Demands awaiting placement.
    pub demands: Vec<Task>,
}

impl SchedulingProblem {
    /// Builds the problem instance for one run.
    pub fn build(
        horizon: Horizon,
        profile: &WorkingHoursProfile,
        busy: &[TimeInterval],
        demands: Vec<Task>,
        min_slot: Duration,
    ) -> Self {
        let windows = working_windows(profile, &horizon);
        let busy = merge_intervals(busy);
        let mut free = subtract_busy(&windows, &busy);
        free.retain(|iv| !iv.is_empty() && iv.duration() >= min_slot);
        free.sort_by_key(|iv| iv.start);

        Self {
            horizon,
            free_intervals: free,
            demands,
        }
    }

    /// Total schedulable time across all free intervals.
    pub fn total_free(&self) -> Duration {
        self.free_intervals
            .iter()
            .fold(Duration::zero(), |acc, iv| acc + iv.duration())
    }
}

/// Working windows within the horizon, clamped and sorted.
fn working_windows(profile: &WorkingHoursProfile, horizon: &Horizon) -> Vec<TimeInterval> {
    let mut windows = Vec::new();
    let bounds = horizon.interval();

    let mut date = profile.local_date(horizon.start);
    let last = profile.local_date(horizon.end);
    while date <= last {
        for window in profile.windows_for(date) {
            if let Some(clamped) = window.intersect(&bounds) {
                windows.push(clamped);
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    windows.sort_by_key(|iv| iv.start);
    windows
}

/// Merges overlapping or touching intervals into a sorted disjoint set.
pub(crate) fn merge_intervals(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted: Vec<TimeInterval> = intervals.iter().filter(|iv| !iv.is_empty()).copied().collect();
    sorted.sort_by_key(|iv| iv.start);

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        match merged.last_mut() {
            Some(last) if iv.start <= last.end => {
                last.end = last.end.max(iv.end);
            }
            _ => merged.push(iv),
        }
    }
    merged
}

/// Subtracts a sorted disjoint busy set from each window.
fn subtract_busy(windows: &[TimeInterval], busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut free = Vec::new();

    for window in windows {
        let mut cursor = window.start;
        for block in busy {
            if block.end <= cursor {
                continue;
            }
            if block.start >= window.end {
                break;
            }
            if block.start > cursor {
                free.push(TimeInterval::new(cursor, block.start.min(window.end)));
            }
            cursor = cursor.max(block.end);
            if cursor >= window.end {
                break;
            }
        }
        if cursor < window.end {
            free.push(TimeInterval::new(cursor, window.end));
        }
    }

    free
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, d, h, m, 0).unwrap()
    }

    fn assert_disjoint_sorted(intervals: &[TimeInterval]) {
        for pair in intervals.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{pair:?} overlap or disorder");
        }
    }

    #[test]
    fn test_merge_intervals() {
        let merged = merge_intervals(&[
            TimeInterval::new(at(5, 10, 0), at(5, 11, 0)),
            TimeInterval::new(at(5, 9, 0), at(5, 10, 30)),
            TimeInterval::new(at(5, 13, 0), at(5, 14, 0)),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], TimeInterval::new(at(5, 9, 0), at(5, 11, 0)));
        assert_eq!(merged[1], TimeInterval::new(at(5, 13, 0), at(5, 14, 0)));
    }

    #[test]
    fn test_merge_touching() {
        let merged = merge_intervals(&[
            TimeInterval::new(at(5, 9, 0), at(5, 10, 0)),
            TimeInterval::new(at(5, 10, 0), at(5, 11, 0)),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].duration(), Duration::hours(2));
    }

    #[test]
    fn test_single_clear_day() {
        // Monday 2026-01-05, horizon 09:00 → one full business day free.
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(1));
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &[],
            Vec::new(),
            Duration::zero(),
        );
        assert_eq!(problem.free_intervals.len(), 1);
        assert_eq!(
            problem.free_intervals[0],
            TimeInterval::new(at(5, 9, 0), at(5, 17, 0))
        );
        assert_eq!(problem.total_free(), Duration::hours(8));
    }

    #[test]
    fn test_busy_splits_window() {
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(1));
        let busy = [TimeInterval::new(at(5, 11, 0), at(5, 12, 0))];
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &busy,
            Vec::new(),
            Duration::zero(),
        );
        assert_eq!(problem.free_intervals.len(), 2);
        assert_eq!(
            problem.free_intervals[0],
            TimeInterval::new(at(5, 9, 0), at(5, 11, 0))
        );
        assert_eq!(
            problem.free_intervals[1],
            TimeInterval::new(at(5, 12, 0), at(5, 17, 0))
        );
        assert_disjoint_sorted(&problem.free_intervals);
    }

    #[test]
    fn test_busy_at_window_edges() {
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(1));
        // One block overlapping the morning edge, one swallowing the afternoon tail.
        let busy = [
            TimeInterval::new(at(5, 8, 0), at(5, 10, 0)),
            TimeInterval::new(at(5, 16, 0), at(5, 18, 0)),
        ];
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &busy,
            Vec::new(),
            Duration::zero(),
        );
        assert_eq!(problem.free_intervals.len(), 1);
        assert_eq!(
            problem.free_intervals[0],
            TimeInterval::new(at(5, 10, 0), at(5, 16, 0))
        );
    }

    #[test]
    fn test_busy_covering_whole_window_leaves_nothing() {
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(1));
        let busy = [TimeInterval::new(at(5, 8, 0), at(5, 18, 0))];
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &busy,
            Vec::new(),
            Duration::zero(),
        );
        assert!(problem.free_intervals.is_empty());
    }

    #[test]
    fn test_horizon_start_clamps_first_window() {
        // Trigger fires mid-morning: past time is not schedulable.
        let horizon = Horizon::starting_at(at(5, 10, 30), Duration::days(1));
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &[],
            Vec::new(),
            Duration::zero(),
        );
        assert_eq!(problem.free_intervals[0].start, at(5, 10, 30));
    }

    #[test]
    fn test_multi_day_horizon() {
        // Mon 09:00 + 7 days → Mon–Fri windows, weekend skipped.
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(7));
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &[],
            Vec::new(),
            Duration::zero(),
        );
        assert_eq!(problem.free_intervals.len(), 5);
        assert_disjoint_sorted(&problem.free_intervals);
        assert_eq!(problem.total_free(), Duration::hours(40));
    }

    #[test]
    fn test_excluded_date_dropped() {
        let holiday = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(); // Tuesday
        let profile = WorkingHoursProfile::business_hours().with_excluded(holiday);
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(7));
        let problem =
            SchedulingProblem::build(horizon, &profile, &[], Vec::new(), Duration::zero());
        assert_eq!(problem.free_intervals.len(), 4);
        assert!(problem
            .free_intervals
            .iter()
            .all(|iv| profile.local_date(iv.start) != holiday));
    }

    #[test]
    fn test_weekend_horizon_has_no_free_intervals() {
        // Sat 2026-01-10 09:00 + 2 days: entirely non-working.
        let horizon = Horizon::starting_at(at(10, 9, 0), Duration::days(2));
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &[],
            Vec::new(),
            Duration::zero(),
        );
        assert!(problem.free_intervals.is_empty());
    }

    #[test]
    fn test_min_slot_filters_fragments() {
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(1));
        // Leaves a 10-minute sliver before the block.
        let busy = [TimeInterval::new(at(5, 9, 10), at(5, 12, 0))];
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &busy,
            Vec::new(),
            Duration::minutes(15),
        );
        assert_eq!(problem.free_intervals.len(), 1);
        assert_eq!(problem.free_intervals[0].start, at(5, 12, 0));
    }

    #[test]
    fn test_zero_length_fragment_discarded() {
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(1));
        // Busy exactly aligns with the window start.
        let busy = [TimeInterval::new(at(5, 9, 0), at(5, 12, 0))];
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &busy,
            Vec::new(),
            Duration::zero(),
        );
        assert_eq!(problem.free_intervals.len(), 1);
        assert_eq!(
            problem.free_intervals[0],
            TimeInterval::new(at(5, 12, 0), at(5, 17, 0))
        );
    }

    #[test]
    fn test_unsorted_overlapping_busy_input() {
        let horizon = Horizon::starting_at(at(5, 9, 0), Duration::days(1));
        let busy = [
            TimeInterval::new(at(5, 13, 0), at(5, 14, 0)),
            TimeInterval::new(at(5, 10, 0), at(5, 11, 30)),
            TimeInterval::new(at(5, 11, 0), at(5, 12, 0)),
        ];
        let problem = SchedulingProblem::build(
            horizon,
            &WorkingHoursProfile::business_hours(),
            &busy,
            Vec::new(),
            Duration::zero(),
        );
        assert_disjoint_sorted(&problem.free_intervals);
        // 9–10, 12–13, 14–17
        assert_eq!(problem.free_intervals.len(), 3);
        assert_eq!(problem.total_free(), Duration::hours(5));
    }
}
