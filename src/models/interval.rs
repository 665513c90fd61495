//! Time interval and planning horizon models.
//!
//! All intervals are half-open `[start, end)` over UTC instants. Busy time
//! read from the calendar, free time derived by the builder, and placements
//! emitted by the scheduler all share the same representation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A time interval `[start, end)`.
///
/// Half-open: includes `start`, excludes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Creates a new interval.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of this interval.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether the interval covers no time at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether an instant falls within this interval.
    #[inline]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether `other` lies entirely within this interval.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two intervals overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The overlapping part of two intervals, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

/// The bounded future window the scheduler may place work into.
///
/// `start` is the "now" supplied by the caller; nothing is ever placed
/// before it. Recomputed fresh for every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    /// Horizon start (inclusive) — the run's "now".
    pub start: DateTime<Utc>,
    /// Horizon end (exclusive).
    pub end: DateTime<Utc>,
}

impl Horizon {
    /// Creates a horizon of the given length starting at `now`.
    pub fn starting_at(now: DateTime<Utc>, length: Duration) -> Self {
        Self {
            start: now,
            end: now + length,
        }
    }

    /// The horizon as a plain interval.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    /// Whether an instant falls within the horizon.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.interval().contains(t)
    }
}
