//! Working-hours profile.
//!
//! Describes which hours of which weekdays are schedulable, plus an explicit
//! exclusion list for holidays. A pure policy object: a run reads it, never
//! mutates it.
//!
//! # Time Model
//!
//! Windows are expressed in profile-local time of day; `utc_offset_minutes`
//! fixes the local clock relative to UTC. The offset is constant — daylight
//! saving transitions are not modelled.
//!
//! # Precedence
//!
//! Excluded dates override weekday windows: a date on the exclusion list has
//! no schedulable time regardless of its weekday.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::TimeInterval;

/// A recurring schedulable window on one weekday, in profile-local time.
///
/// `start` is inclusive, `end` exclusive; both lie within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayWindow {
    /// Day of week this window recurs on.
    pub weekday: Weekday,
    /// Local start of the window (inclusive).
    pub start: NaiveTime,
    /// Local end of the window (exclusive).
    pub end: NaiveTime,
}

/// Schedulable-time policy: recurring weekday windows plus excluded dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingHoursProfile {
    /// Offset of profile-local time from UTC, in minutes east.
    pub utc_offset_minutes: i64,
    /// Recurring schedulable windows.
    pub windows: Vec<WeekdayWindow>,
    /// Local dates with no schedulable time (holidays). Overrides windows.
    pub excluded_dates: BTreeSet<NaiveDate>,
}

impl WorkingHoursProfile {
    /// Creates an empty profile (no windows = nothing is schedulable).
    pub fn new() -> Self {
        Self::default()
    }

    /// Mon–Fri 09:00–17:00 in UTC, the conventional business-hours default.
    pub fn business_hours() -> Self {
        let (Some(nine), Some(five)) = (
            NaiveTime::from_hms_opt(9, 0, 0),
            NaiveTime::from_hms_opt(17, 0, 0),
        ) else {
            return Self::new();
        };
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .into_iter()
        .fold(Self::new(), |profile, day| {
            profile.with_window(day, nine, five)
        })
    }

    /// Sets the local-time offset from UTC, in minutes east.
    pub fn with_utc_offset_minutes(mut self, minutes: i64) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Adds a recurring window. Windows with `end <= start` are ignored.
    pub fn with_window(mut self, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        if end > start {
            self.windows.push(WeekdayWindow {
                weekday,
                start,
                end,
            });
        }
        self
    }

    /// Adds an excluded local date.
    pub fn with_excluded(mut self, date: NaiveDate) -> Self {
        self.excluded_dates.insert(date);
        self
    }

    /// Whether a local date is on the exclusion list.
    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.excluded_dates.contains(&date)
    }

    /// The profile-local date an instant falls on.
    pub fn local_date(&self, t: DateTime<Utc>) -> NaiveDate {
        (t + Duration::minutes(self.utc_offset_minutes)).date_naive()
    }

    /// Schedulable UTC intervals on one local date, sorted by start.
    ///
    /// Empty for excluded dates and for weekdays with no windows.
    pub fn windows_for(&self, date: NaiveDate) -> Vec<TimeInterval> {
        if self.is_excluded(date) {
            return Vec::new();
        }

        let offset = Duration::minutes(self.utc_offset_minutes);
        let mut intervals: Vec<TimeInterval> = self
            .windows
            .iter()
            .filter(|w| w.weekday == date.weekday())
            .map(|w| {
                TimeInterval::new(
                    Utc.from_utc_datetime(&(date.and_time(w.start) - offset)),
                    Utc.from_utc_datetime(&(date.and_time(w.end) - offset)),
                )
            })
            .collect();
        intervals.sort_by_key(|iv| iv.start);
        intervals
    }

    /// Whether an instant is within schedulable time.
    pub fn is_schedulable(&self, t: DateTime<Utc>) -> bool {
        self.windows_for(self.local_date(t))
            .iter()
            .any(|iv| iv.contains(t))
    }
}
