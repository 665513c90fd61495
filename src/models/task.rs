//! Task (demand) model.
//!
//! A task is one open card from the board, normalized into the engine's
//! scheduling request: an estimate, an optional deadline, a priority, and
//! informational tags. The engine treats tasks as read-only input for one
//! run; it never writes them back.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Scheduling priority of a task.
///
/// Ordered: `Low < Medium < High`. Boards that speak numeric weights map
/// onto these three levels at the adapter boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parses a board priority string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A demand: one open task awaiting placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier, assigned by the board.
    pub id: String,
    /// Human-readable title; becomes the calendar event summary.
    pub title: String,
    /// Estimated effort in whole minutes. Must be positive; demands that
    /// are not are rejected during screening.
    pub estimate_minutes: i64,
    /// Latest acceptable completion instant. `None` = no time pressure.
    pub deadline: Option<DateTime<Utc>>,
    /// Scheduling priority.
    pub priority: Priority,
    /// Informational labels from the board. Never affect placement.
    pub tags: BTreeSet<String>,
    /// Ids of tasks that must be placed before this one may start.
    pub depends_on: Vec<String>,
}

impl Task {
    /// Creates a new task with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            estimate_minutes: 0,
            deadline: None,
            priority: Priority::default(),
            tags: BTreeSet::new(),
            depends_on: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the effort estimate in minutes.
    pub fn with_estimate_minutes(mut self, minutes: i64) -> Self {
        self.estimate_minutes = minutes;
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Adds an informational tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Adds a prerequisite task id.
    pub fn with_dependency(mut self, task_id: impl Into<String>) -> Self {
        self.depends_on.push(task_id.into());
        self
    }

    /// The estimate as a duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.estimate_minutes)
    }

    /// Whether this task carries a deadline.
    pub fn has_deadline(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_task_builder() {
        let deadline = Utc.with_ymd_and_hms(2026, 1, 9, 17, 0, 0).unwrap();
        let task = Task::new("card-42")
            .with_title("Write release notes")
            .with_estimate_minutes(90)
            .with_deadline(deadline)
            .with_priority(Priority::High)
            .with_tag("docs")
            .with_dependency("card-41");

        assert_eq!(task.id, "card-42");
        assert_eq!(task.title, "Write release notes");
        assert_eq!(task.estimate_minutes, 90);
        assert_eq!(task.deadline, Some(deadline));
        assert_eq!(task.priority, Priority::High);
        assert!(task.tags.contains("docs"));
        assert_eq!(task.depends_on, vec!["card-41".to_string()]);
        assert_eq!(task.duration(), Duration::minutes(90));
        assert!(task.has_deadline());
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("high"), Some(Priority::High));
        assert_eq!(Priority::parse(" Medium "), Some(Priority::Medium));
        assert_eq!(Priority::parse("LOW"), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_priority_serde() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, r#""high""#);
        let back: Priority = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(back, Priority::Low);
    }

    #[test]
    fn test_defaults() {
        let task = Task::new("t");
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.has_deadline());
        assert!(task.tags.is_empty());
        assert!(task.depends_on.is_empty());
    }
}
