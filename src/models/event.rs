//! Calendar event models.
//!
//! The read and write shapes of the calendar boundary. Events created by the
//! engine carry the originating task id as a tag; the reconciler uses that
//! tag to find its own prior output and avoid duplicating it.

use serde::{Deserialize, Serialize};

use super::TimeInterval;

/// An event as read from the calendar store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Store-assigned event identifier.
    pub id: String,
    /// Event title.
    pub summary: String,
    /// Occupied time range.
    pub interval: TimeInterval,
    /// Id of the task this event was generated for, if the engine created
    /// it. `None` for foreign events (meetings, appointments).
    pub task_id: Option<String>,
}

impl CalendarEvent {
    /// Creates an untagged (foreign) event.
    pub fn new(id: impl Into<String>, summary: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            interval,
            task_id: None,
        }
    }

    /// Tags the event with an originating task id.
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }
}

/// A request to create one calendar event for one placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event title (the task's title).
    pub summary: String,
    /// Time range to occupy.
    pub interval: TimeInterval,
    /// Optional free-text body.
    pub description: Option<String>,
    /// Originating task id; stored as the idempotency tag.
    pub task_id: String,
}

impl EventDraft {
    /// Creates a draft for a task.
    pub fn new(
        task_id: impl Into<String>,
        summary: impl Into<String>,
        interval: TimeInterval,
    ) -> Self {
        Self {
            summary: summary.into(),
            interval,
            description: None,
            task_id: task_id.into(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn iv() -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_event_tagging() {
        let foreign = CalendarEvent::new("evt-1", "Standup", iv());
        assert_eq!(foreign.task_id, None);

        let owned = CalendarEvent::new("evt-2", "Write docs", iv()).with_task_id("card-7");
        assert_eq!(owned.task_id.as_deref(), Some("card-7"));
    }

    #[test]
    fn test_draft_builder() {
        let draft = EventDraft::new("card-7", "Write docs", iv())
            .with_description("Scheduled by autoschedule");
        assert_eq!(draft.task_id, "card-7");
        assert_eq!(draft.summary, "Write docs");
        assert!(draft.description.as_deref().unwrap().contains("autoschedule"));
    }
}
