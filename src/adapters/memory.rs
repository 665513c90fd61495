//! In-memory adapters.
//!
//! Deterministic backends for tests and library embedders: a fixed task
//! list and a mutex-guarded event vector with sequential ids. No clock, no
//! I/O, no randomness.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AdapterError, BoardTask, CalendarStore, TaskSource};
use crate::models::{CalendarEvent, EventDraft, Horizon};

/// A task source that always returns the same listing.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskSource {
    tasks: Vec<BoardTask>,
}

impl StaticTaskSource {
    /// Creates a source over a fixed task list.
    pub fn new(tasks: Vec<BoardTask>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl TaskSource for StaticTaskSource {
    async fn fetch_open_tasks(&self) -> Result<Vec<BoardTask>, AdapterError> {
        Ok(self.tasks.clone())
    }
}

/// An in-memory calendar store.
///
/// Event ids are sequential (`evt-1`, `evt-2`, …) so repeated runs against
/// the same store are reproducible.
#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    events: Mutex<Vec<CalendarEvent>>,
    next_id: AtomicU64,
}

impl InMemoryCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar pre-seeded with events (busy time, prior output).
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            next_id: AtomicU64::new(events.len() as u64),
            events: Mutex::new(events),
        }
    }

    /// Snapshot of all stored events, in insertion order.
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CalendarStore for InMemoryCalendar {
    async fn list_events(&self, horizon: &Horizon) -> Result<Vec<CalendarEvent>, AdapterError> {
        let events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(events
            .iter()
            .filter(|e| e.interval.overlaps(&horizon.interval()))
            .cloned()
            .collect())
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent, AdapterError> {
        let id = format!("evt-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let event = CalendarEvent::new(id, draft.summary.as_str(), draft.interval)
            .with_task_id(draft.task_id.as_str());
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
        Ok(event)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), AdapterError> {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = events.len();
        events.retain(|e| e.id != event_id);
        if events.len() == before {
            return Err(AdapterError::Rejected(format!(
                "unknown event id: {event_id}"
            )));
        }
        Ok(())
    }
}
