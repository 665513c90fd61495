//! Adapter ports to the external board and calendar backends.
//!
//! Task data and calendar data are owned by external systems; the engine
//! only reads tasks, and reads/writes events. These traits are the whole
//! surface it needs. Concrete HTTP/CalDAV implementations live with the
//! product wiring; this crate ships deterministic in-memory implementations
//! for tests and embedding.

mod board;
mod memory;

pub use board::{normalize_tasks, BoardTask};
pub use memory::{InMemoryCalendar, StaticTaskSource};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CalendarEvent, EventDraft, Horizon};

/// Failures surfaced by a backend.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    /// The backend could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unavailable(String),
    /// The backend refused a specific request.
    #[error("request rejected: {0}")]
    Rejected(String),
    /// The backend answered with something unparseable.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Read access to the board's open-task list.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetches the currently open tasks, in board order.
    async fn fetch_open_tasks(&self) -> Result<Vec<BoardTask>, AdapterError>;
}

/// Read/write access to the calendar store.
///
/// Events created through this port carry the originating task id as a tag
/// (`CalendarEvent::task_id`); `list_events` must return that tag so
/// repeated runs can recognize their own prior output.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Lists events overlapping the horizon.
    async fn list_events(&self, horizon: &Horizon) -> Result<Vec<CalendarEvent>, AdapterError>;

    /// Creates a tagged event, returning the stored form.
    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent, AdapterError>;

    /// Deletes an event by id.
    async fn delete_event(&self, event_id: &str) -> Result<(), AdapterError>;
}
