//! Board task payloads and normalization.
//!
//! `BoardTask` is the listing shape the board backend returns: everything
//! beyond id and title is optional there. Normalization fills the gaps from
//! engine config defaults and drops what cannot be scheduled at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineConfig;
use crate::models::{Priority, Task};

/// A task as returned by the board's listing API, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardTask {
    /// Stable unique card id.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Effort estimate in minutes, if the card carries one.
    #[serde(default)]
    pub estimate_minutes: Option<i64>,
    /// Due instant, if any.
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    /// Priority as the board spells it (`high`/`medium`/`low`).
    #[serde(default)]
    pub priority: Option<String>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ids of cards this one depends on.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl BoardTask {
    /// Creates a minimal board task.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimate_minutes: None,
            due: None,
            priority: None,
            tags: Vec::new(),
            depends_on: Vec::new(),
        }
    }

    /// Sets the estimate.
    pub fn with_estimate_minutes(mut self, minutes: i64) -> Self {
        self.estimate_minutes = Some(minutes);
        self
    }

    /// Sets the due instant.
    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }

    /// Sets the priority string.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Adds a label.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a prerequisite card id.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(id.into());
        self
    }
}

/// Normalizes raw board tasks into demands.
///
/// Config defaults fill a missing estimate or priority; an unknown priority
/// string falls back to the default with a warning. A task with no estimate
/// and no configured default cannot be sized and is dropped with a warning.
pub fn normalize_tasks(raw: Vec<BoardTask>, config: &EngineConfig) -> Vec<Task> {
    let mut demands = Vec::with_capacity(raw.len());

    for item in raw {
        let estimate = match item.estimate_minutes.or(config.default_estimate_minutes) {
            Some(minutes) => minutes,
            None => {
                warn!(task = %item.id, "no estimate and no default configured, dropping task");
                continue;
            }
        };

        let priority = match item.priority.as_deref() {
            Some(s) => match Priority::parse(s) {
                Some(p) => p,
                None => {
                    warn!(task = %item.id, priority = %s, "unknown priority, using default");
                    config.default_priority
                }
            },
            None => config.default_priority,
        };

        let mut task = Task::new(item.id)
            .with_title(item.title)
            .with_estimate_minutes(estimate)
            .with_priority(priority);
        if let Some(due) = item.due {
            task = task.with_deadline(due);
        }
        for tag in item.tags {
            task = task.with_tag(tag);
        }
        for dep in item.depends_on {
            task = task.with_dependency(dep);
        }
        demands.push(task);
    }

    demands
}
