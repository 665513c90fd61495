//! Demand validation.
//!
//! Checks structural integrity of normalized demands before scheduling.
//! Detects:
//! - Duplicate task IDs
//! - Non-positive effort estimates
//!
//! Violations are per-task: the engine screens offenders out of the demand
//! set and reports them individually rather than aborting the run.

use std::collections::HashSet;

use crate::models::{Task, Unscheduled, UnscheduledReason};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two demands share the same ID.
    DuplicateId,
    /// A demand's estimate is zero or negative.
    NonPositiveEstimate,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a demand set without modifying it.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_demands(demands: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for task in demands {
        if !seen.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if task.estimate_minutes <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveEstimate,
                format!(
                    "Task '{}' has non-positive estimate: {}m",
                    task.id, task.estimate_minutes
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Splits a demand set into schedulable demands and per-task rejections.
///
/// The first occurrence of a duplicated ID is kept; later ones are rejected.
/// Rejections carry the `invalid-demand` reason for the run report.
pub fn screen_demands(demands: Vec<Task>) -> (Vec<Task>, Vec<Unscheduled>) {
    let mut accepted = Vec::with_capacity(demands.len());
    let mut rejected = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for task in demands {
        if task.estimate_minutes <= 0 {
            rejected.push(Unscheduled::new(
                task.id,
                UnscheduledReason::InvalidDemand {
                    message: format!("non-positive estimate: {}m", task.estimate_minutes),
                },
            ));
            continue;
        }
        if !seen.insert(task.id.clone()) {
            rejected.push(Unscheduled::new(
                task.id,
                UnscheduledReason::InvalidDemand {
                    message: "duplicate task id".to_string(),
                },
            ));
            continue;
        }
        accepted.push(task);
    }

    (accepted, rejected)
}
