/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for task construction and task-set admission.
//!
//! Two layers, same as the scheduler errors:
//!
//! * [`ParameterReason`] — exactly which value was wrong and why (carries the
//!   offending numbers so the caller can show them without re-parsing).
//! * [`TaskError`] — the top-level error returned by [`Task::new`],
//!   [`TaskSet::add`] and the string-input validators in
//!   [`config::input`](crate::config::input).
//!
//! The simulation loop itself never fails: a deadline miss is an outcome
//! recorded in the [`ScheduleResult`], not an error.
//!
//! [`Task::new`]: crate::task::Task::new
//! [`TaskSet::add`]: crate::task::TaskSet::add
//! [`ScheduleResult`]: crate::scheduler::ScheduleResult

use thiserror::Error;

// ── Parameter reasons ─────────────────────────────────────────────────────────

/// Detailed reason a task parameter was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterReason {
    /// The task identifier is empty (or only whitespace).
    EmptyId,

    /// The identifier collides with the idle-slot label `IDLE`.
    ReservedId,

    /// A numeric parameter is zero or negative.
    NonPositive { field: &'static str, value: i64 },

    /// A numeric field could not be parsed as an integer.
    NotANumber { field: &'static str, input: String },

    /// Execution time or deadline is longer than the period.
    ///
    /// Only enforced by the string-input validators; [`Task::new`] accepts
    /// `D > T` and `C > T`.
    ///
    /// [`Task::new`]: crate::task::Task::new
    ExceedsPeriod {
        field: &'static str,
        value: u64,
        period: u64,
    },

    /// Another task with the same identifier is already in the set.
    DuplicateId,

    /// A compact `ID:C:T[:D]` task spec does not have 3 or 4 fields.
    Malformed { input: String },
}

impl std::fmt::Display for ParameterReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterReason::EmptyId => write!(f, "task identifier must not be empty"),

            ParameterReason::ReservedId => {
                write!(f, "'IDLE' is reserved for idle time units")
            }

            ParameterReason::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }

            ParameterReason::NotANumber { field, input } => {
                write!(f, "{} must be an integer, got '{}'", field, input)
            }

            ParameterReason::ExceedsPeriod {
                field,
                value,
                period,
            } => write!(f, "{} {} exceeds period {}", field, value, period),

            ParameterReason::DuplicateId => {
                write!(f, "a task with this identifier already exists")
            }

            ParameterReason::Malformed { input } => {
                write!(f, "expected ID:C:T[:D], got '{}'", input)
            }
        }
    }
}

// ── Top-level task errors ─────────────────────────────────────────────────────

/// Error returned when a task cannot be built or admitted into a set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// A parameter of `task` failed validation.
    #[error("invalid parameter for task '{task}': {reason}")]
    InvalidParameter {
        task: String,
        reason: ParameterReason,
    },
}

impl TaskError {
    pub(crate) fn invalid(task: impl Into<String>, reason: ParameterReason) -> Self {
        TaskError::InvalidParameter {
            task: task.into(),
            reason,
        }
    }

    /// The structured reason behind this error.
    pub fn reason(&self) -> &ParameterReason {
        match self {
            TaskError::InvalidParameter { reason, .. } => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_task_and_values() {
        let err = TaskError::invalid(
            "T1",
            ParameterReason::NonPositive {
                field: "period",
                value: -4,
            },
        );
        assert_eq!(
            err.to_string(),
            "invalid parameter for task 'T1': period must be positive, got -4"
        );
    }

    #[test]
    fn exceeds_period_display() {
        let reason = ParameterReason::ExceedsPeriod {
            field: "deadline",
            value: 7,
            period: 5,
        };
        assert_eq!(reason.to_string(), "deadline 7 exceeds period 5");
    }

    #[test]
    fn reason_accessor_returns_inner_reason() {
        let err = TaskError::invalid("A", ParameterReason::DuplicateId);
        assert_eq!(err.reason(), &ParameterReason::DuplicateId);
    }
}
