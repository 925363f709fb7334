/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task construction from user-typed values.
//!
//! Stricter than [`Task::new`]: besides positivity, an accepted task must
//! satisfy `C ≤ T` and `D ≤ T`.  An empty deadline defaults to the period.

use crate::error::{ParameterReason, TaskError};
use crate::task::{Task, Time};

/// Build a task from four text fields.
///
/// # Errors
/// [`TaskError::InvalidParameter`] describing the first field that failed.
pub fn parse_task(
    id: &str,
    execution_time: &str,
    period: &str,
    deadline: &str,
) -> Result<Task, TaskError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(TaskError::invalid(id, ParameterReason::EmptyId));
    }

    let execution_time = parse_field(id, "execution time", execution_time)?;
    let period = parse_field(id, "period", period)?;
    let deadline = if deadline.trim().is_empty() {
        None
    } else {
        Some(parse_field(id, "deadline", deadline)?)
    };

    validate(id, execution_time, period, deadline)
}

/// `true` if [`parse_task`] would accept the fields.
pub fn is_valid_task_input(id: &str, execution_time: &str, period: &str, deadline: &str) -> bool {
    parse_task(id, execution_time, period, deadline).is_ok()
}

/// Parse the compact `ID:C:T[:D]` form used on the command line.
pub fn parse_task_spec(spec: &str) -> Result<Task, TaskError> {
    let fields: Vec<&str> = spec.split(':').collect();
    match fields.as_slice() {
        [id, c, t] => parse_task(id, c, t, ""),
        [id, c, t, d] => parse_task(id, c, t, d),
        _ => Err(TaskError::invalid(
            fields.first().copied().unwrap_or_default().trim(),
            ParameterReason::Malformed {
                input: spec.to_string(),
            },
        )),
    }
}

/// Validate already-numeric values (e.g. from a YAML file) with the same
/// rules as [`parse_task`].
pub fn validate(
    id: &str,
    execution_time: i64,
    period: i64,
    deadline: Option<i64>,
) -> Result<Task, TaskError> {
    let execution_time = positive(id, "execution time", execution_time)?;
    let period = positive(id, "period", period)?;
    let deadline = match deadline {
        Some(d) => positive(id, "deadline", d)?,
        None => period,
    };

    for (field, value) in [("execution time", execution_time), ("deadline", deadline)] {
        if value > period {
            return Err(TaskError::invalid(
                id,
                ParameterReason::ExceedsPeriod {
                    field,
                    value,
                    period,
                },
            ));
        }
    }

    Task::new(id, execution_time, period, deadline)
}

fn parse_field(id: &str, field: &'static str, input: &str) -> Result<i64, TaskError> {
    input.trim().parse::<i64>().map_err(|_| {
        TaskError::invalid(
            id,
            ParameterReason::NotANumber {
                field,
                input: input.to_string(),
            },
        )
    })
}

fn positive(id: &str, field: &'static str, value: i64) -> Result<Time, TaskError> {
    if value <= 0 {
        return Err(TaskError::invalid(
            id,
            ParameterReason::NonPositive { field, value },
        ));
    }
    Ok(value as Time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(result: Result<Task, TaskError>) -> ParameterReason {
        result.unwrap_err().reason().clone()
    }

    #[test]
    fn accepts_well_formed_fields() {
        let task = parse_task(" T1 ", "1", " 4 ", "3").unwrap();
        assert_eq!(task.id(), "T1");
        assert_eq!(task.execution_time(), 1);
        assert_eq!(task.period(), 4);
        assert_eq!(task.deadline(), 3);
    }

    #[test]
    fn empty_deadline_defaults_to_period() {
        let task = parse_task("T2", "2", "5", "  ").unwrap();
        assert_eq!(task.deadline(), 5);
    }

    #[test]
    fn rejects_empty_id() {
        assert_eq!(reason_of(parse_task("", "1", "4", "")), ParameterReason::EmptyId);
    }

    #[test]
    fn rejects_idle_label_as_id() {
        assert_eq!(
            reason_of(parse_task(" IDLE ", "1", "2", "")),
            ParameterReason::ReservedId
        );
        assert_eq!(reason_of(parse_task_spec("IDLE:1:2")), ParameterReason::ReservedId);
        assert_eq!(reason_of(validate("IDLE", 1, 2, None)), ParameterReason::ReservedId);
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(
            reason_of(parse_task("A", "x", "4", "")),
            ParameterReason::NotANumber {
                field: "execution time",
                input: "x".into()
            }
        );
    }

    #[test]
    fn rejects_non_positive() {
        assert_eq!(
            reason_of(parse_task("A", "1", "-4", "")),
            ParameterReason::NonPositive {
                field: "period",
                value: -4
            }
        );
        assert_eq!(
            reason_of(parse_task("A", "1", "4", "0")),
            ParameterReason::NonPositive {
                field: "deadline",
                value: 0
            }
        );
    }

    #[test]
    fn rejects_values_longer_than_period() {
        assert_eq!(
            reason_of(parse_task("A", "5", "4", "")),
            ParameterReason::ExceedsPeriod {
                field: "execution time",
                value: 5,
                period: 4
            }
        );
        assert_eq!(
            reason_of(parse_task("A", "1", "4", "6")),
            ParameterReason::ExceedsPeriod {
                field: "deadline",
                value: 6,
                period: 4
            }
        );
    }

    #[test]
    fn is_valid_mirrors_parse() {
        assert!(is_valid_task_input("A", "1", "4", "4"));
        assert!(!is_valid_task_input("A", "1", "four", "4"));
    }

    #[test]
    fn compact_spec_with_and_without_deadline() {
        let task = parse_task_spec("A:1:4").unwrap();
        assert_eq!((task.execution_time(), task.period(), task.deadline()), (1, 4, 4));

        let task = parse_task_spec("B:2:10:6").unwrap();
        assert_eq!(task.deadline(), 6);
    }

    #[test]
    fn compact_spec_with_wrong_arity_is_malformed() {
        assert_eq!(
            reason_of(parse_task_spec("A:1")),
            ParameterReason::Malformed {
                input: "A:1".into()
            }
        );
        assert!(parse_task_spec("A:1:2:3:4").is_err());
    }
}
