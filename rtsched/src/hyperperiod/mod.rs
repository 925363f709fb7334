/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Hyperperiod of a task set.
//!
//! The hyperperiod is the LCM of all task periods: with every task released
//! synchronously at time 0, the schedule produced by either policy repeats
//! after one hyperperiod.  Simulating exactly one hyperperiod therefore
//! covers every distinct release pattern, which is why the binary uses it as
//! the default horizon when it is small enough.

pub mod math;

use tracing::{debug, warn};

use crate::task::{TaskSet, Time};
use math::lcm_all;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Largest hyperperiod accepted as a default simulation horizon.
///
/// Co-prime periods blow the LCM up quickly; beyond this the timeline is too
/// long to read and the caller falls back to a fixed horizon instead.
pub const DEFAULT_HYPERPERIOD_LIMIT: Time = 1_000;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur while computing a hyperperiod.
#[derive(Debug, PartialEq, Eq)]
pub enum HyperperiodError {
    /// The task set is empty.
    NoValidPeriods,

    /// LCM of `a` and `b` overflowed [`Time`].
    Overflow { a: Time, b: Time },

    /// The hyperperiod exists but is above the requested limit.
    TooLarge { value: Time, limit: Time },
}

impl std::fmt::Display for HyperperiodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HyperperiodError::NoValidPeriods => write!(f, "task set has no periods"),
            HyperperiodError::Overflow { a, b } => {
                write!(f, "LCM overflow computing lcm({a}, {b})")
            }
            HyperperiodError::TooLarge { value, limit } => {
                write!(f, "hyperperiod {value} exceeds limit {limit}")
            }
        }
    }
}

impl std::error::Error for HyperperiodError {}

// ── HyperperiodInfo ───────────────────────────────────────────────────────────

/// Hyperperiod of one task set together with what it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperperiodInfo {
    /// LCM of all task periods.
    pub hyperperiod: Time,

    /// Distinct periods in the set, sorted ascending.
    pub unique_periods: Vec<Time>,

    /// Number of tasks that contributed.
    pub task_count: usize,
}

impl HyperperiodInfo {
    /// Number of instances of a task with `period` released in one
    /// hyperperiod.
    pub fn instances_of(&self, period: Time) -> Time {
        if period == 0 {
            0
        } else {
            self.hyperperiod / period
        }
    }
}

/// Compute the hyperperiod of `tasks`, refusing values above `limit`.
///
/// # Errors
/// * [`HyperperiodError::NoValidPeriods`] for an empty set.
/// * [`HyperperiodError::Overflow`] if the LCM does not fit in [`Time`].
/// * [`HyperperiodError::TooLarge`] if the LCM is above `limit`.
pub fn calculate(tasks: &TaskSet, limit: Time) -> Result<HyperperiodInfo, HyperperiodError> {
    if tasks.is_empty() {
        return Err(HyperperiodError::NoValidPeriods);
    }

    let mut unique_periods: Vec<Time> = tasks.iter().map(|t| t.period()).collect();
    unique_periods.sort_unstable();
    unique_periods.dedup();

    let hyperperiod = lcm_all(unique_periods.iter().copied())?;

    if hyperperiod > limit {
        warn!(hyperperiod, limit, "Hyperperiod exceeds limit");
        return Err(HyperperiodError::TooLarge {
            value: hyperperiod,
            limit,
        });
    }

    debug!(
        hyperperiod,
        task_count = tasks.len(),
        periods = ?unique_periods,
        "Calculated hyperperiod"
    );

    Ok(HyperperiodInfo {
        hyperperiod,
        unique_periods,
        task_count: tasks.len(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
