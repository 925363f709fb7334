/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Uniprocessor real-time scheduling simulation.
//!
//! Two policies implement the [`Scheduler`] trait:
//!
//! | Policy | Priority | Tie-break |
//! |---|---|---|
//! | [`RateMonotonicScheduler`] | static, shorter period first | insertion order (stable sort) |
//! | [`EarliestDeadlineFirstScheduler`] | dynamic, earliest absolute deadline first | insertion order |
//!
//! Both share one simulation loop ([`engine`]); a policy only supplies the
//! visiting order of its jobs and the selection rule.
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Task state | Run-local clones — `schedule()` never mutates the caller's [`TaskSet`] |
//! | Failure | The loop is total; misses are data in [`ScheduleResult`], not errors |
//! | Miss detection | [`MissDetection::NextRelease`] by default, [`MissDetection::AbsoluteDeadline`] on request |
//! | Thread safety | Schedulers are `Copy` and stateless between runs |
//!
//! # Example
//! ```rust
//! use rtsched::scheduler::{EarliestDeadlineFirstScheduler, Scheduler};
//! use rtsched::task::{Task, TaskSet};
//!
//! let tasks = TaskSet::from_tasks([
//!     Task::new("A", 1, 4, 4).unwrap(),
//!     Task::new("B", 2, 5, 5).unwrap(),
//! ])
//! .unwrap();
//!
//! let result = EarliestDeadlineFirstScheduler::new().schedule(&tasks, 20);
//! assert_eq!(result.timeline().len(), 20);
//! assert!(result.is_feasible());
//! ```

pub mod edf;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod rate_monotonic;
pub mod result;

pub use edf::EarliestDeadlineFirstScheduler;
pub use engine::{Job, Simulation};
pub use error::SchedulerError;
pub use rate_monotonic::RateMonotonicScheduler;
pub use result::{DeadlineMiss, ScheduleResult, Slot, Step, IDLE};

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::task::{TaskSet, Time};

// ── Miss detection ────────────────────────────────────────────────────────────

/// When an unfinished instance is reported as a deadline miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissDetection {
    /// Report only when the next instance is released while the previous one
    /// still has work left.  The configured deadline `D` is not consulted, so
    /// with `D < T` late completions between `D` and `T` go unreported.
    #[default]
    NextRelease,

    /// Additionally report at `release + D` if the instance still has work
    /// left.  Each instance is reported at most once.
    AbsoluteDeadline,
}

// ── Scheduler trait ───────────────────────────────────────────────────────────

/// A uniprocessor dispatch policy.
pub trait Scheduler {
    /// Human-readable policy name.
    fn name(&self) -> &'static str;

    fn miss_detection(&self) -> MissDetection;

    /// Fresh working copy of `tasks` in the order the release phase visits
    /// them.  [`select`](Self::select) indexes into this vector.
    fn prepare(&self, tasks: &TaskSet) -> Vec<Job>;

    /// Index of the job that runs for the current unit, `None` to idle.
    fn select(&self, jobs: &[Job]) -> Option<usize>;

    /// Step-wise simulation of `tasks` over `horizon` units.
    fn simulate<'s>(&'s self, tasks: &TaskSet, horizon: Time) -> Simulation<'s, Self>
    where
        Self: Sized,
    {
        Simulation::new(self, tasks, horizon)
    }

    /// Simulate `tasks` for `horizon` units and return the full result.
    ///
    /// Always completes; the timeline has exactly `horizon` entries.
    fn schedule(&self, tasks: &TaskSet, horizon: Time) -> ScheduleResult {
        info!(
            policy = self.name(),
            task_count = tasks.len(),
            horizon,
            miss_detection = ?self.miss_detection(),
            "=== schedule() ==="
        );

        let result: ScheduleResult = Simulation::new(self, tasks, horizon).collect();

        info!(
            policy = self.name(),
            missed = result.missed_deadlines().len(),
            idle_units = result.idle_units(),
            "=== Simulation complete ==="
        );
        result
    }
}

// ── Policy selection ──────────────────────────────────────────────────────────

/// Closed set of built-in policies, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    #[default]
    RateMonotonic,
    EarliestDeadlineFirst,
}

impl Policy {
    /// Short name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::RateMonotonic => "rms",
            Policy::EarliestDeadlineFirst => "edf",
        }
    }

    /// Instantiate the scheduler for this policy.
    pub fn scheduler(self, detection: MissDetection) -> Box<dyn Scheduler + Send + Sync> {
        match self {
            Policy::RateMonotonic => {
                Box::new(RateMonotonicScheduler::with_miss_detection(detection))
            }
            Policy::EarliestDeadlineFirst => {
                Box::new(EarliestDeadlineFirstScheduler::with_miss_detection(detection))
            }
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rms" | "rm" | "rate_monotonic" | "rate-monotonic" => Ok(Policy::RateMonotonic),
            "edf" | "earliest_deadline_first" | "earliest-deadline-first" => {
                Ok(Policy::EarliestDeadlineFirst)
            }
            _ => Err(SchedulerError::UnknownPolicy(s.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
