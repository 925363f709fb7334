/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Periodic task model.
//!
//! ```text
//! caller ──(Task::new)──►  TaskSet  ──(&borrow)──►  Scheduler  ──►  ScheduleResult
//!                           ↑ owned, ordered            ↑ clones tasks into a
//!                             insertion order kept        run-local working copy
//! ```
//!
//! # Ownership model
//! A [`TaskSet`] is owned by whoever built it.  Schedulers only borrow it and
//! clone each [`Task`] into their own working copy before the first release,
//! so the dynamic fields (`remaining`, `next_release`) of the caller's tasks
//! are never touched by a simulation run.

use crate::error::{ParameterReason, TaskError};
use crate::scheduler::IDLE;

/// Discrete simulation time, in abstract units.
pub type Time = u64;

// ── Task ──────────────────────────────────────────────────────────────────────

/// A periodic real-time task.
///
/// The static parameters (`execution_time`, `period`, `deadline`) are fixed at
/// construction.  The dynamic per-instance state is advanced only through
/// [`release`](Self::release) and [`execute_unit`](Self::execute_unit), which
/// keep `0 ≤ remaining ≤ execution_time` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    // ── Identity ──────────────────────────────────────────────────────────────
    id: String,

    // ── Static parameters ─────────────────────────────────────────────────────
    /// Worst-case execution time `C` of one instance.
    execution_time: Time,

    /// Interval `T` between successive releases.
    period: Time,

    /// Relative deadline `D`, measured from each release.
    deadline: Time,

    // ── Dynamic state ─────────────────────────────────────────────────────────
    /// Units of the current instance still to execute.
    remaining: Time,

    /// Time of the next periodic arrival.
    next_release: Time,
}

impl Task {
    /// Build a task with an explicit relative deadline.
    ///
    /// # Errors
    /// [`TaskError::InvalidParameter`] if the identifier is empty or equal to
    /// the idle label [`IDLE`], or any of the three numeric parameters is zero.
    pub fn new(
        id: impl Into<String>,
        execution_time: Time,
        period: Time,
        deadline: Time,
    ) -> Result<Self, TaskError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TaskError::invalid(id, ParameterReason::EmptyId));
        }
        if id == IDLE {
            return Err(TaskError::invalid(id, ParameterReason::ReservedId));
        }

        for (field, value) in [
            ("execution time", execution_time),
            ("period", period),
            ("deadline", deadline),
        ] {
            if value == 0 {
                return Err(TaskError::invalid(
                    id,
                    ParameterReason::NonPositive { field, value: 0 },
                ));
            }
        }

        Ok(Self {
            id,
            execution_time,
            period,
            deadline,
            remaining: execution_time,
            next_release: 0,
        })
    }

    /// Build a task whose deadline equals its period.
    pub fn implicit(
        id: impl Into<String>,
        execution_time: Time,
        period: Time,
    ) -> Result<Self, TaskError> {
        Self::new(id, execution_time, period, period)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn execution_time(&self) -> Time {
        self.execution_time
    }

    pub fn period(&self) -> Time {
        self.period
    }

    pub fn deadline(&self) -> Time {
        self.deadline
    }

    pub fn remaining(&self) -> Time {
        self.remaining
    }

    pub fn next_release(&self) -> Time {
        self.next_release
    }

    /// `true` when the deadline equals the period.
    pub fn has_implicit_deadline(&self) -> bool {
        self.deadline == self.period
    }

    /// CPU utilisation fraction: `execution_time / period`.
    pub fn utilization(&self) -> f64 {
        self.execution_time as f64 / self.period as f64
    }

    /// Restore the dynamic state to its pre-simulation values.
    ///
    /// Idempotent: touches only `remaining` and `next_release`.
    pub fn reset(&mut self) {
        self.remaining = self.execution_time;
        self.next_release = 0;
    }

    /// Returns `true` if a new instance arrives at `time`.
    pub fn is_released_at(&self, time: Time) -> bool {
        time % self.period == 0
    }

    /// Start a new instance at `time`: refill `remaining` and schedule the
    /// following arrival.
    pub(crate) fn release(&mut self, time: Time) {
        self.remaining = self.execution_time;
        self.next_release = time.saturating_add(self.period);
    }

    /// Returns `true` while the current instance still has work left.
    pub fn is_ready(&self) -> bool {
        self.remaining > 0
    }

    /// Run the current instance for exactly one unit.
    pub(crate) fn execute_unit(&mut self) {
        debug_assert!(self.remaining > 0, "task '{}' executed with no work", self.id);
        self.remaining = self.remaining.saturating_sub(1);
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// Ordered collection of uniquely-identified tasks.
///
/// Insertion order is preserved; both schedulers rely on it for
/// deterministic tie-breaking.  All lookups are linear scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `tasks`, keeping their order.
    ///
    /// # Errors
    /// Fails on the first duplicate identifier.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self, TaskError> {
        let mut set = Self::new();
        for task in tasks {
            set.add(task)?;
        }
        Ok(set)
    }

    /// Append `task` to the end of the set.
    ///
    /// # Errors
    /// [`ParameterReason::DuplicateId`] if a task with the same identifier is
    /// already present; the set is left unchanged.
    pub fn add(&mut self, task: Task) -> Result<(), TaskError> {
        if self.get_by_id(task.id()).is_some() {
            return Err(TaskError::invalid(task.id, ParameterReason::DuplicateId));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Remove the first task structurally equal to `task`.
    ///
    /// Returns `false` (and does nothing) if no such task exists.
    pub fn remove(&mut self, task: &Task) -> bool {
        match self.tasks.iter().position(|t| t == task) {
            Some(idx) => {
                self.tasks.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the task with identifier `id` and hand it back.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id() == id)?;
        Some(self.tasks.remove(idx))
    }

    /// First task whose identifier is `id`.
    pub fn get_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Task at position `index` in insertion order.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Reset the dynamic state of every task.
    pub fn reset_all(&mut self) {
        self.tasks.iter_mut().for_each(Task::reset);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
