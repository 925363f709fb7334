/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Simulation output: the per-unit timeline and the deadline-miss log.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::task::Time;

/// Label used for a unit in which no task ran.
pub const IDLE: &str = "IDLE";

// ── Slot ──────────────────────────────────────────────────────────────────────

/// What occupied the processor during one unit of time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The task with this identifier executed.
    Task(String),
    /// Nothing was ready.
    Idle,
}

impl Slot {
    /// Task identifier, or [`IDLE`].
    pub fn label(&self) -> &str {
        match self {
            Slot::Task(id) => id,
            Slot::Idle => IDLE,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Slot::Idle)
    }

    /// Identifier of the running task, `None` when idle.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Slot::Task(id) => Some(id),
            Slot::Idle => None,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ── DeadlineMiss ──────────────────────────────────────────────────────────────

/// A task instance detected as late at `time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineMiss {
    pub task_id: String,
    pub time: Time,
}

impl DeadlineMiss {
    pub fn new(task_id: impl Into<String>, time: Time) -> Self {
        Self {
            task_id: task_id.into(),
            time,
        }
    }
}

impl std::fmt::Display for DeadlineMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task {} missed deadline at time {}", self.task_id, self.time)
    }
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// Outcome of simulating a single unit of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub time: Time,
    pub slot: Slot,
    /// Misses detected at the start of this unit, in detection order.
    pub misses: Vec<DeadlineMiss>,
}

// ── ScheduleResult ────────────────────────────────────────────────────────────

/// Complete output of one `schedule` call.
///
/// Immutable once built; [`into_parts`](Self::into_parts) hands the vectors
/// to a caller that wants to keep editing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    timeline: Vec<Slot>,
    missed_deadlines: Vec<DeadlineMiss>,
}

impl ScheduleResult {
    pub fn new(timeline: Vec<Slot>, missed_deadlines: Vec<DeadlineMiss>) -> Self {
        Self {
            timeline,
            missed_deadlines,
        }
    }

    /// One entry per simulated unit.
    pub fn timeline(&self) -> &[Slot] {
        &self.timeline
    }

    pub fn missed_deadlines(&self) -> &[DeadlineMiss] {
        &self.missed_deadlines
    }

    /// Number of simulated units (`timeline().len()`).
    pub fn horizon(&self) -> Time {
        self.timeline.len() as Time
    }

    /// Timeline as plain labels: task ids and `"IDLE"`.
    pub fn labels(&self) -> Vec<&str> {
        self.timeline.iter().map(Slot::label).collect()
    }

    /// Miss log rendered as sentences.
    pub fn miss_messages(&self) -> Vec<String> {
        self.missed_deadlines.iter().map(ToString::to_string).collect()
    }

    /// `true` when no deadline was missed within the horizon.
    pub fn is_feasible(&self) -> bool {
        self.missed_deadlines.is_empty()
    }

    pub fn idle_units(&self) -> Time {
        self.timeline.iter().filter(|s| s.is_idle()).count() as Time
    }

    /// Fraction of the horizon spent idle; `0.0` for an empty timeline.
    pub fn idle_ratio(&self) -> f64 {
        if self.timeline.is_empty() {
            0.0
        } else {
            self.idle_units() as f64 / self.timeline.len() as f64
        }
    }

    /// Units executed per task, keyed by identifier.
    ///
    /// Tasks that never ran are absent.
    pub fn executed_units(&self) -> BTreeMap<&str, Time> {
        let mut units = BTreeMap::new();
        for id in self.timeline.iter().filter_map(Slot::task_id) {
            *units.entry(id).or_insert(0) += 1;
        }
        units
    }

    /// Misses recorded for one task.
    pub fn misses_of<'a>(&'a self, task_id: &'a str) -> impl Iterator<Item = &'a DeadlineMiss> {
        self.missed_deadlines
            .iter()
            .filter(move |m| m.task_id == task_id)
    }

    pub fn into_parts(self) -> (Vec<Slot>, Vec<DeadlineMiss>) {
        (self.timeline, self.missed_deadlines)
    }
}

impl FromIterator<Step> for ScheduleResult {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        let mut result = ScheduleResult::default();
        for step in iter {
            result.timeline.push(step.slot);
            result.missed_deadlines.extend(step.misses);
        }
        result
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(labels: &[&str]) -> Vec<Slot> {
        labels
            .iter()
            .map(|&l| {
                if l == IDLE {
                    Slot::Idle
                } else {
                    Slot::Task(l.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn miss_message_matches_log_format() {
        let miss = DeadlineMiss::new("T2", 10);
        assert_eq!(miss.to_string(), "Task T2 missed deadline at time 10");
    }

    #[test]
    fn idle_statistics() {
        let result = ScheduleResult::new(slots(&["A", "IDLE", "B", "IDLE"]), vec![]);
        assert_eq!(result.idle_units(), 2);
        assert!((result.idle_ratio() - 0.5).abs() < 1e-12);
        assert_eq!(result.horizon(), 4);
        assert!(result.is_feasible());
    }

    #[test]
    fn empty_result_has_zero_idle_ratio() {
        let result = ScheduleResult::default();
        assert_eq!(result.idle_ratio(), 0.0);
        assert_eq!(result.horizon(), 0);
    }

    #[test]
    fn executed_units_counts_per_task() {
        let result = ScheduleResult::new(slots(&["A", "B", "A", "IDLE", "A"]), vec![]);
        let units = result.executed_units();
        assert_eq!(units.get("A"), Some(&3));
        assert_eq!(units.get("B"), Some(&1));
        assert_eq!(units.get(IDLE), None);
    }

    #[test]
    fn misses_of_filters_by_task() {
        let result = ScheduleResult::new(
            slots(&["A"]),
            vec![
                DeadlineMiss::new("B", 6),
                DeadlineMiss::new("A", 8),
                DeadlineMiss::new("B", 12),
            ],
        );
        let times: Vec<Time> = result.misses_of("B").map(|m| m.time).collect();
        assert_eq!(times, [6, 12]);
        assert!(!result.is_feasible());
    }

    #[test]
    fn collects_from_steps() {
        let steps = vec![
            Step {
                time: 0,
                slot: Slot::Task("A".into()),
                misses: vec![],
            },
            Step {
                time: 1,
                slot: Slot::Idle,
                misses: vec![DeadlineMiss::new("B", 1)],
            },
        ];
        let result: ScheduleResult = steps.into_iter().collect();
        assert_eq!(result.labels(), ["A", IDLE]);
        assert_eq!(result.missed_deadlines(), [DeadlineMiss::new("B", 1)]);
    }

    #[test]
    fn serializes_idle_as_sentinel() {
        let result = ScheduleResult::new(slots(&["A", "IDLE"]), vec![DeadlineMiss::new("A", 1)]);
        let yaml = serde_yaml::to_string(&result).unwrap();
        assert!(yaml.contains("- A"));
        assert!(yaml.contains("- IDLE"));
        assert!(yaml.contains("task_id: A"));
    }
}
