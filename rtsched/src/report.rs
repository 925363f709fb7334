/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Human-readable and YAML renderings of a finished simulation.
//!
//! The text form shows the analysis verdicts followed by a one-character-per-
//! unit Gantt strip:
//!
//! ```text
//! A    |#.#.
//! B    |.#..
//! IDLE |...#
//!       0
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::scheduler::feasibility;
use crate::scheduler::{ScheduleResult, IDLE};
use crate::task::{TaskSet, Time};

const RUN_MARK: char = '#';
const GAP_MARK: char = '.';
const AXIS_STEP: usize = 5;
const IDLE_ROW: &str = IDLE;

/// Everything shown to the user after a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub algorithm: &'a str,
    pub horizon: Time,
    pub utilization: f64,
    pub rms_bound: f64,
    pub rms_schedulable: bool,
    pub edf_schedulable: bool,
    pub idle_units: Time,
    pub executed_units: BTreeMap<&'a str, Time>,
    pub result: &'a ScheduleResult,
    #[serde(skip)]
    tasks: &'a TaskSet,
}

impl<'a> Report<'a> {
    pub fn new(algorithm: &'a str, tasks: &'a TaskSet, result: &'a ScheduleResult) -> Self {
        Self {
            algorithm,
            horizon: result.horizon(),
            utilization: feasibility::total_utilization(tasks),
            rms_bound: feasibility::liu_layland_bound(tasks.len()),
            rms_schedulable: feasibility::is_schedulable_rms(tasks),
            edf_schedulable: feasibility::is_schedulable_edf(tasks),
            idle_units: result.idle_units(),
            executed_units: result.executed_units(),
            result,
            tasks,
        }
    }

    /// `CPU Utilization: 0.75 (75.0%)`
    pub fn utilization_line(&self) -> String {
        format!(
            "CPU Utilization: {:.2} ({:.1}%)",
            self.utilization,
            self.utilization * 100.0
        )
    }

    /// Gantt rows (one per task, then `IDLE`) followed by the time axis.
    pub fn gantt(&self) -> Vec<String> {
        let width = self
            .tasks
            .iter()
            .map(|t| t.id().chars().count())
            .chain(std::iter::once(IDLE_ROW.len()))
            .max()
            .unwrap_or(IDLE_ROW.len());

        let timeline = self.result.timeline();
        let row = |label: &str, mark: &dyn Fn(usize) -> bool| {
            let strip: String = (0..timeline.len())
                .map(|t| if mark(t) { RUN_MARK } else { GAP_MARK })
                .collect();
            format!("{label:<width$} |{strip}")
        };

        let mut rows: Vec<String> = self
            .tasks
            .iter()
            .map(|task| row(task.id(), &|t| timeline[t].task_id() == Some(task.id())))
            .collect();
        rows.push(row(IDLE_ROW, &|t| timeline[t].is_idle()));

        let mut axis = " ".repeat(width + 2);
        for t in (0..timeline.len()).step_by(AXIS_STEP) {
            let column = width + 2 + t;
            if axis.len() < column {
                axis.push_str(&" ".repeat(column - axis.len()));
            }
            axis.push_str(&t.to_string());
        }
        rows.push(axis);
        rows
    }

    /// Compact timeline with idle units shown as `.`.
    pub fn timeline_line(&self) -> String {
        self.result
            .timeline()
            .iter()
            .map(|slot| slot.task_id().unwrap_or("."))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    fn verdict(ok: bool) -> &'static str {
        if ok {
            "schedulable"
        } else {
            "not guaranteed"
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Simulation Time: {} units", self.horizon)?;
        writeln!(f, "{}", self.utilization_line())?;
        writeln!(
            f,
            "Liu & Layland Bound (n={}): {:.3} -> {} under RMS",
            self.tasks.len(),
            self.rms_bound,
            Self::verdict(self.rms_schedulable)
        )?;
        writeln!(
            f,
            "EDF Test (density <= 1): {}",
            Self::verdict(self.edf_schedulable)
        )?;

        writeln!(f)?;
        writeln!(f, "Timeline: {}", self.timeline_line())?;
        writeln!(f)?;
        for line in self.gantt() {
            writeln!(f, "{}", line.trim_end())?;
        }
        writeln!(f)?;

        if self.result.is_feasible() {
            writeln!(f, "No missed deadlines")?;
        } else {
            writeln!(f, "Missed Deadlines:")?;
            for miss in self.result.missed_deadlines() {
                writeln!(f, "  {miss}")?;
            }
        }

        writeln!(
            f,
            "Idle Time: {} / {} units ({:.1}%)",
            self.idle_units,
            self.horizon,
            self.result.idle_ratio() * 100.0
        )?;
        writeln!(f, "Executed Units:")?;
        for (id, units) in &self.executed_units {
            writeln!(f, "  {id}: {units}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{RateMonotonicScheduler, Scheduler};
    use crate::task::Task;

    fn two_tasks() -> TaskSet {
        TaskSet::from_tasks([
            Task::implicit("A", 1, 2).unwrap(),
            Task::implicit("B", 1, 4).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn utilization_line_format() {
        let tasks = TaskSet::from_tasks([
            Task::implicit("T1", 1, 4).unwrap(),
            Task::implicit("T2", 2, 5).unwrap(),
            Task::implicit("T3", 1, 10).unwrap(),
        ])
        .unwrap();
        let result = ScheduleResult::default();
        let report = Report::new("x", &tasks, &result);
        assert_eq!(report.utilization_line(), "CPU Utilization: 0.75 (75.0%)");
    }

    #[test]
    fn gantt_marks_each_unit() {
        let tasks = two_tasks();
        let result = RateMonotonicScheduler::new().schedule(&tasks, 4);
        let report = Report::new("RMS", &tasks, &result);

        let rows = report.gantt();
        assert_eq!(rows[0], "A    |#.#.");
        assert_eq!(rows[1], "B    |.#..");
        assert_eq!(rows[2], "IDLE |...#");
        assert_eq!(rows[3], "      0");
    }

    #[test]
    fn gantt_pads_non_ascii_ids_by_character() {
        let tasks = TaskSet::from_tasks([
            Task::implicit("ταχύ", 1, 2).unwrap(),
            Task::implicit("B", 1, 4).unwrap(),
        ])
        .unwrap();
        let result = RateMonotonicScheduler::new().schedule(&tasks, 4);
        let rows = Report::new("RMS", &tasks, &result).gantt();

        assert_eq!(rows[0], "ταχύ |#.#.");
        assert_eq!(rows[2], "IDLE |...#");
        let bar = |row: &str| row.chars().position(|c| c == '|');
        assert_eq!(bar(&rows[0]), bar(&rows[2]));
    }

    #[test]
    fn axis_labels_every_five_units() {
        let tasks = two_tasks();
        let result = RateMonotonicScheduler::new().schedule(&tasks, 12);
        let report = Report::new("RMS", &tasks, &result);
        let axis = report.gantt().pop().unwrap();
        assert_eq!(axis, "      0    5    10");
    }

    #[test]
    fn text_report_lists_outcome() {
        let tasks = two_tasks();
        let result = RateMonotonicScheduler::new().schedule(&tasks, 4);
        let text = Report::new("RMS", &tasks, &result).to_string();

        assert!(text.contains("Timeline: A B A ."));
        assert!(text.contains("No missed deadlines"));
        assert!(text.contains("Idle Time: 1 / 4 units (25.0%)"));
        assert!(text.contains("  A: 2"));
    }

    #[test]
    fn text_report_lists_misses() {
        let tasks = TaskSet::from_tasks([
            Task::implicit("A", 2, 3).unwrap(),
            Task::implicit("B", 2, 4).unwrap(),
        ])
        .unwrap();
        let result = RateMonotonicScheduler::new().schedule(&tasks, 8);
        assert!(!result.is_feasible());

        let text = Report::new("RMS", &tasks, &result).to_string();
        assert!(text.contains("Missed Deadlines:"));
        assert!(text.contains("Task B missed deadline at time 4"));
    }

    #[test]
    fn yaml_contains_timeline_and_figures() {
        let tasks = two_tasks();
        let result = RateMonotonicScheduler::new().schedule(&tasks, 4);
        let yaml = Report::new("RMS", &tasks, &result).to_yaml().unwrap();

        assert!(yaml.contains("algorithm: RMS"));
        assert!(yaml.contains("idle_units: 1"));
        assert!(yaml.contains("- IDLE"));
    }
}
