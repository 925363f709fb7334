/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Earliest-deadline-first scheduling: dynamic priority by absolute deadline.

use super::engine::Job;
use super::{MissDetection, Scheduler};
use crate::task::TaskSet;

/// Dynamic-priority preemptive scheduler.
///
/// At every unit the ready job with the smallest absolute deadline
/// (`release + D` of its current instance) runs.  Equal deadlines go to the
/// job that comes first in insertion order; identifiers play no part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarliestDeadlineFirstScheduler {
    detection: MissDetection,
}

impl EarliestDeadlineFirstScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_miss_detection(detection: MissDetection) -> Self {
        Self { detection }
    }
}

impl Scheduler for EarliestDeadlineFirstScheduler {
    fn name(&self) -> &'static str {
        "Earliest Deadline First (EDF)"
    }

    fn miss_detection(&self) -> MissDetection {
        self.detection
    }

    fn prepare(&self, tasks: &TaskSet) -> Vec<Job> {
        tasks.iter().map(Job::new).collect()
    }

    fn select(&self, jobs: &[Job]) -> Option<usize> {
        // min_by_key returns the first of several equal minima
        jobs.iter()
            .enumerate()
            .filter(|(_, job)| job.is_ready())
            .min_by_key(|(_, job)| job.absolute_deadline())
            .map(|(idx, _)| idx)
    }
}
