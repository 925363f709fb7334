/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Rate-monotonic scheduling: static priority, shorter period wins.

use super::engine::Job;
use super::{MissDetection, Scheduler};
use crate::task::TaskSet;

/// Fixed-priority preemptive scheduler with rate-monotonic priorities.
///
/// Priorities are assigned once per run by sorting on period.  The sort is
/// stable, so tasks with equal periods keep their insertion order, both for
/// dispatch and for the order misses are reported within one time unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateMonotonicScheduler {
    detection: MissDetection,
}

impl RateMonotonicScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_miss_detection(detection: MissDetection) -> Self {
        Self { detection }
    }
}

impl Scheduler for RateMonotonicScheduler {
    fn name(&self) -> &'static str {
        "Rate Monotonic Scheduling (RMS)"
    }

    fn miss_detection(&self) -> MissDetection {
        self.detection
    }

    fn prepare(&self, tasks: &TaskSet) -> Vec<Job> {
        let mut jobs: Vec<Job> = tasks.iter().map(Job::new).collect();
        jobs.sort_by_key(|job| job.task().period());
        jobs
    }

    /// Highest-priority ready job: the first ready one in period order.
    fn select(&self, jobs: &[Job]) -> Option<usize> {
        jobs.iter().position(Job::is_ready)
    }
}
