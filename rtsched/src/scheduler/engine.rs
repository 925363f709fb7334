/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Discrete-time simulation loop shared by every policy.
//!
//! One call to [`Simulation::next`] processes exactly one unit of time:
//!
//! ```text
//!   deadline check ──► release phase ──► dispatch phase ──► Step
//!   (AbsoluteDeadline     (visit jobs in      (policy's
//!    mode only)            prepare() order)    select())
//! ```
//!
//! The policy only decides the visiting order of the jobs and which ready
//! job runs; release, miss detection and execution are common.

use tracing::{debug, trace};

use super::result::{DeadlineMiss, Slot, Step};
use super::{MissDetection, Scheduler};
use crate::task::{Task, TaskSet, Time};

// ── Job ───────────────────────────────────────────────────────────────────────

/// Run-local working copy of one task.
///
/// Cloned from the caller's [`Task`] and reset before the first step, so the
/// caller's [`TaskSet`] is never mutated by a simulation.
#[derive(Debug, Clone)]
pub struct Job {
    task: Task,

    /// `release + deadline` of the current instance.
    absolute_deadline: Time,

    /// Current instance has already been reported as a miss.
    reported: bool,
}

impl Job {
    pub fn new(task: &Task) -> Self {
        let mut task = task.clone();
        task.reset();
        Self {
            absolute_deadline: task.deadline(),
            task,
            reported: false,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn remaining(&self) -> Time {
        self.task.remaining()
    }

    pub fn absolute_deadline(&self) -> Time {
        self.absolute_deadline
    }

    pub fn is_ready(&self) -> bool {
        self.task.is_ready()
    }

    fn release(&mut self, time: Time) {
        self.task.release(time);
        self.absolute_deadline = time.saturating_add(self.task.deadline());
        self.reported = false;
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Step-wise simulation of one task set under one policy.
///
/// Yields exactly `horizon` [`Step`]s.  Collecting them (or calling
/// [`finish`](Self::finish)) gives the same [`ScheduleResult`] as
/// [`Scheduler::schedule`].
///
/// [`ScheduleResult`]: super::ScheduleResult
pub struct Simulation<'s, S: Scheduler + ?Sized> {
    scheduler: &'s S,
    jobs: Vec<Job>,
    time: Time,
    horizon: Time,
}

impl<'s, S: Scheduler + ?Sized> Simulation<'s, S> {
    pub fn new(scheduler: &'s S, tasks: &TaskSet, horizon: Time) -> Self {
        let jobs = scheduler.prepare(tasks);
        debug!(
            policy = scheduler.name(),
            task_count = jobs.len(),
            horizon,
            order = ?jobs.iter().map(|j| j.task().id()).collect::<Vec<_>>(),
            "simulation prepared"
        );
        Self {
            scheduler,
            jobs,
            time: 0,
            horizon,
        }
    }

    /// Time of the next step to be simulated.
    pub fn time(&self) -> Time {
        self.time
    }

    pub fn horizon(&self) -> Time {
        self.horizon
    }

    /// Current state of every job, in the policy's visiting order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Run the remaining steps and collect the result.
    pub fn finish(self) -> super::ScheduleResult {
        self.collect()
    }

    fn check_absolute_deadlines(&mut self, time: Time, misses: &mut Vec<DeadlineMiss>) {
        for job in &mut self.jobs {
            if !job.reported && job.is_ready() && job.absolute_deadline == time {
                debug!(task = %job.task.id(), time, "deadline passed with work left");
                job.reported = true;
                misses.push(DeadlineMiss::new(job.task.id(), time));
            }
        }
    }

    fn release_phase(&mut self, time: Time, misses: &mut Vec<DeadlineMiss>) {
        for job in &mut self.jobs {
            if !job.task.is_released_at(time) {
                continue;
            }
            // The first release cannot miss; afterwards leftover work means
            // the previous instance did not finish before its successor.
            if time > 0 && job.is_ready() && !job.reported {
                debug!(
                    task = %job.task.id(),
                    time,
                    remaining = job.remaining(),
                    "instance unfinished at next release"
                );
                misses.push(DeadlineMiss::new(job.task.id(), time));
            }
            job.release(time);
            debug!(
                task = %job.task.id(),
                time,
                absolute_deadline = job.absolute_deadline,
                "released"
            );
        }
    }

    fn dispatch_phase(&mut self, time: Time) -> Slot {
        match self.scheduler.select(&self.jobs) {
            Some(idx) => {
                let job = &mut self.jobs[idx];
                job.task.execute_unit();
                trace!(task = %job.task.id(), time, remaining = job.remaining(), "dispatched");
                Slot::Task(job.task.id().to_string())
            }
            None => {
                trace!(time, "idle");
                Slot::Idle
            }
        }
    }
}

impl<S: Scheduler + ?Sized> Iterator for Simulation<'_, S> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.time >= self.horizon {
            return None;
        }
        let time = self.time;
        let mut misses = Vec::new();

        if self.scheduler.miss_detection() == MissDetection::AbsoluteDeadline {
            self.check_absolute_deadlines(time, &mut misses);
        }
        self.release_phase(time, &mut misses);
        let slot = self.dispatch_phase(time);

        self.time += 1;
        Some(Step { time, slot, misses })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.horizon - self.time).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{EarliestDeadlineFirstScheduler, RateMonotonicScheduler};
    use crate::test_support::capture_logs;
    use tracing::Level;

    fn task_set(specs: &[(&str, Time, Time, Time)]) -> TaskSet {
        TaskSet::from_tasks(
            specs
                .iter()
                .map(|&(id, c, t, d)| Task::new(id, c, t, d).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn job_starts_from_reset_task() {
        let mut task = Task::new("A", 3, 8, 6).unwrap();
        task.execute_unit();
        let job = Job::new(&task);
        assert_eq!(job.remaining(), 3);
        assert_eq!(job.absolute_deadline(), 6);
        // the source task is untouched
        assert_eq!(task.remaining(), 2);
    }

    #[test]
    fn steps_are_numbered_from_zero() {
        let tasks = task_set(&[("A", 1, 2, 2)]);
        let rms = RateMonotonicScheduler::new();
        let times: Vec<Time> = Simulation::new(&rms, &tasks, 4).map(|s| s.time).collect();
        assert_eq!(times, [0, 1, 2, 3]);
    }

    #[test]
    fn size_hint_counts_remaining_steps() {
        let tasks = task_set(&[("A", 1, 2, 2)]);
        let edf = EarliestDeadlineFirstScheduler::new();
        let mut sim = Simulation::new(&edf, &tasks, 5);
        assert_eq!(sim.size_hint(), (5, Some(5)));
        sim.next();
        sim.next();
        assert_eq!(sim.size_hint(), (3, Some(3)));
        assert_eq!(sim.time(), 2);
    }

    #[test]
    fn remaining_never_exceeds_execution_time() {
        let tasks = task_set(&[
            ("A", 3, 4, 4),
            ("B", 3, 6, 6),
            ("C", 1, 3, 2),
            ("D", 2, 7, 5),
        ]);
        let rms = RateMonotonicScheduler::new();
        let edf = EarliestDeadlineFirstScheduler::new();

        let mut rms_sim = Simulation::new(&rms, &tasks, 84);
        let mut edf_sim = Simulation::new(&edf, &tasks, 84);
        loop {
            let a = rms_sim.next();
            let b = edf_sim.next();
            for job in rms_sim.jobs().iter().chain(edf_sim.jobs()) {
                assert!(job.remaining() <= job.task().execution_time());
            }
            if a.is_none() && b.is_none() {
                break;
            }
        }
    }

    #[test]
    fn absolute_deadline_tracks_latest_release() {
        let tasks = task_set(&[("A", 1, 4, 3)]);
        let edf = EarliestDeadlineFirstScheduler::new();
        let mut sim = Simulation::new(&edf, &tasks, 10);
        for _ in 0..5 {
            sim.next();
        }
        // released at 0 and 4, now at time 5
        assert_eq!(sim.jobs()[0].absolute_deadline(), 7);
    }

    #[test]
    fn releases_are_logged_at_debug() {
        let tasks = task_set(&[("A", 1, 2, 2)]);
        let rms = RateMonotonicScheduler::new();

        let logs = capture_logs(Level::DEBUG, || {
            Simulation::new(&rms, &tasks, 3).for_each(drop);
        });
        let releases: Vec<&str> = logs.lines().filter(|l| l.contains("released")).collect();
        assert_eq!(releases.len(), 2, "released at 0 and 2:\n{logs}");
        assert!(releases.iter().all(|l| l.contains("DEBUG") && l.contains("task=A")));

        let info_logs = capture_logs(Level::INFO, || {
            Simulation::new(&rms, &tasks, 3).for_each(drop);
        });
        assert!(!info_logs.contains("released"));
    }
}
