/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Real-time replay of a simulation, one unit per tick.
//!
//! The simulation itself stays synchronous; this module only paces
//! [`Simulation`] steps with a [`tokio::time::interval`] and stops early when
//! the watch channel flips to `true`.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::scheduler::{ScheduleResult, Scheduler, Simulation, Step};
use crate::task::Time;

/// Shortest accepted tick; `tokio::time::interval` panics on zero.
const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackOutcome {
    /// Every unit up to the horizon was played.
    Completed(ScheduleResult),
    /// Stopped before unit `at`; `partial` holds the units already played.
    Cancelled { at: Time, partial: ScheduleResult },
}

impl PlaybackOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PlaybackOutcome::Cancelled { .. })
    }

    /// Whatever part of the schedule was played.
    pub fn into_result(self) -> ScheduleResult {
        match self {
            PlaybackOutcome::Completed(result) => result,
            PlaybackOutcome::Cancelled { partial, .. } => partial,
        }
    }
}

/// Advance `sim` once per `tick`, handing every step to `on_step`.
///
/// Cancellation is checked before each unit, so a step that has started is
/// always delivered.  A dropped sender is treated as "never cancel".
pub async fn play<S, F>(
    mut sim: Simulation<'_, S>,
    tick: Duration,
    mut cancel: watch::Receiver<bool>,
    mut on_step: F,
) -> PlaybackOutcome
where
    S: Scheduler + ?Sized,
    F: FnMut(&Step),
{
    let mut interval = tokio::time::interval(tick.max(MIN_TICK));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        horizon = sim.horizon(),
        tick_ms = tick.as_millis() as u64,
        "Starting playback"
    );

    let mut steps = Vec::new();
    let mut cancel_open = true;

    while sim.time() < sim.horizon() {
        if *cancel.borrow() {
            let at = sim.time();
            info!(at, "Playback cancelled");
            return PlaybackOutcome::Cancelled {
                at,
                partial: steps.into_iter().collect(),
            };
        }

        tokio::select! {
            _ = interval.tick() => {}
            changed = cancel.changed(), if cancel_open => {
                if changed.is_err() {
                    debug!("cancel sender dropped, playback runs to completion");
                    cancel_open = false;
                }
                continue;
            }
        }

        let Some(step) = sim.next() else { break };
        on_step(&step);
        steps.push(step);
    }

    info!("Playback finished");
    PlaybackOutcome::Completed(steps.into_iter().collect())
}
