/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! rtsched – discrete-time uniprocessor real-time scheduling simulator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task.rs         – Task, TaskSet and the Time unit
//! ├── error.rs        – task construction / admission errors
//! ├── config/         – YAML simulation files, user input validation
//! ├── hyperperiod/    – GCD / LCM helpers, default horizon
//! ├── scheduler/      – RMS and EDF policies, engine, feasibility tests
//! ├── report.rs       – text Gantt chart and YAML summary
//! └── playback.rs     – paced, cancellable replay of a simulation
//! ```

pub mod config;
pub mod error;
pub mod hyperperiod;
pub mod playback;
pub mod report;
pub mod scheduler;
pub mod task;

#[cfg(test)]
mod test_support;
