/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Simulation file loading and horizon resolution.
//!
//! The expected YAML structure is:
//! ```yaml
//! simulation:
//!   algorithm: edf                  # rms | edf
//!   horizon: 40                     # optional
//!   miss_detection: next_release    # next_release | absolute_deadline
//! tasks:
//!   - id: T1
//!     execution_time: 1
//!     period: 4
//!     deadline: 4                   # optional, defaults to period
//!   - { id: T2, execution_time: 2, period: 5 }
//! ```
//!
//! Every task goes through the same validation as interactive input
//! ([`input::validate`]), and duplicate identifiers are rejected.

pub mod input;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::hyperperiod::{self, DEFAULT_HYPERPERIOD_LIMIT};
use crate::scheduler::{MissDetection, Policy};
use crate::task::{TaskSet, Time};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Horizon used when nothing else determines one.
pub const DEFAULT_HORIZON: Time = 40;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationFile {
    #[serde(default)]
    simulation: SimulationSection,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationSection {
    algorithm: Option<String>,
    horizon: Option<Time>,
    miss_detection: Option<MissDetection>,
}

/// Signed so that negative values reach validation and get a precise error
/// instead of a generic deserialisation failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskEntry {
    id: String,
    execution_time: i64,
    period: i64,
    deadline: Option<i64>,
}

// ── SimulationConfig ──────────────────────────────────────────────────────────

/// Everything a simulation file can specify.  Absent settings stay `None` so
/// command-line values can fill or override them.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub policy: Option<Policy>,
    pub horizon: Option<Time>,
    pub miss_detection: Option<MissDetection>,
    pub tasks: TaskSet,
}

impl SimulationConfig {
    /// Parse `path` into a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is malformed,
    /// the algorithm name is unknown, the horizon is zero, or any task fails
    /// validation.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading simulation file: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open simulation file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid simulation file: {}", path.display()))
    }

    /// Parse a YAML document with the layout shown in the module docs.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: SimulationFile =
            serde_yaml::from_str(content).context("Failed to parse YAML")?;

        let policy = file
            .simulation
            .algorithm
            .as_deref()
            .map(str::parse::<Policy>)
            .transpose()?;

        if file.simulation.horizon == Some(0) {
            anyhow::bail!("horizon must be positive");
        }

        let mut tasks = TaskSet::new();
        for entry in file.tasks {
            let task = input::validate(
                &entry.id,
                entry.execution_time,
                entry.period,
                entry.deadline,
            )?;
            debug!(
                "  Task: {} | C={} T={} D={}",
                task.id(),
                task.execution_time(),
                task.period(),
                task.deadline()
            );
            tasks.add(task)?;
        }

        if tasks.is_empty() {
            warn!("Simulation file defines no tasks");
        }

        info!(
            task_count = tasks.len(),
            algorithm = ?policy,
            horizon = ?file.simulation.horizon,
            "Simulation file loaded"
        );

        Ok(Self {
            policy,
            horizon: file.simulation.horizon,
            miss_detection: file.simulation.miss_detection,
            tasks,
        })
    }
}

// ── Horizon resolution ────────────────────────────────────────────────────────

/// Choose the simulation horizon.
///
/// Order: command line, then file, then one hyperperiod of `tasks` if it is
/// at most [`DEFAULT_HYPERPERIOD_LIMIT`], then [`DEFAULT_HORIZON`].
pub fn resolve_horizon(cli: Option<Time>, file: Option<Time>, tasks: &TaskSet) -> Time {
    if let Some(h) = cli.or(file) {
        return h;
    }
    match hyperperiod::calculate(tasks, DEFAULT_HYPERPERIOD_LIMIT) {
        Ok(info) => {
            info!(
                horizon = info.hyperperiod,
                "Using one hyperperiod as simulation horizon"
            );
            info.hyperperiod
        }
        Err(e) => {
            debug!("No usable hyperperiod ({e}), using default horizon");
            DEFAULT_HORIZON
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
