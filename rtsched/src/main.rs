/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tokio::sync::watch;
use tracing::{error, info, warn};

use rtsched::config::input::parse_task_spec;
use rtsched::config::{resolve_horizon, SimulationConfig};
use rtsched::playback::{self, PlaybackOutcome};
use rtsched::report::Report;
use rtsched::scheduler::{
    feasibility, MissDetection, Policy, ScheduleResult, Scheduler, Simulation, Step,
};
use rtsched::task::{Task, TaskSet, Time};

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Yaml,
}

/// Discrete-time RMS / EDF scheduling simulator.
///
/// Example:
///   rtsched -a edf -t T1:1:4 -t T2:2:5 -t T3:1:10
///   rtsched --config demos/sim.yaml --animate-ms 200
#[derive(Debug, Parser)]
#[command(
    name = "rtsched",
    about = "Simulate rate-monotonic and earliest-deadline-first scheduling",
    long_about = None,
)]
struct Cli {
    /// Path to a YAML simulation file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Task as ID:C:T[:D]; repeatable, added after the file's tasks.
    #[arg(short = 't', long = "task", value_parser = parse_task_spec)]
    tasks: Vec<Task>,

    /// Scheduling algorithm (rms | edf).  Overrides the file.
    #[arg(short = 'a', long = "algorithm", value_parser = parse_policy)]
    algorithm: Option<Policy>,

    /// Number of time units to simulate.  Overrides the file.
    #[arg(short = 'H', long = "horizon", value_parser = clap::value_parser!(u64).range(1..))]
    horizon: Option<Time>,

    /// Also report a miss when an instance passes its absolute deadline.
    #[arg(long = "strict-deadlines", default_value_t = false)]
    strict_deadlines: bool,

    /// Report format written to stdout.
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Replay the schedule one unit every N milliseconds (Ctrl-C stops).
    #[arg(long = "animate-ms")]
    animate_ms: Option<u64>,
}

fn parse_policy(s: &str) -> Result<Policy, rtsched::scheduler::SchedulerError> {
    s.parse()
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so the report on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!(
        config = ?cli.config,
        cli_tasks = cli.tasks.len(),
        algorithm = ?cli.algorithm,
        horizon = ?cli.horizon,
        strict_deadlines = cli.strict_deadlines,
        animate_ms = ?cli.animate_ms,
        "Configuration"
    );

    // ── Assemble the task set ─────────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load_from_file(path)?,
        None => {
            info!("No simulation file provided, using command-line tasks only");
            SimulationConfig::default()
        }
    };

    for task in cli.tasks {
        config
            .tasks
            .add(task)
            .context("Cannot add command-line task")?;
    }

    if config.tasks.is_empty() {
        bail!("no tasks to schedule (use --config or --task)");
    }

    // ── Resolve settings (CLI > file > defaults) ──────────────────────────────
    let policy = cli.algorithm.or(config.policy).unwrap_or_default();
    let detection = if cli.strict_deadlines {
        MissDetection::AbsoluteDeadline
    } else {
        config.miss_detection.unwrap_or_default()
    };
    let horizon = resolve_horizon(cli.horizon, config.horizon, &config.tasks);

    feasibility::analyze(&config.tasks);

    // ── Simulate ──────────────────────────────────────────────────────────────
    let scheduler = policy.scheduler(detection);
    let result = match cli.animate_ms {
        Some(ms) => {
            animate(
                scheduler.as_ref(),
                &config.tasks,
                horizon,
                Duration::from_millis(ms),
            )
            .await
        }
        None => scheduler.schedule(&config.tasks, horizon),
    };

    // ── Report ────────────────────────────────────────────────────────────────
    let report = Report::new(scheduler.name(), &config.tasks, &result);
    match cli.output {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Yaml => print!(
            "{}",
            report.to_yaml().context("Failed to serialise report")?
        ),
    }
    Ok(())
}

/// Play the simulation on stdout until it ends or Ctrl-C is pressed.
async fn animate(
    scheduler: &(dyn Scheduler + Send + Sync),
    tasks: &TaskSet,
    horizon: Time,
    tick: Duration,
) -> ScheduleResult {
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, stopping playback");
            let _ = cancel_tx.send(true);
        }
    });

    let outcome = playback::play(
        Simulation::new(scheduler, tasks, horizon),
        tick,
        cancel_rx,
        print_step,
    )
    .await;
    ctrl_c.abort();

    if let PlaybackOutcome::Cancelled { at, .. } = &outcome {
        warn!(at, "Showing partial schedule");
    }
    outcome.into_result()
}

fn print_step(step: &Step) {
    println!("t={:>4}  {}", step.time, step.slot);
    for miss in &step.misses {
        println!("        ! {miss}");
    }
}
