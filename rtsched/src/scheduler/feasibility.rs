/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Utilisation-based schedulability analysis.
//!
//! # Advisory only
//! These tests are quick admission checks, not guarantees about what a
//! simulation will show:
//!
//! * The Liu & Layland bound is **sufficient but not necessary** for
//!   rate-monotonic scheduling.  A set above the bound may still meet every
//!   deadline (e.g. harmonic periods at `U = 1.0`), and the bound assumes
//!   `D = T`; a set with `U ≤ 1.0` and tighter deadlines can still miss.
//! * The EDF test is exact only when every deadline equals its period.  With
//!   `D < T` the density test used here is sufficient only.
//!
//! # Theory
//! **Liu & Layland (1973)**: `n` independent periodic tasks with implicit
//! deadlines are schedulable under rate-monotonic priorities on one
//! processor if
//!
//! $$U = \sum_{i=1}^{n} \frac{C_i}{T_i} \leq n \left(2^{1/n} - 1\right)$$
//!
//! | n | Bound |
//! |---|---|
//! | 1 | 1.000 |
//! | 2 | 0.828 |
//! | 3 | 0.780 |
//! | 5 | 0.743 |
//! | ∞ | ln(2) ≈ 0.693 |
//!
//! Under EDF the same set is schedulable if and only if `U ≤ 1`.

use tracing::{info, warn};

use crate::task::TaskSet;

// ── Public API ────────────────────────────────────────────────────────────────

/// Exact sum of `C_i / T_i` over the set.
pub fn total_utilization(tasks: &TaskSet) -> f64 {
    tasks.iter().map(|t| t.utilization()).sum()
}

/// Sum of `C_i / min(D_i, T_i)`.  Equals [`total_utilization`] when every
/// deadline is implicit.
pub fn total_density(tasks: &TaskSet) -> f64 {
    tasks
        .iter()
        .map(|t| t.execution_time() as f64 / t.deadline().min(t.period()) as f64)
        .sum()
}

/// Liu & Layland bound `n × (2^(1/n) − 1)`; `0.0` for `n = 0`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// `true` if `utilization` of `n` tasks is within the Liu & Layland bound.
pub fn rms_bound_admits(utilization: f64, n: usize) -> bool {
    utilization <= liu_layland_bound(n)
}

/// Liu & Layland admission check for rate-monotonic scheduling.
///
/// Advisory: see the module docs.  An empty set is trivially schedulable.
pub fn is_schedulable_rms(tasks: &TaskSet) -> bool {
    rms_bound_admits(total_utilization(tasks), tasks.len())
}

/// Utilisation (implicit deadlines) or density (constrained deadlines) test
/// for EDF.
pub fn is_schedulable_edf(tasks: &TaskSet) -> bool {
    total_density(tasks) <= 1.0
}

// ── Report ────────────────────────────────────────────────────────────────────

/// All analysis figures for one task set, computed together.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityReport {
    pub task_count: usize,
    pub utilization: f64,
    pub rms_bound: f64,
    pub rms_schedulable: bool,
    pub edf_schedulable: bool,
    /// Every task has `D == T`; when false both tests are weaker.
    pub implicit_deadlines: bool,
}

/// Run every test on `tasks` and log the verdicts.
pub fn analyze(tasks: &TaskSet) -> FeasibilityReport {
    let report = FeasibilityReport {
        task_count: tasks.len(),
        utilization: total_utilization(tasks),
        rms_bound: liu_layland_bound(tasks.len()),
        rms_schedulable: is_schedulable_rms(tasks),
        edf_schedulable: is_schedulable_edf(tasks),
        implicit_deadlines: tasks.iter().all(|t| t.has_implicit_deadline()),
    };

    info!(
        task_count = report.task_count,
        utilization = report.utilization,
        rms_bound = report.rms_bound,
        "feasibility analysis"
    );
    if !report.rms_schedulable {
        warn!(
            utilization = report.utilization,
            bound = report.rms_bound,
            "task set may not be RM-schedulable (utilization exceeds Liu & Layland bound)"
        );
    }
    if report.utilization > 1.0 {
        warn!(
            utilization = report.utilization,
            "processor overloaded: deadline misses are unavoidable over a long enough horizon"
        );
    }

    report
}

// ── Tests ─────────────────────────────────────────────────────────────────────
