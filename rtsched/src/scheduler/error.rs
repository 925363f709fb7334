/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Errors raised while choosing a scheduler.
//!
//! Running a simulation cannot fail; the only thing that can go wrong on the
//! scheduler side is asking for a policy that does not exist.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The policy name is not one of the recognised spellings.
    #[error("unknown scheduling algorithm: '{0}' (valid: rms, edf)")]
    UnknownPolicy(String),
}
