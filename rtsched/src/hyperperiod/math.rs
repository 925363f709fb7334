/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! GCD and overflow-checked LCM over simulation time units.

use super::HyperperiodError;
use crate::task::Time;

/// Iterative Euclid.  `gcd(0, x) == x`.
pub fn gcd(mut a: Time, mut b: Time) -> Time {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// LCM of two periods, `Err(Overflow)` if it does not fit in [`Time`].
///
/// Divides before multiplying so intermediate values stay as small as
/// possible.  Zero inputs yield zero.
pub fn lcm(a: Time, b: Time) -> Result<Time, HyperperiodError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// Fold `periods` into their common LCM.  An empty iterator yields `Ok(1)`,
/// the identity of LCM.
pub fn lcm_all(periods: impl IntoIterator<Item = Time>) -> Result<Time, HyperperiodError> {
    periods.into_iter().try_fold(1, lcm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_small_values() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(10, 4), 2);
        assert_eq!(gcd(17, 13), 1);
        assert_eq!(gcd(0, 6), 6);
        assert_eq!(gcd(6, 0), 6);
    }

    #[test]
    fn lcm_small_values() {
        assert_eq!(lcm(4, 6).unwrap(), 12);
        assert_eq!(lcm(4, 5).unwrap(), 20);
        assert_eq!(lcm(5, 10).unwrap(), 10);
        assert_eq!(lcm(0, 3).unwrap(), 0);
    }

    #[test]
    fn lcm_overflow_is_reported_with_operands() {
        let a = Time::MAX / 2 + 1;
        let b = Time::MAX / 2 + 3;
        assert_eq!(lcm(a, b), Err(HyperperiodError::Overflow { a, b }));
    }

    #[test]
    fn lcm_all_folds_every_period() {
        assert_eq!(lcm_all([4, 5, 10]).unwrap(), 20);
        assert_eq!(lcm_all([4, 6]).unwrap(), 12);
        assert_eq!(lcm_all([7]).unwrap(), 7);
        assert_eq!(lcm_all(Vec::<Time>::new()).unwrap(), 1);
    }
}
