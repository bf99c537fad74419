//! Narcissistic numbers.
//!
//! An `n`-digit number is narcissistic when it equals the sum of the `n`-th
//! powers of its digits, e.g. `153 = 1^3 + 5^3 + 3^3`. They are also known as
//! Armstrong numbers, pluperfect digital invariants or plus perfect numbers.
//!
//! Power sums reach `n * 9^n`, which overflows `u128` from 39 digits on, so
//! everything here is computed on [`BigUint`].

use super::{search_tier_sequential, sweep_tiers};
use crate::{
    NarcissisticBound, Result, SearchInterval, WorkerPool,
    digits::{digit_count, digit_split, highest_n_digit_number, lowest_n_digit_number},
    may_contain_narcissistic,
};
use num_bigint::BigUint;
use num_traits::Zero;

/// Precomputed `digit^n` for every decimal digit, for one tier of `n`-digit
/// numbers.
#[derive(Clone, Debug)]
pub struct DigitPowers {
    digit_count: u32,
    powers: [BigUint; 10],
}

impl DigitPowers {
    pub fn new(digit_count: u32) -> Self {
        Self {
            digit_count,
            powers: core::array::from_fn(|digit| BigUint::from(digit).pow(digit_count)),
        }
    }

    pub const fn digit_count(&self) -> u32 {
        self.digit_count
    }

    /// Sum of the `n`-th powers of the digits of `number`.
    pub fn power_sum(&self, number: &BigUint) -> BigUint {
        digit_split(number)
            .into_iter()
            .fold(BigUint::zero(), |sum, digit| sum + &self.powers[usize::from(digit)])
    }

    /// Returns `true` if `number` equals its digit-power sum.
    pub fn matches(&self, number: &BigUint) -> bool {
        self.power_sum(number) == *number
    }

    /// Predicate over one `digit_count`-digit tier, as consumed by sweeps.
    fn tier_predicate(
        digit_count: u32,
    ) -> impl Fn(&BigUint) -> Result<bool> + Send + Sync + 'static {
        let powers = Self::new(digit_count);
        move |number: &BigUint| Ok(powers.matches(number))
    }
}

/// Returns `true` if `number` is narcissistic.
///
/// The exponent is the number of digits of `number` itself; every single-digit
/// number, zero included, is narcissistic.
pub fn is_narcissistic(number: &BigUint) -> bool {
    DigitPowers::new(digit_count(number)).matches(number)
}

/// Returns `true` if `number` equals the sum of the `digit_count`-th powers of
/// its digits.
///
/// When scanning many numbers of the same length this skips recounting their
/// digits; for repeated calls prefer building one [`DigitPowers`].
pub fn is_narcissistic_with_digits(number: &BigUint, digit_count: u32) -> bool {
    DigitPowers::new(digit_count).matches(number)
}

/// Finds every narcissistic number with `digit_count` digits, in ascending
/// order, on the calling thread.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if `digit_count` is zero.
#[cfg_attr(feature = "tracing", tracing::instrument)]
pub fn find_narcissistic_numbers(digit_count: u32) -> Result<Vec<BigUint>> {
    let interval = SearchInterval::new(
        lowest_n_digit_number(digit_count)?,
        highest_n_digit_number(digit_count)?,
    )?;

    if !may_contain_narcissistic(digit_count) {
        return Ok(Vec::new());
    }

    let powers = DigitPowers::new(digit_count);
    search_tier_sequential(&interval, |number| Ok(powers.matches(number)))
}

/// Finds every narcissistic number with `digit_count` digits, in ascending
/// order, splitting the tier across `worker_count` workers.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if `digit_count` or
/// `worker_count` is zero.
#[cfg_attr(feature = "tracing", tracing::instrument)]
pub fn find_narcissistic_numbers_parallel(
    digit_count: u32,
    worker_count: usize,
) -> Result<Vec<BigUint>> {
    let lowest: BigUint = lowest_n_digit_number(digit_count)?;
    let highest: BigUint = highest_n_digit_number(digit_count)?;
    find_narcissistic_between(lowest, highest, worker_count)
}

/// Finds every narcissistic number in `[lowest, highest]`, in ascending order.
///
/// The range is swept one digit-length tier at a time, each tier split across
/// `worker_count` workers. The sweep stops at the first tier whose largest
/// possible digit-power sum is below its smallest number, since neither it
/// nor any longer tier can hold a narcissistic number.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if `worker_count` is zero or
/// `lowest > highest`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(worker_count = worker_count)))]
pub fn find_narcissistic_between(
    lowest: impl Into<BigUint>,
    highest: impl Into<BigUint>,
    worker_count: usize,
) -> Result<Vec<BigUint>> {
    let workers = super::worker_count(worker_count)?;
    let lowest = lowest.into();
    let highest = highest.into();

    if lowest > highest {
        return Err(crate::Error::invalid_argument(format!(
            "lowest bound {lowest} exceeds highest bound {highest}"
        )));
    }

    let mut pool = WorkerPool::new(workers)?;
    sweep_tiers(&mut pool, &lowest, &highest, &NarcissisticBound, DigitPowers::tier_predicate)
}
