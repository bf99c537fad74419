//! Amicable numbers.
//!
//! `a` and `b` are amicable when the proper divisors of each sum to the other,
//! e.g. `220` and `284`. A perfect number, whose proper divisors sum to itself,
//! satisfies the same reciprocity and is reported as its own counterpart.

use super::map_chunks;
use crate::{
    ChunkDescriptor, Result, SearchInterval, WorkerPool,
    digits::{highest_n_digit_number, lowest_n_digit_number},
    search::division::sum_of_proper_divisors,
};

/// Returns the amicable counterpart of `number`, if any.
///
/// # Errors
///
/// Returns [`crate::Error::ArithmeticDomain`] if `number` is zero.
pub fn get_amicable(number: u64) -> Result<Option<u64>> {
    let sum = sum_of_proper_divisors(number)?;

    // A sum outside `u64` cannot have `number` as its own divisor sum, and
    // zero (the sum for `1`) has no proper divisors at all.
    let Ok(candidate) = u64::try_from(sum) else {
        return Ok(None);
    };
    if candidate == 0 {
        return Ok(None);
    }

    if sum_of_proper_divisors(candidate)? == u128::from(number) {
        Ok(Some(candidate))
    } else {
        Ok(None)
    }
}

/// The positive part of the `digit_count`-digit tier; zero is skipped since it
/// has no proper divisors.
fn amicable_tier(digit_count: u32) -> Result<SearchInterval<u64>> {
    let lowest: u64 = lowest_n_digit_number(digit_count)?;
    SearchInterval::new(lowest.max(1), highest_n_digit_number(digit_count)?)
}

fn pairs_in(numbers: impl Iterator<Item = u64>) -> Result<Vec<(u64, u64)>> {
    let mut pairs = Vec::new();
    for number in numbers {
        if let Some(amicable) = get_amicable(number)? {
            pairs.push((number, amicable));
        }
    }
    Ok(pairs)
}

/// Finds every `(number, counterpart)` pair whose first member has
/// `digit_count` digits, ordered by `number`.
///
/// Both orderings of a pair are listed when both members fall in the tier.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if `digit_count` is zero or
/// `digit_count`-digit numbers do not fit in `u64`.
#[cfg_attr(feature = "tracing", tracing::instrument)]
pub fn find_amicable_numbers(digit_count: u32) -> Result<Vec<(u64, u64)>> {
    pairs_in(amicable_tier(digit_count)?.numbers())
}

/// Same as [`find_amicable_numbers`], with the tier split across
/// `worker_count` workers.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] for a zero `worker_count` or an
/// unsupported `digit_count`, and [`crate::Error::TaskFailure`] if a chunk
/// failed.
#[cfg_attr(feature = "tracing", tracing::instrument)]
pub fn find_amicable_numbers_parallel(
    digit_count: u32,
    worker_count: usize,
) -> Result<Vec<(u64, u64)>> {
    let workers = super::worker_count(worker_count)?;
    let tier = amicable_tier(digit_count)?;

    let mut pool = WorkerPool::new(workers)?;
    map_chunks(&mut pool, &tier, |chunk: &ChunkDescriptor<u64>| {
        pairs_in(chunk.numbers())
    })
}
