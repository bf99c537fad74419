//! Proper divisors by trial division.
//!
//! Trial divisors run over `[2, ceil(sqrt(number))]`; every hit `d`
//! contributes both `d` and `number / d`. A complement can also show up as a
//! trial divisor of its own (for `6`, `2` yields `3` and `3` yields `2`), so
//! divisors are always collected into a set, whether the range is scanned at
//! once or in chunks.

use super::map_chunks;
use crate::{ChunkDescriptor, Error, Result, SearchInterval, WorkerPool};
use num_integer::Roots;
use std::collections::BTreeSet;

/// Smallest integer whose square is at least `number`.
fn ceil_sqrt(number: u64) -> u64 {
    let root = number.sqrt();
    if root * root < number { root + 1 } else { root }
}

fn ensure_positive(number: u64) -> Result<()> {
    if number == 0 {
        return Err(Error::domain("proper divisors are only defined for positive integers"));
    }
    Ok(())
}

/// Trial-division range for `number`, or `None` when there is nothing to try
/// (`number == 1`).
fn trial_divisors(number: u64) -> Result<Option<SearchInterval<u64>>> {
    let upper = ceil_sqrt(number);
    if upper < 2 {
        return Ok(None);
    }
    SearchInterval::new(2, upper).map(Some)
}

/// Divisors of `number` reachable from the trial divisors of `chunk`, either
/// directly or as complements. Never contains `1` or `number` itself.
pub fn divisors_in_chunk(number: u64, chunk: &ChunkDescriptor<u64>) -> BTreeSet<u64> {
    let mut divisors = BTreeSet::new();
    for candidate in chunk.numbers() {
        // Only `2` is its own trial divisor.
        if candidate == number || number % candidate != 0 {
            continue;
        }
        divisors.insert(candidate);
        divisors.insert(number / candidate);
    }
    divisors
}

/// Returns the proper divisors of `number`: every divisor except `number`
/// itself, `1` included when `number > 1`.
///
/// # Errors
///
/// Returns [`Error::ArithmeticDomain`] if `number` is zero.
pub fn find_proper_divisors(number: u64) -> Result<BTreeSet<u64>> {
    ensure_positive(number)?;
    let Some(trials) = trial_divisors(number)? else {
        return Ok(BTreeSet::new());
    };

    let chunk = ChunkDescriptor {
        start: *trials.start(),
        end: *trials.end(),
    };
    let mut divisors = divisors_in_chunk(number, &chunk);
    divisors.insert(1);
    Ok(divisors)
}

/// Returns the proper divisors of `number` in ascending order, splitting the
/// trial-division range across `worker_count` workers.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `worker_count` is zero and
/// [`Error::ArithmeticDomain`] if `number` is zero.
#[cfg_attr(feature = "tracing", tracing::instrument)]
pub fn find_proper_divisors_parallel(number: u64, worker_count: usize) -> Result<Vec<u64>> {
    let workers = super::worker_count(worker_count)?;
    ensure_positive(number)?;
    let Some(trials) = trial_divisors(number)? else {
        return Ok(Vec::new());
    };

    let mut pool = WorkerPool::new(workers)?;
    let divisors = map_chunks(&mut pool, &trials, move |chunk: &ChunkDescriptor<u64>| {
        Ok(divisors_in_chunk(number, chunk).into_iter().collect())
    })?;

    // `1` is never a trial divisor; it precedes everything the chunks found.
    let mut sorted = Vec::with_capacity(divisors.len() + 1);
    sorted.push(1);
    sorted.extend(divisors);
    Ok(sorted)
}

/// Sum of the proper divisors of `number`.
///
/// Accumulated in `u128`, which cannot overflow for any `u64` input.
///
/// # Errors
///
/// Returns [`Error::ArithmeticDomain`] if `number` is zero.
pub fn sum_of_proper_divisors(number: u64) -> Result<u128> {
    Ok(find_proper_divisors(number)?.into_iter().map(u128::from).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u64]) -> BTreeSet<u64> {
        values.iter().copied().collect()
    }

    #[test]
    fn no_duplicate_divisors_of_six() {
        assert_eq!(find_proper_divisors(6).unwrap(), set(&[1, 2, 3]));
    }

    #[test]
    fn small_numbers() {
        assert_eq!(find_proper_divisors(1).unwrap(), set(&[]));
        assert_eq!(find_proper_divisors(2).unwrap(), set(&[1]));
        assert_eq!(find_proper_divisors(3).unwrap(), set(&[1]));
        assert_eq!(find_proper_divisors(4).unwrap(), set(&[1, 2]));
        assert_eq!(find_proper_divisors(9).unwrap(), set(&[1, 3]));
        assert_eq!(find_proper_divisors(12).unwrap(), set(&[1, 2, 3, 4, 6]));
    }

    #[test]
    fn amicable_pair_divisors() {
        assert_eq!(
            find_proper_divisors(220).unwrap(),
            set(&[1, 2, 4, 5, 10, 11, 20, 22, 44, 55, 110])
        );
        assert_eq!(find_proper_divisors(284).unwrap(), set(&[1, 2, 4, 71, 142]));
    }

    #[test]
    fn every_divisor_divides() {
        for number in 2..2_000_u64 {
            let divisors = find_proper_divisors(number).unwrap();
            assert!(divisors.contains(&1), "{number}");
            assert!(!divisors.contains(&number), "{number}");
            for divisor in &divisors {
                assert_eq!(number % divisor, 0, "{divisor} does not divide {number}");
            }

            let brute: BTreeSet<u64> = (1..number).filter(|d| number % d == 0).collect();
            assert_eq!(divisors, brute, "{number}");
        }
    }

    #[test]
    fn primes_only_have_one() {
        for prime in [2_u64, 3, 5, 7, 13, 97, 7919, 1_000_000_007] {
            assert_eq!(find_proper_divisors(prime).unwrap(), set(&[1]));
        }
    }

    #[test]
    fn perfect_squares_near_the_root() {
        assert_eq!(ceil_sqrt(0), 0);
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(15), 4);
        assert_eq!(ceil_sqrt(16), 4);
        assert_eq!(ceil_sqrt(17), 5);
        assert_eq!(ceil_sqrt(u64::MAX), 1 << 32);
        assert_eq!(find_proper_divisors(49).unwrap(), set(&[1, 7]));
    }

    #[test]
    fn zero_is_outside_the_domain() {
        assert!(matches!(find_proper_divisors(0), Err(Error::ArithmeticDomain { .. })));
        assert!(matches!(sum_of_proper_divisors(0), Err(Error::ArithmeticDomain { .. })));
        assert!(matches!(
            find_proper_divisors_parallel(0, 2),
            Err(Error::ArithmeticDomain { .. })
        ));
    }

    #[test]
    fn parallel_matches_sequential() {
        for number in [1_u64, 2, 6, 28, 220, 284, 496, 1_184, 8_128, 720_720, 1_000_000_007] {
            let expected: Vec<u64> = find_proper_divisors(number).unwrap().into_iter().collect();
            for workers in [1, 2, 3, 8, 64] {
                assert_eq!(
                    find_proper_divisors_parallel(number, workers).unwrap(),
                    expected,
                    "{number} with {workers} workers"
                );
            }
        }
    }

    #[test]
    fn parallel_rejects_zero_workers() {
        assert!(matches!(
            find_proper_divisors_parallel(6, 0),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn sums() {
        assert_eq!(sum_of_proper_divisors(1).unwrap(), 0);
        assert_eq!(sum_of_proper_divisors(6).unwrap(), 6);
        assert_eq!(sum_of_proper_divisors(220).unwrap(), 284);
        assert_eq!(sum_of_proper_divisors(284).unwrap(), 220);
    }
}
