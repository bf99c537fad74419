//! Chunked enumeration engine and the searches built on it.
//!
//! Every search follows the same path: validate arguments, split the interval
//! into one chunk per worker, dispatch each chunk to the [`WorkerPool`], wait
//! on the barrier, and [`aggregate`] the partial results. Multi-tier sweeps
//! repeat this per digit-length tier, consulting a [`TierPruner`] before each
//! one.
//!
//! ## Structure
//!
//! - [`narcissistic`] - digit-power invariance (narcissistic numbers).
//! - [`division`] - proper divisors by trial division.
//! - [`amicable`] - divisor-sum reciprocity (amicable pairs).

pub mod amicable;
pub mod division;
pub mod narcissistic;

use crate::{
    ChunkDescriptor, Error, PartialResult, Result, SearchInterval, SearchNumber, TierPruner,
    WorkerPool, aggregate,
    digits::{digit_count, highest_n_digit_number, lowest_n_digit_number},
};
use core::num::NonZeroUsize;
use num_bigint::BigUint;
use std::sync::Arc;

/// Validates a caller-supplied worker count.
pub(crate) fn worker_count(workers: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(workers)
        .ok_or_else(|| Error::invalid_argument("worker count must be greater than 0"))
}

/// Keeps every number of `numbers` that satisfies `predicate`, stopping at the
/// first predicate error.
fn filter_numbers<T, P>(numbers: impl Iterator<Item = T>, predicate: &P) -> Result<Vec<T>>
where
    P: Fn(&T) -> Result<bool>,
{
    let mut found = Vec::new();
    for number in numbers {
        if predicate(&number)? {
            found.push(number);
        }
    }
    Ok(found)
}

/// Applies `predicate` to every number of `interval` on the calling thread.
///
/// # Errors
///
/// Propagates the first predicate error.
pub fn search_tier_sequential<T, P>(interval: &SearchInterval<T>, predicate: P) -> Result<Vec<T>>
where
    T: SearchNumber,
    P: Fn(&T) -> Result<bool>,
{
    filter_numbers(interval.numbers(), &predicate)
}

/// Splits `interval` into one chunk per worker and queues `chunk_fn` for each
/// chunk, then waits on the barrier.
///
/// The returned partial results are in completion order.
fn dispatch_chunks<T, U, F>(
    pool: &mut WorkerPool<U>,
    interval: &SearchInterval<T>,
    chunk_fn: Arc<F>,
) -> Result<Vec<PartialResult<U>>>
where
    T: SearchNumber,
    U: Send + 'static,
    F: Fn(&ChunkDescriptor<T>) -> Result<Vec<U>> + Send + Sync + 'static,
{
    let chunks = interval.partition(pool.worker_count());

    #[cfg(feature = "tracing")]
    tracing::debug!("Dispatching {} chunk(s) over {interval}", chunks.len());

    for chunk in chunks {
        let chunk_fn = Arc::clone(&chunk_fn);
        let label = chunk.to_string();
        pool.dispatch(&label, move || chunk_fn(&chunk))?;
    }

    pool.await_all()
}

/// Evaluates `chunk_fn` over every chunk of `interval` on the pool and
/// aggregates the values into an ascending, duplicate-free sequence.
///
/// # Errors
///
/// Returns [`Error::TaskFailure`] naming every chunk whose evaluation failed.
pub fn map_chunks<T, U, F>(
    pool: &mut WorkerPool<U>,
    interval: &SearchInterval<T>,
    chunk_fn: F,
) -> Result<Vec<U>>
where
    T: SearchNumber,
    U: Ord + Send + 'static,
    F: Fn(&ChunkDescriptor<T>) -> Result<Vec<U>> + Send + Sync + 'static,
{
    let partials = dispatch_chunks(pool, interval, Arc::new(chunk_fn))?;
    Ok(aggregate(partials))
}

/// Applies `predicate` to every number of `interval`, chunked across the pool.
///
/// # Errors
///
/// Returns [`Error::TaskFailure`] naming every chunk whose predicate failed.
pub fn search_tier<T, P>(
    pool: &mut WorkerPool<T>,
    interval: &SearchInterval<T>,
    predicate: P,
) -> Result<Vec<T>>
where
    T: SearchNumber,
    P: Fn(&T) -> Result<bool> + Send + Sync + 'static,
{
    map_chunks(pool, interval, move |chunk: &ChunkDescriptor<T>| {
        filter_numbers(chunk.numbers(), &predicate)
    })
}

/// Sweeps every digit-length tier between `lowest` and `highest` in ascending
/// order.
///
/// Before each tier, `pruner` is consulted; the sweep halts at the first tier
/// it rules out and never looks at a longer one. Each remaining tier is
/// clipped to `[lowest, highest]`, searched with the predicate built by
/// `predicate_for(digit_count)`, and fully awaited before the next tier
/// starts. The partial results of all tiers are aggregated once at the end.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `lowest > highest`, and
/// [`Error::TaskFailure`] if any chunk of a tier failed (later tiers are not
/// searched).
pub fn sweep_tiers<R, F, P>(
    pool: &mut WorkerPool<BigUint>,
    lowest: &BigUint,
    highest: &BigUint,
    pruner: &R,
    mut predicate_for: F,
) -> Result<Vec<BigUint>>
where
    R: TierPruner + ?Sized,
    F: FnMut(u32) -> P,
    P: Fn(&BigUint) -> Result<bool> + Send + Sync + 'static,
{
    if lowest > highest {
        return Err(Error::invalid_argument(format!(
            "lowest bound {lowest} exceeds highest bound {highest}"
        )));
    }

    let mut partials = Vec::new();

    for digits in digit_count(lowest)..=digit_count(highest) {
        if !pruner.may_contain_solution(digits) {
            #[cfg(feature = "tracing")]
            tracing::debug!("No solution can have {digits} digits, stopping sweep");
            break;
        }

        let start = lowest_n_digit_number::<BigUint>(digits)?.max(lowest.clone());
        let end = highest_n_digit_number::<BigUint>(digits)?.min(highest.clone());
        let interval = SearchInterval::new(start, end)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Searching {digits}-digit tier {interval}");

        let predicate = predicate_for(digits);
        let chunk_fn =
            move |chunk: &ChunkDescriptor<BigUint>| filter_numbers(chunk.numbers(), &predicate);
        partials.extend(dispatch_chunks(pool, &interval, Arc::new(chunk_fn))?);
    }

    Ok(aggregate(partials))
}
