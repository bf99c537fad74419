//! Inclusive search intervals and their partition into worker chunks.

use crate::{Error, Result, SearchNumber};
use core::{fmt, num::NonZeroUsize};

/// An inclusive `[start, end]` range of integers to search.
///
/// Construction enforces `start <= end`; the interval is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInterval<T> {
    start: T,
    end: T,
}

impl<T: SearchNumber> SearchInterval<T> {
    /// Creates a new interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `start > end`.
    pub fn new(start: T, end: T) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_argument(format!(
                "interval start {start} exceeds end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> &T {
        &self.start
    }

    pub const fn end(&self) -> &T {
        &self.end
    }

    /// Iterates every number of the interval in ascending order.
    pub fn numbers(&self) -> Numbers<T> {
        Numbers::new(self.start.clone(), self.end.clone())
    }

    /// Splits the interval into at most `chunk_count` contiguous chunks.
    ///
    /// Every chunk holds `ceil(len / chunk_count)` numbers except possibly the
    /// last one. When the interval holds fewer numbers than `chunk_count`, only
    /// as many single-number chunks as there are numbers are produced; empty
    /// chunks are never yielded. Concatenating the chunks in order yields the
    /// interval exactly once.
    pub fn partition(&self, chunk_count: NonZeroUsize) -> Vec<ChunkDescriptor<T>> {
        // Work with `chunk_size - 1` so neither the length nor the chunk size is
        // materialised: both are `T::MAX + 1` for `[0, T::MAX]` in one chunk.
        // ceil(len / n) - 1 == (end - start) / n.
        let span = self.end.clone() - self.start.clone();
        let step = match T::from_usize(chunk_count.get()) {
            Some(n) => span / n,
            // More chunks than `T` can count means more chunks than numbers.
            None => T::zero(),
        };

        let mut chunks = Vec::new();
        let mut chunk_start = self.start.clone();

        loop {
            let remaining = self.end.clone() - chunk_start.clone();
            if remaining <= step {
                chunks.push(ChunkDescriptor {
                    start: chunk_start,
                    end: self.end.clone(),
                });
                break;
            }

            // `chunk_end < end`, so the successor cannot overflow.
            let chunk_end = chunk_start.clone() + step.clone();
            let next_start = chunk_end.clone() + T::one();
            chunks.push(ChunkDescriptor {
                start: chunk_start,
                end: chunk_end,
            });
            chunk_start = next_start;
        }

        chunks
    }
}

impl<T: fmt::Display> fmt::Display for SearchInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// One contiguous slice of a [`SearchInterval`], evaluated by a single task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkDescriptor<T> {
    pub start: T,
    pub end: T,
}

impl<T: SearchNumber> ChunkDescriptor<T> {
    /// Iterates every number of the chunk in ascending order.
    pub fn numbers(&self) -> Numbers<T> {
        Numbers::new(self.start.clone(), self.end.clone())
    }
}

impl<T: fmt::Display> fmt::Display for ChunkDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Ascending iterator over an inclusive range of [`SearchNumber`]s.
///
/// Never computes `end + 1`, so ranges ending at `T::MAX` terminate.
#[derive(Clone, Debug)]
pub struct Numbers<T> {
    next: Option<T>,
    end: T,
}

impl<T: SearchNumber> Numbers<T> {
    fn new(start: T, end: T) -> Self {
        let next = (start <= end).then_some(start);
        Self { next, end }
    }
}

impl<T: SearchNumber> Iterator for Numbers<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next.take()?;
        if current < self.end {
            self.next = Some(current.clone() + T::one());
        }
        Some(current)
    }
}
