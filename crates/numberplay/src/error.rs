//! Error types for range searches.
//!
//! This module defines the central [`Error`] enum, which captures every
//! reportable failure of a search: bad arguments rejected before any work is
//! dispatched, predicates evaluated outside their domain, and worker tasks that
//! failed while evaluating a chunk.
//!
//! ## Error Cases
//! - `InvalidArgument`: A digit count, worker count or bound was rejected
//!   before dispatch.
//! - `ArithmeticDomain`: A predicate was evaluated on a value it is not
//!   defined for.
//! - `TaskFailure`: One or more chunk tasks failed. Every failure of the batch
//!   is reported, each naming its task and chunk.
//! - `ChannelError`: Internal communication failure between the caller and a
//!   worker.
//! - `WorkerSpawn`: A worker thread could not be started.

use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for range searches.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An argument was rejected before any work started.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A predicate was evaluated on a value outside its domain.
    #[error("Arithmetic domain error: {reason}")]
    ArithmeticDomain { reason: String },

    /// At least one chunk task failed during evaluation.
    #[error("{} chunk task(s) failed: {}", .failures.len(), join_failures(.failures))]
    TaskFailure { failures: Vec<TaskFailure> },

    /// Internal channel send/receive failure (e.g., a worker hung up).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// A worker thread could not be spawned.
    #[error("Failed to spawn worker {worker_id}: {reason}")]
    WorkerSpawn { worker_id: usize, reason: String },
}

impl Error {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn domain(reason: impl Into<String>) -> Self {
        Self::ArithmeticDomain {
            reason: reason.into(),
        }
    }
}

/// A single failed chunk task, as reported after the barrier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFailure {
    /// Dispatch-order id of the failed task.
    pub task_id: usize,
    /// The chunk the task was evaluating, e.g. `[100, 549]`.
    pub chunk: String,
    /// The predicate error or panic message.
    pub reason: String,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {} over {}: {}", self.task_id, self.chunk, self.reason)
    }
}

fn join_failures(failures: &[TaskFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
