use crate::{Result, TaskFailure};
use crossbeam_channel::Sender;

/// A type-erased chunk evaluation, run once by a worker.
pub(crate) type Job<T> = Box<dyn FnOnce() -> Result<Vec<T>> + Send + 'static>;

/// What a finished task reports back to the pool.
pub(crate) type TaskOutcome<T> = core::result::Result<PartialResult<T>, TaskFailure>;

/// Messages a worker receives from its pool.
pub(crate) enum WorkRequest<T> {
    /// Evaluate one chunk and report the outcome on `outcome_tx`.
    Evaluate {
        task_id: usize,
        chunk: String,
        job: Job<T>,
        outcome_tx: Sender<TaskOutcome<T>>,
    },
    /// Stop the worker loop and acknowledge on `response`.
    Shutdown { response: Sender<()> },
}

/// The values one task found in its chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialResult<T> {
    pub task_id: usize,
    pub chunk: String,
    pub values: Vec<T>,
}
