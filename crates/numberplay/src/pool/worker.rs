use super::request::{Job, PartialResult, TaskOutcome, WorkRequest};
use crate::TaskFailure;
use crossbeam_channel::Receiver;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Worker thread body responsible for processing [`WorkRequest`] messages.
///
/// The worker evaluates one chunk at a time, in the order requests arrive on
/// `rx`, and sends exactly one outcome per [`WorkRequest::Evaluate`]. It runs
/// until a [`WorkRequest::Shutdown`] arrives or every sender is dropped.
///
/// # Request Types
///
/// - [`WorkRequest::Evaluate`]: Runs the job, catching both returned errors
///   and panics, and reports the outcome.
/// - [`WorkRequest::Shutdown`]: Acknowledges and stops the worker.
pub(crate) fn worker_loop<T: Send + 'static>(worker_id: usize, rx: Receiver<WorkRequest<T>>) {
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} started");

    while let Ok(work) = rx.recv() {
        match work {
            WorkRequest::Evaluate {
                task_id,
                chunk,
                job,
                outcome_tx,
            } => {
                let outcome = run_task(worker_id, task_id, chunk, job);
                if outcome_tx.send(outcome).is_err() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        "Worker {worker_id} dropped outcome of task {task_id}: pool is gone"
                    );
                }
            }
            WorkRequest::Shutdown { response } => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Worker {worker_id} received shutdown signal");

                if response.send(()).is_err() {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Worker {worker_id} failed to acknowledge shutdown");
                }
                break;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} stopped");
}

#[allow(clippy::used_underscore_binding)]
fn run_task<T>(_worker_id: usize, task_id: usize, chunk: String, job: Job<T>) -> TaskOutcome<T> {
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {_worker_id} evaluating task {task_id} over {chunk}");

    let reason = match panic::catch_unwind(AssertUnwindSafe(job)) {
        Ok(Ok(values)) => {
            return Ok(PartialResult {
                task_id,
                chunk,
                values,
            });
        }
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };

    #[cfg(feature = "tracing")]
    tracing::warn!("Worker {_worker_id} task {task_id} over {chunk} failed: {reason}");

    Err(TaskFailure {
        task_id,
        chunk,
        reason,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
