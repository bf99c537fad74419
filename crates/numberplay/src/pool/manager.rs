//! Fixed-size pool of worker threads for chunked evaluation.
//!
//! This module defines the [`WorkerPool`] struct, which owns a set of worker
//! threads responsible for evaluating chunk jobs. Work is distributed using
//! round-robin scheduling over per-worker queues, and every finished task
//! reports exactly one outcome on a shared results channel.
//!
//! Dispatch never blocks: the caller queues as many tasks as it likes and then
//! waits once on [`WorkerPool::await_all`], the only barrier. Outcomes are
//! moved through the channel rather than appended to shared state, so the
//! caller never observes a partially collected batch.

use super::{
    request::{Job, PartialResult, TaskOutcome, WorkRequest},
    worker::worker_loop,
};
use crate::{Error, Result, TaskFailure};
use core::{fmt, num::NonZeroUsize, time::Duration};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::thread::{self, JoinHandle};

/// How long shutdown waits for each worker to acknowledge before logging it
/// as still busy.
const SHUTDOWN_ACK_TIMEOUT: Duration = Duration::from_secs(3);

/// Handle for a dispatched task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task {
    /// Dispatch-order id, unique within the pool.
    pub id: usize,
    /// Index of the worker the task was queued on.
    pub worker: usize,
}

/// A pool of worker threads that evaluate chunk jobs producing `T`s.
///
/// Workers receive requests over their own unbounded channel and run one job
/// at a time. The pool shuts its workers down when dropped.
pub struct WorkerPool<T> {
    workers: Vec<Sender<WorkRequest<T>>>,
    handles: Vec<JoinHandle<()>>,
    next_worker: usize,
    next_task: usize,
    pending: usize,
    outcome_tx: Sender<TaskOutcome<T>>,
    outcome_rx: Receiver<TaskOutcome<T>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Spawns `worker_count` worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerSpawn`] if the OS refuses to start a thread.
    /// Workers spawned before the failure are shut down.
    pub fn new(worker_count: NonZeroUsize) -> Result<Self> {
        let (outcome_tx, outcome_rx) = unbounded();
        let mut pool = Self {
            workers: Vec::with_capacity(worker_count.get()),
            handles: Vec::with_capacity(worker_count.get()),
            next_worker: 0,
            next_task: 0,
            pending: 0,
            outcome_tx,
            outcome_rx,
        };

        for worker_id in 0..worker_count.get() {
            let (tx, rx) = unbounded();
            let handle = thread::Builder::new()
                .name(format!("numberplay-worker-{worker_id}"))
                .spawn(move || worker_loop(worker_id, rx))
                .map_err(|e| Error::WorkerSpawn {
                    worker_id,
                    reason: e.to_string(),
                })?;

            pool.workers.push(tx);
            pool.handles.push(handle);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Started worker pool with {} workers", worker_count);

        Ok(pool)
    }
}

impl<T> WorkerPool<T> {
    /// Number of workers in the pool.
    pub fn worker_count(&self) -> NonZeroUsize {
        // The constructor spawns at least one worker, and only `shutdown`
        // empties the list.
        NonZeroUsize::new(self.workers.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Number of dispatched tasks whose outcome has not been collected yet.
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Returns the index of the next worker to receive work (round-robin).
    fn next_worker_index(&mut self) -> usize {
        let idx = self.next_worker % self.workers.len();
        self.next_worker = self.next_worker.wrapping_add(1);
        idx
    }

    /// Queues `job` for evaluation of `chunk` on the next worker.
    ///
    /// Returns immediately; the outcome is collected by
    /// [`WorkerPool::await_all`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelError`] if the pool was shut down or the
    /// worker's channel is closed.
    pub fn dispatch<C, F>(&mut self, chunk: &C, job: F) -> Result<Task>
    where
        C: fmt::Display + ?Sized,
        F: FnOnce() -> Result<Vec<T>> + Send + 'static,
    {
        if self.workers.is_empty() {
            return Err(Error::ChannelError {
                context: "Worker pool is shut down".to_string(),
            });
        }

        let worker = self.next_worker_index();
        let task = Task {
            id: self.next_task,
            worker,
        };
        let job: Job<T> = Box::new(job);

        let request = WorkRequest::Evaluate {
            task_id: task.id,
            chunk: chunk.to_string(),
            job,
            outcome_tx: self.outcome_tx.clone(),
        };

        if self.workers[worker].send(request).is_err() {
            return Err(Error::ChannelError {
                context: format!("Worker {worker} channel closed"),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::trace!("Dispatched task {} over {chunk} to worker {worker}", task.id);

        self.next_task += 1;
        self.pending += 1;
        Ok(task)
    }

    /// Blocks until every dispatched task has reported, then returns their
    /// partial results in completion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskFailure`] listing every failed task of the batch
    /// (sorted by task id) if any task failed. The outcomes of successful
    /// tasks in a failed batch are discarded.
    pub fn await_all(&mut self) -> Result<Vec<PartialResult<T>>> {
        let mut partials = Vec::with_capacity(self.pending);
        let mut failures: Vec<TaskFailure> = Vec::new();

        while self.pending > 0 {
            let outcome = self.outcome_rx.recv().map_err(|e| Error::ChannelError {
                context: format!(
                    "Outcome channel closed with {} task(s) pending: {e}",
                    self.pending
                ),
            })?;
            self.pending -= 1;

            match outcome {
                Ok(partial) => partials.push(partial),
                Err(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|failure| failure.task_id);

            #[cfg(feature = "tracing")]
            tracing::warn!(
                "{} of {} task(s) failed",
                failures.len(),
                failures.len() + partials.len()
            );

            return Err(Error::TaskFailure { failures });
        }

        Ok(partials)
    }

    /// Stops the pool and joins its worker threads.
    ///
    /// The stop request lands at the back of each worker's queue, so chunks
    /// dispatched earlier are still evaluated before the thread exits. A
    /// worker that stays silent past [`SHUTDOWN_ACK_TIMEOUT`] is logged and
    /// then joined regardless, which blocks until its current chunk returns.
    ///
    /// After the first call the pool holds no workers: further calls return
    /// immediately and [`WorkerPool::dispatch`] fails. Dropping the pool
    /// shuts it down.
    pub fn shutdown(&mut self) {
        if self.workers.is_empty() {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Notifying all workers to shut down");

        let mut acks = Vec::with_capacity(self.workers.len());
        for (_i, worker) in self.workers.drain(..).enumerate() {
            let (tx, rx) = bounded(1);
            if let Err(_e) = worker.send(WorkRequest::Shutdown { response: tx }) {
                #[cfg(feature = "tracing")]
                tracing::error!("Failed to send shutdown to worker {_i}: {_e}");
            } else {
                acks.push((_i, rx));
            }
        }

        for (_i, rx) in acks {
            match rx.recv_timeout(SHUTDOWN_ACK_TIMEOUT) {
                Ok(()) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("Worker {_i} shutdown acknowledged");
                }
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Worker {_i} did not acknowledge shutdown: {_e}");
                }
            }
        }

        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                #[cfg(feature = "tracing")]
                tracing::error!("Worker thread panicked outside of a task");
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Worker pool shutdown complete");
    }
}

impl<T> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<T> fmt::Debug for WorkerPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.len())
            .field("next_task", &self.next_task)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};

    fn pool<T: Send + 'static>(workers: usize) -> WorkerPool<T> {
        WorkerPool::new(NonZeroUsize::new(workers).unwrap()).unwrap()
    }

    #[test]
    fn round_robin_assignment() {
        let mut pool = pool::<u64>(3);
        let workers: Vec<usize> = (0..7)
            .map(|i| pool.dispatch(&i, move || Ok(vec![i])).unwrap().worker)
            .collect();

        assert_eq!(workers, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(pool.await_all().unwrap().len(), 7);
    }

    #[test]
    fn collects_every_outcome() {
        let mut pool = pool::<u64>(4);
        for i in 0..32_u64 {
            pool.dispatch(&format!("[{i}, {i}]"), move || Ok(vec![i * 10])).unwrap();
        }
        assert_eq!(pool.pending(), 32);

        let partials = pool.await_all().unwrap();
        assert_eq!(pool.pending(), 0);

        let ids: HashSet<usize> = partials.iter().map(|p| p.task_id).collect();
        assert_eq!(ids, (0..32).collect());
        for partial in &partials {
            assert_eq!(partial.values, vec![partial.task_id as u64 * 10]);
        }
    }

    #[test]
    fn dispatch_does_not_block() {
        // Every job waits on a barrier that is only released after all of
        // them were queued, so a blocking dispatch would deadlock.
        let mut pool = pool::<u64>(2);
        let gate = Arc::new(Barrier::new(3));

        for i in 0..2_u64 {
            let gate = Arc::clone(&gate);
            pool.dispatch(&i, move || {
                gate.wait();
                Ok(vec![i])
            })
            .unwrap();
        }
        gate.wait();

        assert_eq!(pool.await_all().unwrap().len(), 2);
    }

    #[test]
    fn workers_run_in_parallel() {
        let mut pool = pool::<usize>(4);
        let gate = Arc::new(Barrier::new(4));

        for i in 0..4 {
            let gate = Arc::clone(&gate);
            pool.dispatch(&i, move || {
                // Only returns once all four jobs run at the same time.
                gate.wait();
                Ok(vec![i])
            })
            .unwrap();
        }

        assert_eq!(pool.await_all().unwrap().len(), 4);
    }

    #[test]
    fn reports_every_failure() {
        let mut pool = pool::<u64>(3);
        for i in 0..6_u64 {
            pool.dispatch(&format!("[{i}, {i}]"), move || {
                if i % 2 == 1 {
                    Err(Error::domain(format!("odd chunk {i}")))
                } else {
                    Ok(vec![i])
                }
            })
            .unwrap();
        }

        let Err(Error::TaskFailure { failures }) = pool.await_all() else {
            panic!("expected task failures");
        };

        let ids: Vec<usize> = failures.iter().map(|f| f.task_id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(failures[0].chunk, "[1, 1]");
        assert!(failures[2].reason.contains("odd chunk 5"));
        assert_eq!(pool.pending(), 0);
    }

    #[test]
    fn panicking_task_does_not_kill_the_worker() {
        let mut pool = pool::<u64>(1);
        pool.dispatch("[0, 0]", || panic!("boom")).unwrap();
        assert!(matches!(pool.await_all(), Err(Error::TaskFailure { .. })));

        pool.dispatch("[1, 1]", || Ok(vec![1])).unwrap();
        let partials = pool.await_all().unwrap();
        assert_eq!(partials[0].values, vec![1]);
        assert_eq!(partials[0].task_id, 1);
    }

    #[test]
    fn await_all_without_tasks() {
        let mut pool = pool::<u64>(2);
        assert_eq!(pool.await_all().unwrap(), vec![]);
    }

    #[test]
    fn dispatch_after_shutdown_fails() {
        let mut pool = pool::<u64>(2);
        pool.shutdown();
        pool.shutdown();

        assert!(matches!(
            pool.dispatch("[0, 0]", || Ok(vec![])),
            Err(Error::ChannelError { .. })
        ));
    }

    #[test]
    fn shutdown_waits_for_queued_work() {
        let ran = Arc::new(AtomicUsize::new(0));
        let mut pool = pool::<u64>(1);
        for i in 0..4_u64 {
            let ran = Arc::clone(&ran);
            pool.dispatch(&i, move || {
                ran.fetch_add(1, Ordering::SeqCst);
                Ok(vec![i])
            })
            .unwrap();
        }
        drop(pool);

        assert_eq!(ran.load(Ordering::SeqCst), 4);
    }
}
