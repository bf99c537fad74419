//! Worker threads and chunk dispatch.
//!
//! ## Structure
//!
//! - [`manager`] - [`WorkerPool`]: spawning, round-robin dispatch, the
//!   `await_all` barrier and shutdown.
//! - [`worker`] - the per-thread loop that evaluates chunk jobs.
//! - [`request`] - messages exchanged between the pool and its workers.

mod manager;
mod request;
mod worker;

pub use manager::{Task, WorkerPool};
pub use request::PartialResult;
