//! Work queues that run transition handlers off the submitting thread.
//!
//! A machine configured for `HandlerDispatch::Concurrent` hands each
//! handler to a `WorkQueue` as a boxed job and moves on without waiting.
//! The queue decides where and when the job runs and owns its failures.
//!
//! - `ThreadPool`: fixed worker threads fed by a channel (the default)
//! - `TokioQueue`: blocking tasks on a tokio runtime (feature `tokio`)

mod pool;
#[cfg(feature = "tokio")]
mod tokio_queue;

pub use pool::ThreadPool;
#[cfg(feature = "tokio")]
pub use tokio_queue::TokioQueue;

/// A unit of work handed to a queue.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Executor abstraction injected into a machine for concurrent dispatch.
pub trait WorkQueue: Send + Sync {
    /// Schedule `job` and return without waiting for it.
    fn dispatch(&self, job: Job);
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
