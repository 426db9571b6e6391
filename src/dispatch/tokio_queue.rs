//! Work queue backed by a tokio runtime.

use super::{panic_message, Job, WorkQueue};
use tokio::runtime::Handle;
use tracing::error;

/// Runs handlers as blocking tasks on a tokio runtime.
///
/// Handlers are synchronous, so they go through `spawn_blocking` rather
/// than occupying an async worker. Panics surface as join errors and are
/// logged.
#[derive(Clone)]
pub struct TokioQueue {
    handle: Handle,
}

impl TokioQueue {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Queue bound to the runtime of the calling context.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl WorkQueue for TokioQueue {
    fn dispatch(&self, job: Job) {
        let task = self.handle.spawn_blocking(job);
        self.handle.spawn(async move {
            if let Err(err) = task.await {
                if err.is_panic() {
                    let payload = err.into_panic();
                    error!(
                        panic = panic_message(payload.as_ref()),
                        "transition handler panicked on tokio queue"
                    );
                } else {
                    error!(error = %err, "transition handler task cancelled");
                }
            }
        });
    }
}
