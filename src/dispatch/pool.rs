//! Channel-fed pool of worker threads.

use super::{panic_message, Job, WorkQueue};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Fixed-size pool of worker threads sharing one job channel.
///
/// Jobs run concurrently, in no guaranteed order. A panicking job is
/// caught and logged; the worker keeps serving the channel. Dropping the
/// pool closes the channel, lets the workers drain what is queued and
/// joins them.
pub struct ThreadPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    pending: Arc<Pending>,
}

/// Count of dispatched jobs that have not finished yet.
struct Pending {
    count: Mutex<usize>,
    drained: Condvar,
}

impl Pending {
    fn start(&self) {
        *self.count.lock() += 1;
    }

    fn finish(&self) {
        let mut count = self.count.lock();
        *count -= 1;
        if *count == 0 {
            self.drained.notify_all();
        }
    }
}

impl ThreadPool {
    /// Spawn `workers` threads (at least one).
    ///
    /// # Panics
    ///
    /// When a worker thread cannot be spawned. See [`ThreadPool::try_new`].
    pub fn new(workers: usize) -> Self {
        Self::try_new(workers).expect("spawn switchyard worker")
    }

    /// Spawn `workers` threads (at least one), reporting spawn failures.
    ///
    /// Workers that started before a failure see the channel close and
    /// exit on their own.
    pub fn try_new(workers: usize) -> io::Result<Self> {
        let (sender, receiver) = channel::unbounded::<Job>();
        let pending = Arc::new(Pending {
            count: Mutex::new(0),
            drained: Condvar::new(),
        });

        let workers = (0..workers.max(1))
            .map(|index| {
                let receiver = receiver.clone();
                let pending = Arc::clone(&pending);
                thread::Builder::new()
                    .name(format!("switchyard-worker-{index}"))
                    .spawn(move || run_worker(receiver, pending))
            })
            .collect::<io::Result<Vec<_>>>()?;

        debug!(workers = workers.len(), "thread pool started");

        Ok(Self {
            sender: Some(sender),
            workers,
            pending,
        })
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Block until every dispatched job has finished, including jobs that
    /// were dispatched by other jobs while waiting.
    ///
    /// Must not be called from a job running on this pool.
    pub fn wait_idle(&self) {
        let mut count = self.pending.count.lock();
        while *count > 0 {
            self.pending.drained.wait(&mut count);
        }
    }
}

impl WorkQueue for ThreadPool {
    fn dispatch(&self, job: Job) {
        let Some(sender) = &self.sender else {
            return;
        };
        self.pending.start();
        if sender.send(job).is_err() {
            self.pending.finish();
            error!("thread pool channel closed; job dropped");
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        drop(self.sender.take());
        let current = thread::current().id();
        for worker in self.workers.drain(..) {
            // The last owner may be a job on this very pool.
            if worker.thread().id() == current {
                continue;
            }
            if worker.join().is_err() {
                error!("thread pool worker exited abnormally");
            }
        }
    }
}

fn run_worker(receiver: Receiver<Job>, pending: Arc<Pending>) {
    while let Ok(job) = receiver.recv() {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
            error!(
                panic = panic_message(payload.as_ref()),
                "transition handler panicked on worker"
            );
        }
        pending.finish();
    }
}
