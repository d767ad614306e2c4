//! Scoped worker threads with explicit fault capture.
//!
//! Every worker is joined by hand so a panic surfaces as a join error for
//! that worker only. A drop guard raises the shared stop flag while the
//! panicking worker unwinds, letting siblings finish early.

use std::{
    any::Any,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Instant,
};

use crate::error::LawError;

/// What a worker reports when it returns normally.
pub(crate) enum WorkerRun<T> {
    /// The worker finished its whole share.
    Completed(T),
    /// The worker saw the stop flag or the deadline after `completed` units.
    Stopped { completed: usize },
}

/// Shared cancellation state consulted between units of work.
#[derive(Clone, Copy)]
pub(crate) struct Cancellation<'a> {
    stop: &'a AtomicBool,
    deadline: Option<Instant>,
}

impl<'a> Cancellation<'a> {
    pub(crate) fn new(stop: &'a AtomicBool, deadline: Option<Instant>) -> Self {
        Self { stop, deadline }
    }

    pub(crate) fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if self.deadline_passed() {
            self.stop.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    pub(crate) fn deadline_passed(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn raise(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Raises the stop flag if dropped during a panic.
struct FaultSignal<'a>(Cancellation<'a>);

impl Drop for FaultSignal<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.raise();
        }
    }
}

/// Outcome of one worker: its return value or its panic payload.
pub(crate) type WorkerOutcome<T> = (usize, thread::Result<T>);

/// Runs `work(worker)` on `workers` named scoped threads and joins them all.
///
/// # Errors
/// Returns [`LawError::WorkerSpawn`] when a thread cannot be started; workers
/// already running are stopped and joined first.
pub(crate) fn run_workers<T, F>(
    label: &'static str,
    workers: usize,
    cancellation: Cancellation<'_>,
    work: F,
) -> Result<Vec<WorkerOutcome<T>>, LawError>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let work = &work;
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let spawned = thread::Builder::new()
                .name(format!("lawtest-{label}-{worker}"))
                .spawn_scoped(scope, move || {
                    let _signal = FaultSignal(cancellation);
                    work(worker)
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    cancellation.raise();
                    // Joined explicitly: an unjoined panicked thread would
                    // make the scope itself panic.
                    for handle in handles {
                        drop(handle.join());
                    }
                    return Err(LawError::WorkerSpawn { worker, source });
                }
            }
        }
        Ok(handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| (worker, handle.join()))
            .collect())
    })
}

/// Splits `total` units across `workers`, giving the remainder to the first
/// workers.
pub(crate) fn partition(total: usize, workers: usize) -> Vec<usize> {
    let base = total / workers;
    let remainder = total % workers;
    (0..workers)
        .map(|worker| base + usize::from(worker < remainder))
        .collect()
}

/// Renders a panic payload, which is a `&str` or `String` for `panic!` with
/// a message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
