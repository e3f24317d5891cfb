//! Eager-start, joinable units of blocking fetch work.

use std::thread;

use log::warn;

/// A single blocking fetch running on its own worker thread.
///
/// The worker starts as soon as the task is constructed, so callers can spawn
/// several tasks, do other work, and join later. `join` blocks until the
/// worker finishes and caches the outcome; repeated joins return the same
/// outcome without blocking again.
///
/// The outcome is `Option<T>`: `None` is the undifferentiated no-result
/// signal. A worker panic or a failed thread spawn also collapses to `None`;
/// no failure detail crosses the task boundary.
pub struct FetchTask<T> {
    handle: Option<thread::JoinHandle<Option<T>>>,
    outcome: Option<T>,
    joined: bool,
}

impl<T: Send + 'static> FetchTask<T> {
    /// Spawns `work` on a named worker thread and returns the running task.
    pub fn spawn<F>(name: &str, work: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        let handle = match thread::Builder::new()
            .name(format!("fetch-{name}"))
            .spawn(work)
        {
            Ok(handle) => Some(handle),
            Err(error) => {
                warn!("failed to spawn fetch worker '{name}': {error}");
                None
            }
        };
        Self {
            handle,
            outcome: None,
            joined: false,
        }
    }

    /// Blocks until the worker finishes and returns its outcome.
    ///
    /// Idempotent: the first call waits and caches, later calls return the
    /// cached outcome immediately.
    pub fn join(&mut self) -> Option<T>
    where
        T: Clone,
    {
        if !self.joined {
            self.outcome = match self.handle.take() {
                Some(handle) => match handle.join() {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!("fetch worker panicked; treating as no result");
                        None
                    }
                },
                None => None,
            };
            self.joined = true;
        }
        self.outcome.clone()
    }
}
