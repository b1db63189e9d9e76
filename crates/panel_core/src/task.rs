use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// A spawned one-shot operation owned by a view. Dropping the handle
/// aborts the operation, so a torn-down view never hears back from it.
pub struct DelayedTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl DelayedTask {
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            handle: tokio::spawn(future),
        }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!(task = self.name, "cancelling pending task");
            self.handle.abort();
        }
    }
}
