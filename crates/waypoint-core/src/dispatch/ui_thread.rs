//! The single thread that performs presentation side effects.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};

use crate::config::RouterConfig;

/// Unit of work run on the UI thread.
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Something that runs jobs on the UI thread, in submission order.
pub trait UiExecutor: Send + Sync {
    /// Queue `job` and return immediately.
    fn dispatch(&self, job: UiJob);
}

/// Dedicated OS thread draining an unbounded job queue in FIFO order.
///
/// Dropping the handle closes the queue; already queued jobs still run before
/// the thread exits.
pub struct UiThread {
    name: String,
    id: ThreadId,
    tx: Mutex<Option<mpsc::UnboundedSender<UiJob>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for UiThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiThread")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish()
    }
}

impl UiThread {
    pub fn spawn(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<UiJob>();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    if catch_unwind(AssertUnwindSafe(job)).is_err() {
                        tracing::error!("UI job panicked");
                    }
                }
                tracing::debug!("UI queue closed");
            })
            .with_context(|| format!("failed to spawn UI thread {name:?}"))?;
        let id = handle.thread().id();
        tracing::debug!(name = %name, "UI thread started");
        Ok(Self {
            name,
            id,
            tx: Mutex::new(Some(tx)),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Spawn a UI thread named after `config.ui_thread_name`.
    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        Self::spawn(config.ui_thread_name.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thread_id(&self) -> ThreadId {
        self.id
    }

    /// Whether the caller is running on this UI thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.id
    }

    /// Block until every job queued before this call has run.
    ///
    /// Returns `false` if the thread is gone. Returns immediately when called
    /// from the UI thread itself. Must not be called from inside an async
    /// runtime.
    pub fn barrier(&self) -> bool {
        if self.is_current() {
            return true;
        }
        let (done_tx, done_rx) = oneshot::channel::<()>();
        if !self.send(Box::new(move || {
            let _ = done_tx.send(());
        })) {
            return false;
        }
        done_rx.blocking_recv().is_ok()
    }

    /// Close the queue and wait for the thread to finish the jobs already
    /// queued. Later dispatches are dropped with a warning.
    pub fn shutdown(&self) {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if self.is_current() {
            return;
        }
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!(name = %self.name, "UI thread exited abnormally");
            }
        }
    }

    fn send(&self, job: UiJob) -> bool {
        let guard = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(tx) => tx.send(job).is_ok(),
            None => false,
        }
    }
}

impl UiExecutor for UiThread {
    fn dispatch(&self, job: UiJob) {
        if !self.send(job) {
            tracing::warn!(name = %self.name, "UI thread is gone, dropping job");
        }
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn runs_jobs_in_order_on_its_own_thread() {
        let ui = UiThread::spawn("ui-order").unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for i in 0..10 {
            let seen = Arc::clone(&seen);
            ui.dispatch(Box::new(move || {
                let name = thread::current().name().map(str::to_string);
                seen.lock().unwrap().push((i, name));
            }));
        }
        assert!(ui.barrier());

        let seen = seen.lock().unwrap();
        let order: Vec<i32> = seen.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
        assert!(seen.iter().all(|(_, n)| n.as_deref() == Some("ui-order")));
    }

    #[test]
    fn barrier_on_ui_thread_returns_immediately() {
        let ui = Arc::new(UiThread::spawn("ui-reentrant").unwrap());
        let (tx, rx) = std::sync::mpsc::channel();
        let inner = Arc::clone(&ui);
        ui.dispatch(Box::new(move || {
            tx.send((inner.is_current(), inner.barrier())).unwrap();
        }));
        assert_eq!(rx.recv().unwrap(), (true, true));
        assert!(!ui.is_current());
    }

    #[test]
    fn shutdown_drains_then_drops_later_jobs() {
        let ui = UiThread::spawn("ui-shutdown").unwrap();
        let count = Arc::new(Mutex::new(0));
        for _ in 0..3 {
            let count = Arc::clone(&count);
            ui.dispatch(Box::new(move || *count.lock().unwrap() += 1));
        }
        ui.shutdown();
        assert_eq!(*count.lock().unwrap(), 3);

        let late = Arc::clone(&count);
        ui.dispatch(Box::new(move || *late.lock().unwrap() += 1));
        assert!(!ui.barrier());
        assert_eq!(*count.lock().unwrap(), 3);
    }

    #[test]
    fn panicking_job_does_not_stop_the_queue() {
        let ui = UiThread::spawn("ui-panic").unwrap();
        ui.dispatch(Box::new(|| panic!("boom")));
        let ran = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&ran);
        ui.dispatch(Box::new(move || *flag.lock().unwrap() = true));
        assert!(ui.barrier());
        assert!(*ran.lock().unwrap());
    }

    #[test]
    fn named_from_config() {
        let cfg = RouterConfig {
            ui_thread_name: "configured-ui".to_string(),
            ..RouterConfig::default()
        };
        let ui = UiThread::from_config(&cfg).unwrap();
        assert_eq!(ui.name(), "configured-ui");
    }
}
