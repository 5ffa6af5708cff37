//! # Named Cleanup Registry
//!
//! Tracks teardown callbacks (timer cancellation, subscription disposal,
//! cache flushes) under unique names and runs them best-effort: one
//! callback failing, by error or by panic, never stops the others.
//!
//! ```text
//!   register("timer")     register("socket")    register("timer")
//!         │                     │                     │  replaces action,
//!         ▼                     ▼                     ▼  keeps position
//!   ┌───────────┐        ┌────────────┐
//!   │ timer (2) │ ◄────► │ socket     │     run order = registration order
//!   └───────────┘        └────────────┘
//!
//!   cleanup_all():  pop "timer" → run → pop "socket" → run → report
//!                   each task leaves the registry before it runs
//! ```
//!
//! Failures are logged with `tracing::warn!` and collected into a
//! [`CleanupReport`]. Dropping the registry does **not** run pending tasks.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{BoxError, CleanupError};

type CleanupAction = Box<dyn FnOnce() -> Result<(), BoxError>>;

struct CleanupTask {
    name: String,
    action: CleanupAction,
}

/// Outcome of [`CleanupRegistry::cleanup_all`].
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Number of tasks invoked, including the ones that failed.
    pub ran: usize,
    /// Tasks that returned an error or panicked, in run order.
    pub failures: Vec<CleanupError>,
}

impl CleanupReport {
    /// `true` when every task completed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.ran - self.failures.len()
    }
}

/// Registry of named, run-once teardown callbacks.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use memokit::cleanup::CleanupRegistry;
///
/// let closed = Rc::new(Cell::new(0));
/// let mut registry = CleanupRegistry::new();
///
/// let c = Rc::clone(&closed);
/// registry.register("socket", move || c.set(c.get() + 1));
/// registry.register("broken", || panic!("already closed"));
/// registry.register_fallible("flush", || Err::<(), _>("disk full"));
///
/// let report = registry.cleanup_all();
/// assert_eq!(report.ran, 3);
/// assert_eq!(report.failures.len(), 2);
/// assert_eq!(closed.get(), 1);
/// assert!(registry.is_empty());
/// ```
#[derive(Default)]
pub struct CleanupRegistry {
    index: FxHashMap<String, SlotId>,
    tasks: IntrusiveList<CleanupTask>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an infallible callback under `name`.
    ///
    /// Registering a name that already exists replaces its callback; the
    /// task keeps its original place in run order.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnOnce() + 'static,
    {
        self.insert_task(
            name.into(),
            Box::new(move || {
                action();
                Ok(())
            }),
        );
    }

    /// Registers a callback that can report an error.
    pub fn register_fallible<F, E>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnOnce() -> Result<(), E> + 'static,
        E: Into<BoxError>,
    {
        self.insert_task(name.into(), Box::new(move || action().map_err(Into::into)));
    }

    /// Runs and removes the task registered under `name`.
    ///
    /// Returns `Ok(false)` if no such task exists. The task is removed even
    /// when it fails.
    ///
    /// # Errors
    ///
    /// Returns [`CleanupError`] when the callback returns an error or panics.
    pub fn cleanup(&mut self, name: &str) -> Result<bool, CleanupError> {
        let Some(task) = self.take(name) else {
            return Ok(false);
        };
        run_task(task).map(|()| true)
    }

    /// Runs every task in registration order and empties the registry.
    ///
    /// Never fails and never panics because of a callback.
    pub fn cleanup_all(&mut self) -> CleanupReport {
        let mut report = CleanupReport::default();
        while let Some(task) = self.tasks.pop_front() {
            self.index.remove(&task.name);
            report.ran += 1;
            if let Err(err) = run_task(task) {
                report.failures.push(err);
            }
        }
        report
    }

    /// Removes the task without running it.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.take(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Registered names in run order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tasks.iter().map(|task| task.name.as_str())
    }

    fn insert_task(&mut self, name: String, action: CleanupAction) {
        if let Some(&id) = self.index.get(&name) {
            if let Some(task) = self.tasks.get_mut(id) {
                tracing::debug!(name = %name, "replacing registered cleanup task");
                task.action = action;
                return;
            }
        }

        let id = self.tasks.push_back(CleanupTask {
            name: name.clone(),
            action,
        });
        self.index.insert(name, id);
    }

    fn take(&mut self, name: &str) -> Option<CleanupTask> {
        let id = self.index.remove(name)?;
        self.tasks.remove(id)
    }
}

fn run_task(task: CleanupTask) -> Result<(), CleanupError> {
    let CleanupTask { name, action } = task;
    let result = match panic::catch_unwind(AssertUnwindSafe(action)) {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(source)) => CleanupError::Failed { name, source },
        Err(payload) => CleanupError::Panicked {
            name,
            message: panic_message(payload.as_ref()),
        },
    };

    tracing::warn!(name = %result.name(), error = %result, "cleanup task failed");
    Err(result)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl Drop for CleanupRegistry {
    fn drop(&mut self) {
        if !self.is_empty() {
            tracing::debug!(
                pending = self.len(),
                "cleanup registry dropped without running pending tasks"
            );
        }
    }
}

impl fmt::Debug for CleanupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupRegistry")
            .field("tasks", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
