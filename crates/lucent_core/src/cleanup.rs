//! Deferred teardown registry
//!
//! Owners stack teardown work here while wiring things up and run it
//! once at session end. Tasks run newest-first, mirroring the nesting
//! of the setup they undo. The registry also runs on drop so teardown
//! cannot be forgotten.

use std::panic::{catch_unwind, AssertUnwindSafe};

/// Identifier for one deferred task; pass it to
/// [`CleanupRegistry::cancel`] to drop the task without running it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CleanupId(u64);

type Task = Box<dyn FnOnce() + Send>;

/// LIFO list of deferred teardown tasks.
#[derive(Default)]
pub struct CleanupRegistry {
    tasks: Vec<(CleanupId, Task)>,
    next_id: u64,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer `task` until [`run`](Self::run) or drop.
    pub fn defer<F>(&mut self, task: F) -> CleanupId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = CleanupId(self.next_id);
        self.next_id += 1;
        self.tasks.push((id, Box::new(task)));
        id
    }

    /// Drop a deferred task without running it. Unknown ids are
    /// ignored.
    pub fn cancel(&mut self, id: CleanupId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(task_id, _)| *task_id != id);
        self.tasks.len() != before
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every pending task, newest first. A panicking task is logged
    /// and skipped; the rest still run.
    pub fn run(&mut self) {
        while let Some((id, task)) = self.tasks.pop() {
            if catch_unwind(AssertUnwindSafe(task)).is_err() {
                tracing::warn!(?id, "cleanup task panicked");
            }
        }
    }
}

impl Drop for CleanupRegistry {
    fn drop(&mut self) {
        self.run();
    }
}
