//! Deferred task queue for scheduling turns.
//!
//! Work posted here runs on the *next* turn, never synchronously inside the
//! call that posted it. A turn only runs the tasks that were pending when it
//! started; anything posted while a turn is running waits for the following
//! one.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

/// Internal task data.
struct TaskData {
    id: TaskId,
    label: &'static str,
    task: BoxedTask,
}

/// Manages the deferred task queue.
pub struct TaskQueue {
    /// Pending tasks to execute.
    tasks: VecDeque<TaskData>,
    /// Number of turns completed so far.
    turns: u64,
}

impl TaskQueue {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
            turns: 0,
        }
    }

    /// Post a task to run on the next turn.
    ///
    /// Returns the task ID reported in task logs.
    pub fn post<F>(&mut self, label: &'static str, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        tracing::trace!(target: targets::TASK, task = id.0, label, "task posted");
        self.tasks.push_back(TaskData {
            id,
            label,
            task: Box::new(task),
        });
        id
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of turns run so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Detach every task that belongs to the upcoming turn.
    fn take_turn(&mut self) -> Vec<TaskData> {
        self.turns += 1;
        self.tasks.drain(..).collect()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`TaskQueue`].
///
/// Tasks run with the queue lock released, so a task may post follow-up
/// work; that work lands in the next turn.
pub struct SharedTaskQueue {
    inner: Mutex<TaskQueue>,
}

impl SharedTaskQueue {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskQueue::new()),
        }
    }

    pub fn post<F>(&self, label: &'static str, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().post(label, task)
    }

    pub fn has_pending(&self) -> bool {
        self.inner.lock().has_pending()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_count()
    }

    pub fn turns(&self) -> u64 {
        self.inner.lock().turns()
    }

    /// Run one turn.
    ///
    /// Returns the number of tasks processed.
    pub fn run_turn(&self) -> usize {
        let batch = self.inner.lock().take_turn();
        let count = batch.len();
        for task_data in batch {
            tracing::trace!(
                target: targets::TASK,
                task = task_data.id.0,
                label = task_data.label,
                "running task"
            );
            (task_data.task)();
        }
        count
    }
}

impl Default for SharedTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
