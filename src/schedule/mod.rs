//! One-shot scheduled tasks with cancellation.
//!
//! Delayed UI callbacks (tip reveal, celebration dismissal) are queued
//! here instead of fired from bare timers. Each task carries a
//! cancellation token tied to the owning view; a task whose token was
//! cancelled simply never fires, so a timer outliving its view is a
//! no-op rather than a crash.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Handle for cancelling a scheduled task. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct OneShot<T> {
    fire_at: DateTime<Utc>,
    token: CancellationToken,
    payload: T,
}

/// Queue of pending one-shot tasks, polled synchronously by the caller.
pub struct TaskQueue<T> {
    tasks: Vec<OneShot<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to fire at `fire_at` and returns the token
    /// that cancels it.
    pub fn schedule(&mut self, fire_at: DateTime<Utc>, payload: T) -> CancellationToken {
        let token = CancellationToken::new();
        self.tasks.push(OneShot {
            fire_at,
            token: token.clone(),
            payload,
        });
        token
    }

    /// Drains every task due at `now` and returns their payloads in
    /// scheduling order. Cancelled tasks are dropped silently, whether or
    /// not they were already due.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<T> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.drain(..) {
            if task.token.is_cancelled() {
                continue;
            }
            if task.fire_at <= now {
                due.push(task.payload);
            } else {
                remaining.push(task);
            }
        }
        self.tasks = remaining;
        due
    }

    pub fn pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| !task.token.is_cancelled())
            .count()
    }
}
