//! Host-driven timer queue for deferred view work.
//!
//! The view never sleeps. The host advances the clock (from animation frames,
//! a tokio interval, or a test) and the queue hands back whatever came due.

use std::time::Duration;

use super::banner::BannerId;

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Recalculate map size once the container has its final layout
    LayoutFixup,
    /// A burst of resize events went quiet
    ResizeSettled,
    DismissBanner(BannerId),
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    due: Duration,
    task: Task,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the queue was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward and drain due tasks, earliest first
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Task> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, pending): (Vec<Scheduled>, Vec<Scheduled>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;

        due.sort_by_key(|s| (s.due, s.id));
        due.into_iter().map(|s| s.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_tasks_fire_when_due_in_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(250), Task::ResizeSettled);
        timers.schedule(ms(100), Task::LayoutFixup);

        assert!(timers.advance(ms(99)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec![Task::LayoutFixup]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(ms(500)), vec![Task::ResizeSettled]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(ms(10), Task::LayoutFixup);
        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(ms(20)).is_empty());
    }

    #[test]
    fn test_same_deadline_keeps_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(5), Task::ResizeSettled);
        timers.schedule(ms(5), Task::LayoutFixup);
        assert_eq!(timers.advance(ms(5)), vec![Task::ResizeSettled, Task::LayoutFixup]);
    }
}
