use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    DismissHint,
    FirstVisitHint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    deadline: Duration,
    kind: TimerKind,
}

/// Fire-and-forget timers on the page clock. There is no cancellation.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Duration, kind: TimerKind) {
        self.timers.push(Timer { deadline, kind });
    }

    /// Remove and return every timer due at `now`, earliest first.
    /// Timers sharing a deadline fire in scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<TimerKind> {
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.deadline);
        due.into_iter().map(|t| t.kind).collect()
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
