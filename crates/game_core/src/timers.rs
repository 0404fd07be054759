use std::time::Duration;

use shared::protocol::{TimerId, TimerKind};

use crate::ports::Scheduler;

#[derive(Debug, Clone, Copy)]
struct Armed {
    timer: TimerId,
    deadline: Duration,
    interval: Option<Duration>,
}

/// Scheduler over a caller-driven clock.
///
/// Time is a `Duration` since an arbitrary origin: the desktop app feeds it
/// `Instant::elapsed`, the simulator and the tests feed it virtual time.
/// Nothing fires until [`TimerQueue::advance_to`] is called.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    armed: Vec<Armed>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.iter().any(|armed| armed.timer.kind == kind)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.iter().map(|armed| armed.deadline).min()
    }

    /// Moves the clock forward and returns every fire due by `now`, oldest
    /// deadline first. A repeating timer that fell several intervals behind
    /// fires once per missed interval.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerId> {
        if now > self.now {
            self.now = now;
        }

        let mut fired = Vec::new();
        loop {
            let due = self
                .armed
                .iter()
                .enumerate()
                .filter(|(_, armed)| armed.deadline <= self.now)
                .min_by_key(|(_, armed)| armed.deadline)
                .map(|(position, _)| position);
            let Some(position) = due else {
                break;
            };

            let armed = self.armed[position];
            fired.push(armed.timer);
            match armed.interval {
                Some(interval) => self.armed[position].deadline = armed.deadline + interval,
                None => {
                    self.armed.remove(position);
                }
            }
        }
        fired
    }

    pub fn advance_by(&mut self, delta: Duration) -> Vec<TimerId> {
        let target = self.now + delta;
        self.advance_to(target)
    }

    fn arm(&mut self, timer: TimerId, delay: Duration, interval: Option<Duration>) {
        self.cancel(timer);
        self.armed.push(Armed {
            timer,
            deadline: self.now + delay,
            interval,
        });
    }
}

impl Scheduler for TimerQueue {
    fn after(&mut self, delay: Duration, timer: TimerId) {
        self.arm(timer, delay, None);
    }

    fn every(&mut self, interval: Duration, timer: TimerId) {
        // Zero intervals would spin advance_to forever.
        let interval = interval.max(Duration::from_millis(1));
        self.arm(timer, interval, Some(interval));
    }

    fn cancel(&mut self, timer: TimerId) {
        self.armed.retain(|armed| armed.timer != timer);
    }
}

#[cfg(test)]
#[path = "tests/timers_tests.rs"]
mod tests;
