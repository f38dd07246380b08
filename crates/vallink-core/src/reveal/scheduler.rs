use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for a scheduled callback. Tokens are never reused within a
/// scheduler, so a stale token can always be told apart from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken;
    fn cancel(&mut self, token: TimerToken);
}

/// Virtual clock. Nothing fires on its own; the owner pulls due tokens
/// with [`ManualScheduler::pop_due`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_token: u64,
    pending: BTreeMap<TimerToken, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.contains_key(&token)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Removes the earliest timer due at or before `until` and moves the
    /// clock to its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerToken> {
        let (token, deadline) = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= until)
            .min_by_key(|(token, deadline)| (**deadline, **token))
            .map(|(token, deadline)| (*token, *deadline))?;
        self.pending.remove(&token);
        self.now = self.now.max(deadline);
        Some(token)
    }

    /// Moves the clock forward. Never moves it backward.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending.insert(token, self.now + delay);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.remove(&token);
    }
}

#[cfg(test)]
mod tests {
    use super::{ManualScheduler, Scheduler};
    use std::time::Duration;

    #[test]
    fn pop_due_returns_timers_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule(Duration::from_secs(5));
        let early = scheduler.schedule(Duration::from_secs(2));

        assert_eq!(scheduler.pop_due(Duration::from_secs(1)), None);
        assert_eq!(scheduler.pop_due(Duration::from_secs(10)), Some(early));
        assert_eq!(scheduler.now(), Duration::from_secs(2));
        assert_eq!(scheduler.pop_due(Duration::from_secs(10)), Some(late));
        assert_eq!(scheduler.pending_len(), 0);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut scheduler = ManualScheduler::new();
        let token = scheduler.schedule(Duration::from_secs(1));
        scheduler.cancel(token);
        assert!(!scheduler.is_pending(token));
        assert_eq!(scheduler.pop_due(Duration::from_secs(60)), None);
    }

    #[test]
    fn tokens_are_not_reused() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule(Duration::ZERO);
        scheduler.cancel(first);
        let second = scheduler.schedule(Duration::ZERO);
        assert_ne!(first, second);
    }

    #[test]
    fn clock_only_moves_forward() {
        let mut scheduler = ManualScheduler::new();
        scheduler.set_now(Duration::from_secs(3));
        scheduler.set_now(Duration::from_secs(1));
        assert_eq!(scheduler.now(), Duration::from_secs(3));
    }
}
