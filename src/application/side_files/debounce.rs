//! Trailing-edge debouncer driven by caller-supplied instants

use std::time::{Duration, Instant};

/// Holds the latest pushed value until nothing new has arrived for `quiet`.
///
/// Time never advances on its own: every call takes `now`, so the watch loop
/// passes `Instant::now()` and tests pass a virtual clock.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<T>,
    last_request: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            last_request: None,
        }
    }

    /// Replace any pending value and restart the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.last_request = Some(now);
    }

    /// Instant at which the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        match (&self.pending, self.last_request) {
            (Some(_), Some(last)) => Some(last + self.quiet),
            _ => None,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline().map(|deadline| now >= deadline).unwrap_or(false)
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.is_due(now) {
            self.take()
        } else {
            None
        }
    }

    /// Take the pending value regardless of time.
    pub fn take(&mut self) -> Option<T> {
        self.last_request = None;
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(1000);

    #[test]
    fn nothing_pending_is_never_due() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(QUIET);
        let now = Instant::now();
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(now + QUIET * 10), None);
    }

    #[test]
    fn value_is_held_for_the_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        let t0 = Instant::now();
        debouncer.push(1, t0);

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(999)), None);
        assert_eq!(debouncer.poll(t0 + QUIET), Some(1));
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.poll(t0 + QUIET * 2), None);
    }

    #[test]
    fn burst_collapses_to_latest_value() {
        let mut debouncer = Debouncer::new(QUIET);
        let t0 = Instant::now();
        debouncer.push("first", t0);
        debouncer.push("second", t0 + Duration::from_millis(400));
        debouncer.push("third", t0 + Duration::from_millis(800));

        // quiet period restarts on every push
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(1500)), None);
        assert_eq!(
            debouncer.poll(t0 + Duration::from_millis(1800)),
            Some("third")
        );
    }

    #[test]
    fn take_ignores_the_clock() {
        let mut debouncer = Debouncer::new(QUIET);
        let t0 = Instant::now();
        debouncer.push(7, t0);
        assert_eq!(debouncer.take(), Some(7));
        assert_eq!(debouncer.take(), None);
    }

    #[test]
    fn zero_quiet_period_is_due_immediately() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        let t0 = Instant::now();
        debouncer.push(3, t0);
        assert!(debouncer.is_due(t0));
        assert_eq!(debouncer.poll(t0), Some(3));
    }
}
