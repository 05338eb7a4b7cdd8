//! Single-slot debounce timer
//!
//! Raw search keystrokes are held here until the configured interval passes
//! without another write. The slot holds at most one pending value: a new
//! write replaces (cancels) the previous one, so only the most recent value
//! ever fires. Time is passed in by the caller, which keeps the type pure and
//! the tests clock-free.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Queue a value at time `now`, replacing any pending one
    pub fn submit(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now + self.interval));
    }

    /// Take the pending value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Take the pending value immediately, deadline or not
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop any pending value without firing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_only_after_interval() {
        let mut d = Debouncer::new(TICK);
        let t0 = Instant::now();

        d.submit("ac", t0);
        assert_eq!(d.poll(t0), None);
        assert_eq!(d.poll(t0 + TICK / 2), None);
        assert_eq!(d.poll(t0 + TICK), Some("ac".to_string()));
        // Slot is drained after firing
        assert_eq!(d.poll(t0 + TICK * 2), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_last_write_wins() {
        let mut d = Debouncer::new(TICK);
        let t0 = Instant::now();

        d.submit("a", t0);
        d.submit("ac", t0 + TICK / 2);

        // The first deadline passes without firing: "a" was cancelled
        assert_eq!(d.poll(t0 + TICK), None);
        assert_eq!(d.poll(t0 + TICK / 2 + TICK), Some("ac".to_string()));
    }

    #[test]
    fn test_flush_and_cancel() {
        let mut d = Debouncer::new(TICK);
        let t0 = Instant::now();

        d.submit("ac", t0);
        assert_eq!(d.flush(), Some("ac".to_string()));
        assert_eq!(d.flush(), None);

        d.submit("me", t0);
        d.cancel();
        assert_eq!(d.poll(t0 + TICK), None);
    }
}
