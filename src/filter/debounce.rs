//! Single-slot debouncer for filter recomputation.
//!
//! At most one recomputation is ever pending. Scheduling a new query replaces the
//! pending one and restarts the quiet period (last write wins, no backlog). The
//! debouncer owns no timer: the event loop feeds it the current instant through
//! [`FilterDebouncer::poll`].

use std::time::{Duration, Instant};

/// Default quiet period after the last keystroke.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    query: String,
    deadline: Instant,
}

/// Cancel-and-reschedule debouncer holding at most one pending query.
#[derive(Debug, Clone)]
pub struct FilterDebouncer {
    quiet: Duration,
    pending: Option<PendingQuery>,
}

impl Default for FilterDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl FilterDebouncer {
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedules `query` to fire one quiet period after `at`.
    ///
    /// Returns `true` when a pending query was superseded.
    pub fn schedule(&mut self, query: String, at: Instant) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some(PendingQuery {
            query,
            deadline: at + self.quiet,
        });
        if superseded {
            tracing::trace!("pending filter recomputation superseded");
        }
        superseded
    }

    /// Takes the pending query if its deadline has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.pending.take().map(|p| p.query)
        } else {
            None
        }
    }

    /// Drops the pending query. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending query becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = FilterDebouncer::default();
        debouncer.schedule("ab".to_string(), start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)),
            Some("ab".to_string())
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_rescheduling_supersedes_and_restarts_quiet_period() {
        let start = Instant::now();
        let mut debouncer = FilterDebouncer::new(Duration::from_millis(300));
        assert!(!debouncer.schedule("a".to_string(), start));
        assert!(debouncer.schedule("ab".to_string(), start + Duration::from_millis(200)));

        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("ab".to_string())
        );
    }

    #[test]
    fn test_cancel_drops_pending_query() {
        let start = Instant::now();
        let mut debouncer = FilterDebouncer::default();
        debouncer.schedule("x".to_string(), start);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
