//! Debounced filter passes.
//!
//! Keystrokes schedule a pass with [`Multiselect::set_filter_query`]; the
//! caller's clock drives [`Multiselect::poll_filter`], which runs the pass once
//! the quiet period has elapsed. Only the newest query is ever pending.

use crate::app::{Action, Multiselect};
use crate::notify::Notification;
use std::time::Instant;

impl Multiselect {
    /// Schedules a filter pass for `query` one quiet period after `at`.
    ///
    /// Replaces any pending pass. Ignored when filtering is disabled.
    pub fn set_filter_query(&mut self, query: &str, at: Instant) -> Vec<Action> {
        if !self.config.filtering_enabled() {
            tracing::debug!("filtering disabled, query ignored");
            return Vec::new();
        }
        self.debouncer.schedule(query.to_string(), at);
        Vec::new()
    }

    /// Runs the pending filter pass if its deadline has passed at `now`.
    pub fn poll_filter(&mut self, now: Instant) -> Vec<Action> {
        match self.debouncer.poll(now) {
            Some(query) => self.apply_filter(&query),
            None => Vec::new(),
        }
    }

    /// Applies `query` immediately, cancelling any pending pass.
    ///
    /// Eligibility is re-evaluated when the query changed; aggregates are
    /// always recomputed since they depend on eligibility.
    ///
    /// # Returns
    ///
    /// Visibility and aggregate render actions followed by one `Filtering`
    /// notification.
    pub fn apply_filter(&mut self, query: &str) -> Vec<Action> {
        let _span = tracing::debug_span!("apply_filter", query = %query).entered();

        self.debouncer.cancel();
        if self.structure_changed("apply_filter") {
            return Vec::new();
        }
        self.begin_action();
        if query != self.query {
            self.query = query.to_string();
            let eligible = self.filter.apply(&self.model, &self.mirrors, &self.query);
            self.write_eligibility(&eligible);
        }
        self.recompute_aggregates(false);
        self.record(Notification::Filtering {
            query: query.to_string(),
        });
        self.finish_action()
    }

    /// Drops the pending pass and the active query, making every entry
    /// eligible again. Produces no notification.
    pub fn clear_filter(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("clear_filter").entered();

        if self.structure_changed("clear_filter") {
            return Vec::new();
        }
        self.begin_action();
        if self.debouncer.cancel() {
            tracing::debug!("pending filter pass cancelled");
        }
        self.reset_query();
        self.recompute_aggregates(false);
        self.finish_action()
    }

    pub(crate) fn reset_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            let eligible = self.filter.apply(&self.model, &self.mirrors, "");
            self.write_eligibility(&eligible);
        }
    }
}
