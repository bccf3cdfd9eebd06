//! Event sink for notifications released by the engine.

use super::{ItemRef, Notification};

/// Receives semantic change events.
///
/// Every method defaults to a no-op, so a listener only implements what it
/// cares about. Handlers run after the engine action has settled and must not
/// re-enter the engine for the same action.
pub trait Listener {
    fn on_change(&mut self, items: &[ItemRef], checked: bool) {
        let _ = (items, checked);
    }

    fn on_select_all(&mut self, items: &[ItemRef]) {
        let _ = items;
    }

    fn on_deselect_all(&mut self, items: &[ItemRef]) {
        let _ = items;
    }

    fn on_filtering(&mut self, query: &str) {
        let _ = query;
    }

    /// Routes a notification to the matching handler.
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::Changed { items, checked } => self.on_change(items, *checked),
            Notification::SelectAll { items } => self.on_select_all(items),
            Notification::DeselectAll { items } => self.on_deselect_all(items),
            Notification::Filtering { query } => self.on_filtering(query),
        }
    }
}

/// Listener keeping every notification it receives, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    pub received: Vec<Notification>,
}

impl Listener for RecordingListener {
    fn notify(&mut self, notification: &Notification) {
        self.received.push(notification.clone());
    }
}
