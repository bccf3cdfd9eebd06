//! Change Notifier: one externally observable event per logical user action.
//!
//! Engine operations write many states internally (items, group aggregates, the
//! select-all aggregate). The [`ChangeNotifier`] collects the semantic outcome of
//! such a cascade and releases exactly one [`Notification`] when the action
//! settles. Aggregate recomputation never records anything.
//!
//! # Example
//!
//! ```
//! use picklist::domain::ItemId;
//! use picklist::notify::{ChangeNotifier, ItemRef, Notification};
//!
//! let mut notifier = ChangeNotifier::default();
//! notifier.begin();
//! notifier.record(Notification::Changed {
//!     items: vec![ItemRef { id: ItemId(0), value: "a".into(), label: "A".into() }],
//!     checked: true,
//! });
//! assert!(notifier.finish().is_some());
//! assert!(notifier.finish().is_none());
//! ```

mod listener;

pub use listener::{Listener, RecordingListener};

use crate::domain::{Item, ItemId};

/// Reference to an item carried by a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub id: ItemId,
    pub value: String,
    pub label: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            value: item.value.clone(),
            label: item.label.clone(),
        }
    }
}

/// Semantic event delivered to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// One item (single toggle) or several items (group or range toggle)
    /// were set to `checked`.
    Changed { items: Vec<ItemRef>, checked: bool },
    /// Items newly selected by a select-all.
    SelectAll { items: Vec<ItemRef> },
    /// Items newly deselected by a deselect-all.
    DeselectAll { items: Vec<ItemRef> },
    /// A debounced filter pass completed for `query`.
    Filtering { query: String },
}

impl Notification {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Changed { .. } => "changed",
            Self::SelectAll { .. } => "select_all",
            Self::DeselectAll { .. } => "deselect_all",
            Self::Filtering { .. } => "filtering",
        }
    }
}

/// Batches the notifications of one logical action.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    batch: Option<Notification>,
    open: bool,
}

impl ChangeNotifier {
    /// Opens a new action, discarding anything left from an unfinished one.
    pub fn begin(&mut self) {
        if self.open {
            tracing::warn!("action started before the previous one settled");
        }
        self.open = true;
        self.batch = None;
    }

    /// Records the outcome of the current action.
    ///
    /// Outcomes of the same kind are merged into one notification. A second
    /// outcome of a different kind is dropped: an action reports through
    /// exactly one channel.
    pub fn record(&mut self, notification: Notification) {
        let Some(current) = self.batch.as_mut() else {
            self.batch = Some(notification);
            return;
        };
        match (current, notification) {
            (
                Notification::Changed { items, checked },
                Notification::Changed { items: more, checked: more_checked },
            ) if *checked == more_checked => items.extend(more),
            (Notification::SelectAll { items }, Notification::SelectAll { items: more })
            | (Notification::DeselectAll { items }, Notification::DeselectAll { items: more }) => {
                items.extend(more);
            }
            (current, dropped) => {
                tracing::warn!(
                    current = current.kind(),
                    dropped = dropped.kind(),
                    "conflicting notification in one action dropped"
                );
            }
        }
    }

    /// Closes the action and releases its notification.
    ///
    /// A `Changed` without items is swallowed, since nothing was affected.
    pub fn finish(&mut self) -> Option<Notification> {
        self.open = false;
        match self.batch.take() {
            Some(Notification::Changed { items, .. }) if items.is_empty() => None,
            other => other,
        }
    }
}
