//! Event handling and click interpretation.
//!
//! This module translates what the user did on the rendered control into
//! engine operations. It owns the interpretation of clicks (toggle direction,
//! shift ranges, the remembered anchor) while the engine owns every state
//! change.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. The presentation layer reports an [`Event`]
//! 2. [`handle_event`] pattern-matches the event type
//! 3. Engine operations on [`Multiselect`] mutate state
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Selection**: `Click` on an item, group header or the select-all entry
//! - **Structure**: `CollapseClick`, `DataProvider`
//! - **Filtering**: `FilterInput`, `Tick`, `ClearFilter`
//! - **Control**: `ResetOption`, `ResetButton`, `Enable`, `Disable`
//!
//! # Example
//!
//! ```rust
//! use picklist::app::{handle_event, Event, Multiselect};
//! use picklist::domain::{DataEntry, ItemId, OptionModel};
//! use picklist::Config;
//!
//! let model = OptionModel::from_data(&[DataEntry::option("A", "a")]).unwrap();
//! let mut select = Multiselect::new(Config { multiple: true, ..Config::default() }, model)?;
//! let id = select.item_mirror(ItemId(0)).unwrap();
//!
//! handle_event(&mut select, &Event::Click { id, shift: false })?;
//! assert!(select.is_selected(ItemId(0)));
//! # Ok::<(), picklist::PicklistError>(())
//! ```

use super::{Action, Multiselect};
use crate::domain::{DataEntry, GroupId, Result};
use crate::mirror::{EntryKind, MirrorId};
use std::time::Instant;

/// Events reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A checkable entry was clicked, optionally with the range modifier held.
    Click {
        /// Mirror of the clicked entry.
        id: MirrorId,
        /// Whether the range modifier (shift) was held.
        shift: bool,
    },
    /// The collapse caret of a group header was clicked.
    CollapseClick {
        /// The group to collapse or expand.
        group: GroupId,
    },
    /// The filter input changed at `at`.
    FilterInput {
        /// Current content of the filter input.
        query: String,
        /// Time of the keystroke.
        at: Instant,
    },
    /// Clock tick driving the debounced filter.
    Tick {
        /// Current time.
        now: Instant,
    },
    /// The clear button of the filter input was pressed.
    ClearFilter,
    /// The reset option entry was clicked.
    ResetOption,
    /// The reset button was pressed.
    ResetButton,
    /// The control should become interactive.
    Enable,
    /// The control should stop being interactive.
    Disable,
    /// New options arrived from the data provider.
    DataProvider(Vec<DataEntry>),
}

/// Processes an event and returns the effects to execute.
///
/// # Parameters
///
/// * `state` - The control instance
/// * `event` - What the user or the presentation layer did
///
/// # Returns
///
/// The produced actions, in execution order.
///
/// # Errors
///
/// Only `DataProvider` can fail: malformed entries yield
/// [`crate::PicklistError::InvalidModel`]. Every other event narrows invalid
/// input to an empty action list.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut Multiselect, event: &Event) -> Result<Vec<Action>> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Click { id, shift } => Ok(handle_click(state, *id, *shift)),
        Event::CollapseClick { group } => Ok(state.toggle_group_collapse(*group)),
        Event::FilterInput { query, at } => Ok(state.set_filter_query(query, *at)),
        Event::Tick { now } => Ok(state.poll_filter(*now)),
        Event::ClearFilter => Ok(state.clear_filter()),
        Event::ResetOption => {
            if !state.config.include_reset_option {
                tracing::debug!("reset option not included");
                return Ok(vec![]);
            }
            Ok(state.clear_selection())
        }
        Event::ResetButton => Ok(state.reset_to_default()),
        Event::Enable => Ok(state.enable()),
        Event::Disable => Ok(state.disable()),
        Event::DataProvider(entries) => state.data_provider(entries),
    }
}

fn handle_click(state: &mut Multiselect, id: MirrorId, shift: bool) -> Vec<Action> {
    if state.is_disabled() {
        tracing::debug!("click on disabled control ignored");
        return vec![];
    }

    match state.resolve(id) {
        None => {
            tracing::debug!(id = %id, "click on unknown entry ignored");
            vec![]
        }
        Some(EntryKind::SelectAll) => {
            state.anchor = None;
            let checked = !state.is_select_all_checked();
            state.toggle_item(id, checked)
        }
        Some(EntryKind::Group(group)) => {
            state.anchor = None;
            let checked = !state.group_state(group).is_some_and(|s| s.is_checked());
            state.toggle_group(group, checked)
        }
        Some(EntryKind::Item(item)) => {
            let checked = !state.is_selected(item);
            let multiple = state.mode().is_multiple();
            if !multiple && !checked {
                tracing::debug!(item = %item, "already selected");
                return vec![];
            }

            if !state.model().is_enabled(item) {
                tracing::debug!(item = %item, "click on disabled item ignored");
                return vec![];
            }

            let anchor = state.anchor.replace(item);
            let range_from = anchor
                .filter(|&from| shift && multiple && from != item && state.is_eligible(from))
                .and_then(|from| state.item_mirror(from));

            match range_from {
                Some(from) => {
                    tracing::debug!(from = %from, to = %id, checked, "range click");
                    state.toggle_range(from, id, checked)
                }
                None => state.toggle_item(id, checked),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, OptionModel};
    use crate::engine::GroupState;
    use crate::notify::Notification;
    use crate::Config;

    fn control(config: Config, entries: &[DataEntry]) -> Multiselect {
        let model = OptionModel::from_data(entries).unwrap();
        let mut select = Multiselect::new(config, model).unwrap();
        select.take_actions();
        select
    }

    fn flat(n: usize) -> Vec<DataEntry> {
        (1..=n)
            .map(|i| DataEntry::option(format!("Item {i}"), format!("v{i}")))
            .collect()
    }

    fn click(select: &mut Multiselect, item: usize, shift: bool) -> Vec<Action> {
        let id = select.item_mirror(ItemId(item)).unwrap();
        handle_event(select, &Event::Click { id, shift }).unwrap()
    }

    #[test]
    fn test_disabled_item_click_keeps_range_anchor() {
        let mut entries = flat(4);
        entries[1] = DataEntry::option("Item 2", "v2").disabled();
        let mut select = control(Config { multiple: true, ..Config::default() }, &entries);

        click(&mut select, 3, false);
        assert!(click(&mut select, 1, false).is_empty());
        click(&mut select, 0, true);

        assert_eq!(select.selected_values(), vec!["v1", "v3", "v4"]);
        assert!(!select.is_selected(ItemId(1)));
    }

    #[test]
    fn test_click_toggles_inverse_state() {
        let mut select = control(Config { multiple: true, ..Config::default() }, &flat(2));
        click(&mut select, 0, false);
        assert!(select.is_selected(ItemId(0)));
        click(&mut select, 0, false);
        assert!(!select.is_selected(ItemId(0)));
    }

    #[test]
    fn test_shift_click_selects_range_from_anchor() {
        let mut select = control(Config { multiple: true, ..Config::default() }, &flat(5));
        click(&mut select, 1, false);
        let actions = click(&mut select, 3, true);

        assert_eq!(select.selected_values(), vec!["v2", "v3", "v4"]);
        let notified: Vec<_> = actions.iter().filter(|a| a.is_notification()).collect();
        assert_eq!(notified.len(), 1);
    }

    #[test]
    fn test_shift_click_without_anchor_is_a_plain_toggle() {
        let mut select = control(Config { multiple: true, ..Config::default() }, &flat(3));
        click(&mut select, 2, true);
        assert_eq!(select.selected_values(), vec!["v3"]);
    }

    #[test]
    fn test_single_mode_click_on_selected_does_nothing() {
        let mut select = control(Config::default(), &flat(2));
        click(&mut select, 0, false);
        assert!(click(&mut select, 0, false).is_empty());
        assert_eq!(select.selected_values(), vec!["v1"]);
    }

    #[test]
    fn test_group_click_uses_group_state() {
        let config = Config {
            multiple: true,
            enable_clickable_opt_groups: true,
            ..Config::default()
        };
        let mut select = control(
            config,
            &[DataEntry::group(
                "G",
                vec![DataEntry::option("M1", "m1").selected(), DataEntry::option("M2", "m2")],
            )],
        );
        let group = select.mirrors().id_of_group(GroupId(0)).unwrap();

        handle_event(&mut select, &Event::Click { id: group, shift: false }).unwrap();
        assert_eq!(select.group_state(GroupId(0)), Some(GroupState::Checked));

        let actions = handle_event(&mut select, &Event::Click { id: group, shift: false }).unwrap();
        assert!(select.selected_values().is_empty());
        assert!(matches!(
            actions.last(),
            Some(Action::Notify(Notification::Changed { items, checked: false })) if items.len() == 2
        ));
    }

    #[test]
    fn test_clicks_ignored_while_disabled() {
        let mut select = control(Config { multiple: true, ..Config::default() }, &flat(2));
        handle_event(&mut select, &Event::Disable).unwrap();
        assert!(click(&mut select, 0, false).is_empty());
        assert!(!select.is_selected(ItemId(0)));
    }

    #[test]
    fn test_reset_option_clears_selection() {
        let config = Config {
            multiple: true,
            include_reset_option: true,
            ..Config::default()
        };
        let mut select = control(config, &flat(2));
        click(&mut select, 0, false);

        let actions = handle_event(&mut select, &Event::ResetOption).unwrap();
        assert!(select.selected_values().is_empty());
        assert!(!actions.iter().any(Action::is_notification));
    }

    #[test]
    fn test_data_provider_rejects_empty_group() {
        let mut select = control(Config::default(), &flat(1));
        let result = handle_event(&mut select, &Event::DataProvider(vec![DataEntry::group("G", vec![])]));
        assert!(result.is_err());
        assert_eq!(select.model().item_count(), 1);
    }
}
