//! Instance state of one pick list control.
//!
//! [`Multiselect`] is the explicit context every operation runs against. It
//! owns the option model for its lifetime, the mirror set of the
//! current build, the cached aggregates and the filter state. There is no
//! ambient global state: two controls are two independent values.
//!
//! # State Components
//!
//! - **Model**: Canonical items and groups, mutated only by engine operations
//! - **Mirrors**: Checkable entries of the current build with eligibility
//! - **Aggregates**: Cached group tri-states and the global select-all state
//! - **Filter**: Active query plus the single pending debounced query
//! - **Anchor**: Last clicked item, used as the start of a range click
//! - **Pending actions**: Effects of the action in progress
//!
//! # Example
//!
//! ```rust
//! use picklist::app::Multiselect;
//! use picklist::domain::{DataEntry, OptionModel};
//! use picklist::Config;
//!
//! let model = OptionModel::from_data(&[
//!     DataEntry::option("One", "1"),
//!     DataEntry::option("Two", "2").selected(),
//! ]).unwrap();
//! let mut select = Multiselect::new(Config { multiple: true, ..Config::default() }, model)?;
//! let initial = select.take_actions();
//! assert!(!initial.is_empty());
//! assert_eq!(select.selected_values(), vec!["2"]);
//! # Ok::<(), picklist::PicklistError>(())
//! ```

use super::actions::Action;
use super::modes::SelectionMode;
use crate::domain::{GroupId, ItemId, OptionModel, PicklistError, Result, SelectionSnapshot};
use crate::engine::{aggregate, GroupState};
use crate::filter::{FilterDebouncer, VisibilityFilter};
use crate::mirror::{EntryKind, MirrorId, MirrorSet};
use crate::notify::{ChangeNotifier, ItemRef, Notification};
use crate::ui::viewmodel::{ButtonInfo, DropdownViewModel, RowViewModel};
use crate::Config;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// One pick list control.
#[derive(Debug)]
pub struct Multiselect {
    pub(crate) config: Config,
    pub(crate) mode: SelectionMode,
    pub(crate) filter: VisibilityFilter,
    pub(crate) model: OptionModel,
    pub(crate) mirrors: MirrorSet,
    pub(crate) group_states: Vec<GroupState>,
    pub(crate) select_all_checked: bool,
    pub(crate) collapsed_groups: HashSet<GroupId>,
    pub(crate) query: String,
    pub(crate) debouncer: FilterDebouncer,
    pub(crate) anchor: Option<ItemId>,
    pub(crate) default_selection: Option<SelectionSnapshot>,
    pub(crate) disabled: bool,
    pub(crate) disabled_by_empty: bool,
    pub(crate) pending: Vec<Action>,
    pub(crate) notifier: ChangeNotifier,
}

impl Multiselect {
    /// Creates a control for `model` and performs the first synchronization.
    ///
    /// The effects of the first synchronization (every checked state, the
    /// aggregates, the button label) are available through
    /// [`Multiselect::take_actions`].
    ///
    /// In single mode a model arriving with several selected items keeps only
    /// the last one, as a native single-value select does.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::Config`] when the configuration does not
    /// validate, or [`PicklistError::StructuralMismatch`] if the mirror set
    /// cannot cover the model.
    pub fn new(config: Config, model: OptionModel) -> Result<Self> {
        config.validate()?;

        let mode = SelectionMode::from_multiple(config.multiple);
        let filter = VisibilityFilter::new(config.filter_options());
        let debouncer = FilterDebouncer::new(Duration::from_millis(config.filter_debounce_ms));

        let mut select = Self {
            config,
            mode,
            filter,
            model: OptionModel::new(),
            mirrors: MirrorSet::default(),
            group_states: Vec::new(),
            select_all_checked: false,
            collapsed_groups: HashSet::new(),
            query: String::new(),
            debouncer,
            anchor: None,
            default_selection: None,
            disabled: false,
            disabled_by_empty: false,
            pending: Vec::new(),
            notifier: ChangeNotifier::default(),
        };

        let mirrors = MirrorSet::build(&model, select.includes_select_all(&model));
        select.install(model, mirrors)?;

        tracing::debug!(
            mode = mode.name(),
            items = select.model.item_count(),
            groups = select.model.group_count(),
            "multiselect initialized"
        );

        Ok(select)
    }

    /// Replaces model and mirrors and seeds every mirror from the model.
    pub(crate) fn install(&mut self, mut model: OptionModel, mirrors: MirrorSet) -> Result<()> {
        if let Err(e) = mirrors.verify(&model) {
            tracing::error!(error = %e, "mirror set does not cover the option model");
            return Err(e);
        }

        if !self.mode.is_multiple() {
            normalize_single_selection(&mut model);
        }

        self.model = model;
        self.mirrors = mirrors;
        self.group_states = vec![GroupState::Unchecked; self.model.group_count()];
        self.select_all_checked = false;
        self.anchor = None;
        self.collapsed_groups = if self.config.enable_collapsible_opt_groups
            && self.config.collapse_opt_groups_by_default
        {
            self.model.groups().iter().map(|group| group.id).collect()
        } else {
            HashSet::new()
        };
        self.default_selection = self
            .config
            .enable_reset_button
            .then(|| self.model.snapshot_selection());

        self.apply_empty_policy();
        self.seed_mirrors();
        Ok(())
    }

    /// Disables an empty control when `disable_if_empty` is set, and enables it
    /// again once it was disabled for that reason and has items.
    fn apply_empty_policy(&mut self) {
        if !self.config.disable_if_empty {
            return;
        }
        let empty = self.model.is_empty();
        if empty && !self.disabled {
            self.disabled = true;
            self.disabled_by_empty = true;
            self.pending.push(Action::RenderDisabled { disabled: true });
        } else if !empty && self.disabled_by_empty {
            self.disabled = false;
            self.disabled_by_empty = false;
            self.pending.push(Action::RenderDisabled { disabled: false });
        }
    }

    /// Seeds checked, eligible and collapsed state of every mirror and renders
    /// all of it unconditionally.
    fn seed_mirrors(&mut self) {
        let eligible = self.filter.apply(&self.model, &self.mirrors, &self.query);

        for index in 0..self.mirrors.entries().len() {
            let entry = &self.mirrors.entries()[index];
            let (id, kind) = (entry.id, entry.kind);
            match kind {
                EntryKind::Item(item) => {
                    let selected = self.model.item(item).is_some_and(|i| i.selected);
                    let collapsed = self
                        .model
                        .item(item)
                        .and_then(|i| i.group_id)
                        .is_some_and(|g| self.collapsed_groups.contains(&g));
                    if let Some(entry) = self.mirrors.item_entry_mut(item) {
                        entry.checked = selected;
                        entry.eligible = eligible.contains(&id);
                        entry.collapsed = collapsed;
                    }
                    self.pending.push(Action::RenderChecked { id, checked: selected });
                }
                EntryKind::Group(group) => {
                    if let Some(entry) = self.mirrors.group_entry_mut(group) {
                        entry.eligible = eligible.contains(&id);
                    }
                    if self.collapsed_groups.contains(&group) {
                        self.pending.push(Action::RenderGroupCollapsed { group, collapsed: true });
                    }
                }
                EntryKind::SelectAll => continue,
            }
            let hidden = self.mirrors.entries()[index].is_hidden();
            self.pending.push(Action::SetHidden { id, hidden });
        }

        self.recompute_aggregates(true);
        self.refresh_button();
    }

    /// Whether a model of this size gets the synthetic select-all entry.
    pub(crate) fn includes_select_all(&self, model: &OptionModel) -> bool {
        self.config.include_select_all_option
            && self.mode.is_multiple()
            && model.item_count() > self.config.include_select_all_if_more_than
    }

    /// Whether group headers carry a checkbox.
    pub(crate) const fn groups_clickable(&self) -> bool {
        self.config.enable_clickable_opt_groups && self.mode.is_multiple()
    }

    /// Drains the effects accumulated since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn begin_action(&mut self) {
        self.notifier.begin();
    }

    /// Settles the action in progress: appends its notification, if any, and
    /// returns every effect produced.
    pub(crate) fn finish_action(&mut self) -> Vec<Action> {
        if let Some(notification) = self.notifier.finish() {
            self.pending.push(Action::Notify(notification));
        }
        self.take_actions()
    }

    /// Whether the model changed structurally since the last build.
    ///
    /// Logs the mismatch; operations treat it as a no-op until a rebuild.
    pub(crate) fn structure_changed(&self, operation: &str) -> bool {
        match self.mirrors.verify(&self.model) {
            Ok(()) => false,
            Err(e) => {
                tracing::error!(operation, error = %e, "model changed structurally, rebuild required");
                true
            }
        }
    }

    pub(crate) fn record(&mut self, notification: Notification) {
        self.notifier.record(notification);
    }

    /// Writes an item's selection and mirror, rendering the mirror on change.
    ///
    /// Returns whether the model's `selected` flag changed.
    pub(crate) fn write_item(&mut self, item: ItemId, selected: bool) -> bool {
        let Some(model_item) = self.model.item_mut(item) else {
            return false;
        };
        let changed = model_item.selected != selected;
        model_item.selected = selected;

        if let Some(entry) = self.mirrors.item_entry_mut(item) {
            if entry.checked != selected {
                entry.checked = selected;
                let id = entry.id;
                self.pending.push(Action::RenderChecked { id, checked: selected });
            }
        }
        changed
    }

    /// Re-synchronizes item mirrors whose checked state drifted from the model.
    pub(crate) fn sync_item_mirrors(&mut self) {
        for item in 0..self.model.item_count() {
            let id = ItemId(item);
            let selected = self.model.item(id).is_some_and(|i| i.selected);
            if let Some(entry) = self.mirrors.item_entry_mut(id) {
                if entry.checked != selected {
                    entry.checked = selected;
                    let mirror = entry.id;
                    self.pending.push(Action::RenderChecked { id: mirror, checked: selected });
                }
            }
        }
    }

    /// Writes eligibility for every item and group mirror, rendering visibility
    /// changes.
    pub(crate) fn write_eligibility(&mut self, eligible: &HashSet<MirrorId>) {
        for entry in self.mirrors.filterable_entries_mut() {
            let was_hidden = entry.is_hidden();
            entry.eligible = eligible.contains(&entry.id);
            let hidden = entry.is_hidden();
            if hidden != was_hidden {
                self.pending.push(Action::SetHidden { id: entry.id, hidden });
            }
        }
    }

    /// Recomputes every group aggregate and the global aggregate.
    ///
    /// Renders only what changed unless `force` is set. Never records a
    /// notification.
    pub(crate) fn recompute_aggregates(&mut self, force: bool) {
        let clickable = self.groups_clickable();

        for index in 0..self.model.group_count() {
            let group = GroupId(index);
            let Some(state) = self
                .model
                .group(group)
                .map(|g| aggregate::group_state(&self.model, &self.mirrors, g))
            else {
                continue;
            };
            let Some(cached) = self.group_states.get_mut(index) else {
                continue;
            };
            let changed = *cached != state;
            *cached = state;
            if let Some(entry) = self.mirrors.group_entry_mut(group) {
                entry.checked = state.is_checked();
            }
            if clickable && (changed || force) {
                self.pending.push(Action::RenderGroupState { group, state });
            }
        }

        let checked = aggregate::select_all_state(&self.model, &self.mirrors);
        let changed = checked != self.select_all_checked;
        self.select_all_checked = checked;
        if let Some(entry) = self.mirrors.select_all_entry_mut() {
            entry.checked = checked;
            if changed || force {
                self.pending.push(Action::RenderSelectAllState { checked });
            }
        }
    }

    /// Queues the button label and title for the current selection.
    pub(crate) fn refresh_button(&mut self) {
        let text = crate::ui::button_text(&self.config, &self.model, self.mode, self.disabled);
        let title = crate::ui::button_title(&self.config, &self.model);
        self.pending.push(Action::RefreshButton { text, title });
    }

    pub(crate) fn item_ref(&self, item: ItemId) -> Option<ItemRef> {
        self.model.item(item).map(ItemRef::from)
    }

    /// Resolves a mirror id to an item, enforcing that it can change.
    pub(crate) fn resolve_enabled_item(&self, id: MirrorId) -> Result<ItemId> {
        match self.mirrors.resolve(id) {
            Some(EntryKind::Item(item)) if self.model.is_enabled(item) => Ok(item),
            Some(EntryKind::Item(_)) => Err(PicklistError::DisabledEntity(id.to_string())),
            _ => Err(PicklistError::UnknownEntity(id.to_string())),
        }
    }

    /// Rejects an operation unless the control is in multiple mode.
    pub(crate) fn require_multiple(&self, operation: &'static str) -> Result<()> {
        if self.mode.is_multiple() {
            Ok(())
        } else {
            Err(PicklistError::InvalidOperationForMode {
                operation,
                mode: self.mode.name(),
            })
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn model(&self) -> &OptionModel {
        &self.model
    }

    /// Mutable access to the model between actions.
    ///
    /// Call [`Multiselect::refresh`] afterwards to re-synchronize mirrors.
    pub fn model_mut(&mut self) -> &mut OptionModel {
        &mut self.model
    }

    #[must_use]
    pub const fn mirrors(&self) -> &MirrorSet {
        &self.mirrors
    }

    #[must_use]
    pub fn resolve(&self, id: MirrorId) -> Option<EntryKind> {
        self.mirrors.resolve(id)
    }

    /// Mirror id of an item in the current build.
    #[must_use]
    pub fn item_mirror(&self, item: ItemId) -> Option<MirrorId> {
        self.mirrors.id_of_item(item)
    }

    /// Mirror id of the select-all entry, if present.
    #[must_use]
    pub fn select_all_mirror(&self) -> Option<MirrorId> {
        self.mirrors.select_all_entry().map(|entry| entry.id)
    }

    #[must_use]
    pub fn group_state(&self, group: GroupId) -> Option<GroupState> {
        self.group_states.get(group.0).copied()
    }

    #[must_use]
    pub const fn is_select_all_checked(&self) -> bool {
        self.select_all_checked
    }

    #[must_use]
    pub fn is_group_collapsed(&self, group: GroupId) -> bool {
        self.collapsed_groups.contains(&group)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// When the pending filter pass becomes due, if one is scheduled.
    ///
    /// Hosts use it to deliver the next `Tick`.
    #[must_use]
    pub fn filter_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_selected(&self, item: ItemId) -> bool {
        self.model.item(item).is_some_and(|i| i.selected)
    }

    #[must_use]
    pub fn is_eligible(&self, item: ItemId) -> bool {
        self.mirrors.is_item_eligible(item)
    }

    /// Values of the selected items in document order.
    #[must_use]
    pub fn selected_values(&self) -> Vec<&str> {
        self.model.selected_items().map(|item| item.value.as_str()).collect()
    }

    /// Computes a snapshot view model of the whole dropdown.
    #[must_use]
    pub fn view_model(&self) -> DropdownViewModel {
        let active_class = self.config.selected_class.is_some();
        let rows = self
            .mirrors
            .entries()
            .iter()
            .map(|entry| {
                let (label, disabled, group_state, collapsed) = match entry.kind {
                    EntryKind::SelectAll => (self.config.select_all_text.clone(), false, None, false),
                    EntryKind::Group(group) => {
                        let g = self.model.group(group);
                        (
                            g.map(|g| g.label.clone()).unwrap_or_default(),
                            g.is_some_and(|g| !g.enabled),
                            self.group_state(group),
                            self.is_group_collapsed(group),
                        )
                    }
                    EntryKind::Item(item) => (
                        self.model.item(item).map(|i| i.label.clone()).unwrap_or_default(),
                        !self.model.is_enabled(item),
                        None,
                        false,
                    ),
                };
                RowViewModel {
                    id: entry.id,
                    kind: entry.kind,
                    label,
                    checked: entry.checked,
                    hidden: entry.is_hidden(),
                    disabled,
                    active: active_class && entry.checked,
                    group_state,
                    collapsed,
                }
            })
            .collect();

        DropdownViewModel {
            rows,
            select_all_checked: self.mirrors.has_select_all().then_some(self.select_all_checked),
            button: ButtonInfo {
                text: crate::ui::button_text(&self.config, &self.model, self.mode, self.disabled),
                title: crate::ui::button_title(&self.config, &self.model),
            },
            disabled: self.disabled,
            query: self.query.clone(),
        }
    }
}

/// Keeps only the last selected item, as a native single-value select does.
pub(crate) fn normalize_single_selection(model: &mut OptionModel) {
    let selected: Vec<ItemId> = model.selected_items().map(|item| item.id).collect();
    if let Some((&keep, rest)) = selected.split_last() {
        if !rest.is_empty() {
            tracing::debug!(kept = %keep, dropped = rest.len(), "single mode keeps the last selected item");
        }
        for &id in rest {
            if let Some(item) = model.item_mut(id) {
                item.selected = false;
            }
        }
    }
}
