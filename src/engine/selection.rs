//! Item, range, group and bulk selection operations.

use crate::app::{Action, Multiselect};
use crate::domain::{GroupId, ItemId, PicklistError, Result};
use crate::mirror::{EntryKind, MirrorId};
use crate::notify::{ItemRef, Notification};

impl Multiselect {
    /// Sets the selection of the entry behind `id`.
    ///
    /// In single mode checking an item clears every other item first and asks
    /// the presentation layer to close the dropdown; unchecking is ignored.
    /// The select-all entry delegates to [`Multiselect::select_all`] or
    /// [`Multiselect::deselect_all`] (honoring `select_all_just_visible`), a
    /// group header delegates to [`Multiselect::toggle_group`].
    ///
    /// Unknown, stale and disabled ids are ignored.
    ///
    /// # Returns
    ///
    /// Render actions followed by one `Changed` notification for the item.
    pub fn toggle_item(&mut self, id: MirrorId, checked: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("toggle_item", id = %id, checked).entered();

        match self.mirrors.resolve(id) {
            Some(EntryKind::SelectAll) => {
                let just_visible = self.config.select_all_just_visible;
                return if checked {
                    self.select_all(just_visible, true)
                } else {
                    self.deselect_all(just_visible, true)
                };
            }
            Some(EntryKind::Group(group)) => return self.toggle_group(group, checked),
            _ => {}
        }

        if self.structure_changed("toggle_item") {
            return Vec::new();
        }
        self.begin_action();
        if let Err(e) = self.apply_item_toggle(id, checked) {
            tracing::debug!(error = %e, "item toggle ignored");
        }
        self.finish_action()
    }

    fn apply_item_toggle(&mut self, id: MirrorId, checked: bool) -> Result<()> {
        let item = self.resolve_enabled_item(id)?;

        if self.mode.is_multiple() {
            self.write_item(item, checked);
        } else {
            if !checked {
                return Err(PicklistError::InvalidOperationForMode {
                    operation: "deselect_item",
                    mode: self.mode.name(),
                });
            }
            for other in 0..self.model.item_count() {
                if other != item.0 {
                    self.write_item(ItemId(other), false);
                }
            }
            self.write_item(item, true);
            self.pending.push(Action::CloseDropdown);
        }

        self.recompute_aggregates(false);
        self.refresh_button();

        if let Some(changed) = self.item_ref(item) {
            self.record(Notification::Changed {
                items: vec![changed],
                checked,
            });
        }
        Ok(())
    }

    /// Applies `checked` to every eligible item between `from` and `to`.
    ///
    /// Both endpoints must be eligible items of the current build. The range
    /// is taken over eligible items only, so filtered entries in between keep
    /// their selection; direction does not matter. Disabled items inside the
    /// range are skipped. Only available in multiple mode.
    ///
    /// # Returns
    ///
    /// Render actions followed by a single `Changed` notification carrying
    /// every enabled item of the range.
    pub fn toggle_range(&mut self, from: MirrorId, to: MirrorId, checked: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("toggle_range", from = %from, to = %to, checked).entered();

        if self.structure_changed("toggle_range") {
            return Vec::new();
        }
        self.begin_action();
        if let Err(e) = self.apply_range_toggle(from, to, checked) {
            tracing::debug!(error = %e, "range toggle ignored");
        }
        self.finish_action()
    }

    fn apply_range_toggle(&mut self, from: MirrorId, to: MirrorId, checked: bool) -> Result<()> {
        self.require_multiple("toggle_range")?;

        let eligible: Vec<ItemId> = self.mirrors.eligible_items().collect();
        let position = |id: MirrorId| -> Result<usize> {
            match self.mirrors.resolve(id) {
                Some(EntryKind::Item(item)) => eligible
                    .iter()
                    .position(|&e| e == item)
                    .ok_or_else(|| PicklistError::UnknownEntity(format!("{id} is not eligible"))),
                _ => Err(PicklistError::UnknownEntity(id.to_string())),
            }
        };
        let (a, b) = (position(from)?, position(to)?);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };

        let mut affected = Vec::with_capacity(end - start + 1);
        for &item in &eligible[start..=end] {
            if !self.model.is_enabled(item) {
                continue;
            }
            self.write_item(item, checked);
            affected.extend(self.item_ref(item));
        }

        tracing::debug!(start, end, affected = affected.len(), "range applied");

        self.recompute_aggregates(false);
        self.refresh_button();
        self.record(Notification::Changed {
            items: affected,
            checked,
        });
        Ok(())
    }

    /// Applies `checked` to every eligible, enabled member of `group`.
    ///
    /// Requires clickable groups and multiple mode; disabled groups are
    /// ignored.
    ///
    /// # Returns
    ///
    /// Render actions followed by one `Changed` notification carrying the full
    /// list of affected members.
    pub fn toggle_group(&mut self, group: GroupId, checked: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("toggle_group", group = %group, checked).entered();

        if self.structure_changed("toggle_group") {
            return Vec::new();
        }
        self.begin_action();
        if let Err(e) = self.apply_group_toggle(group, checked) {
            tracing::debug!(error = %e, "group toggle ignored");
        }
        self.finish_action()
    }

    fn apply_group_toggle(&mut self, group: GroupId, checked: bool) -> Result<()> {
        self.require_multiple("toggle_group")?;
        if !self.config.enable_clickable_opt_groups {
            return Err(PicklistError::DisabledEntity(format!("group {group} is not clickable")));
        }
        let members: Vec<ItemId> = match self.model.group(group) {
            None => return Err(PicklistError::UnknownEntity(format!("group {group}"))),
            Some(g) if !g.enabled => return Err(PicklistError::DisabledEntity(format!("group {group}"))),
            Some(g) => g
                .item_ids
                .iter()
                .copied()
                .filter(|&id| self.mirrors.is_item_eligible(id) && self.model.is_enabled(id))
                .collect(),
        };

        let mut affected = Vec::with_capacity(members.len());
        for item in members {
            self.write_item(item, checked);
            affected.extend(self.item_ref(item));
        }

        self.recompute_aggregates(false);
        self.refresh_button();
        self.record(Notification::Changed {
            items: affected,
            checked,
        });
        Ok(())
    }

    /// Items a bulk operation may touch.
    fn bulk_targets(&self, just_visible: bool) -> Vec<ItemId> {
        self.model
            .items()
            .iter()
            .map(|item| item.id)
            .filter(|&id| self.model.is_enabled(id))
            .filter(|&id| !just_visible || self.mirrors.is_item_eligible(id))
            .collect()
    }

    /// Selects every enabled item, or only eligible ones with `just_visible`.
    ///
    /// In single mode exactly one item ends up selected: the first enabled
    /// (and, with `just_visible`, eligible) item in document order. The items
    /// it clears are part of the reported delta.
    ///
    /// # Returns
    ///
    /// Render actions followed, when `notify` is set, by one `SelectAll`
    /// notification listing exactly the items that changed.
    pub fn select_all(&mut self, just_visible: bool, notify: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("select_all", just_visible, notify).entered();

        if self.structure_changed("select_all") {
            return Vec::new();
        }
        self.begin_action();
        let targets = self.bulk_targets(just_visible);
        let mut changed = Vec::new();

        if self.mode.is_multiple() {
            for item in targets {
                if self.write_item(item, true) {
                    changed.extend(self.item_ref(item));
                }
            }
        } else if let Some(&first) = targets.first() {
            for index in 0..self.model.item_count() {
                let item = ItemId(index);
                if self.write_item(item, item == first) {
                    changed.extend(self.item_ref(item));
                }
            }
        }

        tracing::debug!(changed = changed.len(), "select all applied");

        self.recompute_aggregates(false);
        self.refresh_button();
        if notify {
            self.record(Notification::SelectAll { items: changed });
        }
        self.finish_action()
    }

    /// Deselects every enabled item, or only eligible ones with `just_visible`.
    ///
    /// Ignored in single mode, which can never be left without a selection.
    ///
    /// # Returns
    ///
    /// Render actions followed, when `notify` is set, by one `DeselectAll`
    /// notification listing exactly the items that changed.
    pub fn deselect_all(&mut self, just_visible: bool, notify: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("deselect_all", just_visible, notify).entered();

        if self.structure_changed("deselect_all") {
            return Vec::new();
        }
        self.begin_action();
        match self.deselect_targets(just_visible) {
            Ok(changed) => {
                self.recompute_aggregates(false);
                self.refresh_button();
                if notify {
                    self.record(Notification::DeselectAll { items: changed });
                }
            }
            Err(e) => tracing::debug!(error = %e, "deselect all ignored"),
        }
        self.finish_action()
    }

    fn deselect_targets(&mut self, just_visible: bool) -> Result<Vec<ItemRef>> {
        self.require_multiple("deselect_all")?;

        let mut changed = Vec::new();
        for item in self.bulk_targets(just_visible) {
            if self.write_item(item, false) {
                changed.extend(self.item_ref(item));
            }
        }
        tracing::debug!(changed = changed.len(), "deselect all applied");
        Ok(changed)
    }

    /// Deselects every enabled item without notifying, then recomputes the
    /// aggregates and refreshes the button.
    ///
    /// In single mode the selection is left as is.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("clear_selection").entered();

        if self.structure_changed("clear_selection") {
            return Vec::new();
        }
        self.begin_action();
        if let Err(e) = self.deselect_targets(false) {
            tracing::debug!(error = %e, "selection kept");
        }
        self.recompute_aggregates(false);
        self.refresh_button();
        self.finish_action()
    }

    /// Selects every enabled item carrying one of `values`.
    ///
    /// Unknown values are skipped. In single mode the last matching value wins
    /// and every other item is cleared.
    ///
    /// # Returns
    ///
    /// Render actions followed, when `notify` is set, by one `Changed`
    /// notification listing the newly selected items.
    pub fn select_values(&mut self, values: &[&str], notify: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("select_values", count = values.len(), notify).entered();

        if self.structure_changed("select_values") {
            return Vec::new();
        }
        self.begin_action();
        let matching = self.enabled_with_values(values);
        let mut changed = Vec::new();

        if self.mode.is_multiple() {
            for item in matching {
                if self.write_item(item, true) {
                    changed.extend(self.item_ref(item));
                }
            }
        } else if let Some(&last) = matching.last() {
            for other in 0..self.model.item_count() {
                if other != last.0 {
                    self.write_item(ItemId(other), false);
                }
            }
            if self.write_item(last, true) {
                changed.extend(self.item_ref(last));
            }
        }

        self.recompute_aggregates(false);
        self.refresh_button();
        if notify {
            self.record(Notification::Changed {
                items: changed,
                checked: true,
            });
        }
        self.finish_action()
    }

    /// Deselects every enabled item carrying one of `values`.
    ///
    /// Ignored in single mode.
    pub fn deselect_values(&mut self, values: &[&str], notify: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("deselect_values", count = values.len(), notify).entered();

        if self.structure_changed("deselect_values") {
            return Vec::new();
        }
        self.begin_action();
        if let Err(e) = self.require_multiple("deselect_values") {
            tracing::debug!(error = %e, "deselect by value ignored");
            return self.finish_action();
        }

        let mut changed = Vec::new();
        for item in self.enabled_with_values(values) {
            if self.write_item(item, false) {
                changed.extend(self.item_ref(item));
            }
        }

        self.recompute_aggregates(false);
        self.refresh_button();
        if notify {
            self.record(Notification::Changed {
                items: changed,
                checked: false,
            });
        }
        self.finish_action()
    }

    /// Enabled items carrying one of `values`, in the order the values are given.
    fn enabled_with_values(&self, values: &[&str]) -> Vec<ItemId> {
        let mut ids = Vec::new();
        for value in values {
            let before = ids.len();
            ids.extend(
                self.model
                    .ids_with_value(value)
                    .filter(|&id| self.model.is_enabled(id)),
            );
            if ids.len() == before {
                tracing::debug!(value = %value, "no enabled option with value");
            }
        }
        ids
    }
}
