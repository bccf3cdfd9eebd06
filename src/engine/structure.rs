//! Structural operations: rebuild, refresh, reset, collapse and enablement.

use crate::app::state::normalize_single_selection;
use crate::app::{Action, Multiselect};
use crate::domain::{DataEntry, GroupId, OptionModel, PicklistError, Result};

impl Multiselect {
    /// Replaces the option model and rebuilds every mirror.
    ///
    /// Ids of the previous build become stale. Mirror checked state is seeded
    /// from `model`, the active query is re-applied and the reset snapshot is
    /// retaken.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::StructuralMismatch`] if the new mirror set does
    /// not cover `model`. The previous state is kept in that case.
    pub fn rebuild(&mut self, model: OptionModel) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!(
            "rebuild",
            items = model.item_count(),
            groups = model.group_count()
        )
        .entered();

        self.begin_action();
        let include_select_all = self.includes_select_all(&model);
        let mirrors = self.mirrors.rebuild(&model, include_select_all);
        if let Err(e) = self.install(model, mirrors) {
            self.notifier.finish();
            self.pending.clear();
            return Err(e);
        }

        tracing::debug!(generation = self.mirrors.generation(), "rebuild complete");

        Ok(self.finish_action())
    }

    /// Builds a model from data entries and rebuilds with it.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::InvalidModel`] for malformed entries, or any
    /// error of [`Multiselect::rebuild`].
    pub fn data_provider(&mut self, entries: &[DataEntry]) -> Result<Vec<Action>> {
        let model = OptionModel::from_data(entries)?;
        self.rebuild(model)
    }

    /// Checks that the mirror set still covers the option model.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::StructuralMismatch`] when items or groups were
    /// added or removed without a rebuild.
    pub fn verify_structure(&self) -> Result<()> {
        self.mirrors.verify(&self.model)
    }

    /// Re-synchronizes mirrors with selection changes made through
    /// [`Multiselect::model_mut`].
    ///
    /// In single mode only the last selected item is kept.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::StructuralMismatch`] when the model changed
    /// structurally; call [`Multiselect::rebuild`] instead.
    pub fn refresh(&mut self) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("refresh").entered();

        if let Err(e) = self.verify_structure() {
            tracing::error!(error = %e, "refresh on a structurally changed model");
            return Err(e);
        }

        self.begin_action();
        if !self.mode.is_multiple() {
            normalize_single_selection(&mut self.model);
        }
        self.sync_item_mirrors();
        self.recompute_aggregates(false);
        self.refresh_button();
        Ok(self.finish_action())
    }

    /// Restores the selection captured at build time and clears the filter.
    ///
    /// Only available with `enable_reset_button`. Produces no notification.
    pub fn reset_to_default(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("reset_to_default").entered();

        if self.structure_changed("reset_to_default") {
            return Vec::new();
        }
        self.begin_action();
        let Some(snapshot) = self.default_selection.clone() else {
            tracing::debug!("reset button not enabled");
            return self.finish_action();
        };

        self.model.restore_selection(&snapshot);
        self.sync_item_mirrors();
        self.debouncer.cancel();
        self.reset_query();
        self.recompute_aggregates(false);
        self.refresh_button();
        self.finish_action()
    }

    /// Collapses an expanded group or expands a collapsed one.
    ///
    /// Collapsing hides the members without touching their eligibility, so
    /// they still count for aggregates and bulk operations.
    pub fn toggle_group_collapse(&mut self, group: GroupId) -> Vec<Action> {
        let _span = tracing::debug_span!("toggle_group_collapse", group = %group).entered();

        if self.structure_changed("toggle_group_collapse") {
            return Vec::new();
        }
        self.begin_action();
        if let Err(e) = self.apply_collapse(group) {
            tracing::debug!(error = %e, "collapse ignored");
        }
        self.finish_action()
    }

    fn apply_collapse(&mut self, group: GroupId) -> Result<()> {
        if !self.config.enable_collapsible_opt_groups {
            return Err(PicklistError::DisabledEntity(format!("group {group} is not collapsible")));
        }
        let members = self
            .model
            .group(group)
            .map(|g| g.item_ids.clone())
            .ok_or_else(|| PicklistError::UnknownEntity(format!("group {group}")))?;

        let collapsed = !self.collapsed_groups.contains(&group);
        if collapsed {
            self.collapsed_groups.insert(group);
        } else {
            self.collapsed_groups.remove(&group);
        }

        for item in members {
            if let Some(entry) = self.mirrors.item_entry_mut(item) {
                let was_hidden = entry.is_hidden();
                entry.collapsed = collapsed;
                if entry.is_hidden() != was_hidden {
                    let (id, hidden) = (entry.id, entry.is_hidden());
                    self.pending.push(Action::SetHidden { id, hidden });
                }
            }
        }
        self.pending.push(Action::RenderGroupCollapsed { group, collapsed });
        Ok(())
    }

    /// Enables the control.
    pub fn enable(&mut self) -> Vec<Action> {
        self.set_disabled(false)
    }

    /// Disables the control. Selection operations stay available to the
    /// caller; only the button label changes.
    pub fn disable(&mut self) -> Vec<Action> {
        self.set_disabled(true)
    }

    fn set_disabled(&mut self, disabled: bool) -> Vec<Action> {
        let _span = tracing::debug_span!("set_disabled", disabled).entered();

        if self.structure_changed("set_disabled") {
            return Vec::new();
        }
        self.begin_action();
        self.disabled_by_empty = false;
        if self.disabled != disabled {
            self.disabled = disabled;
            self.pending.push(Action::RenderDisabled { disabled });
            self.refresh_button();
        }
        self.finish_action()
    }
}
