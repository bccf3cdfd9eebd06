//! View model types representing renderable dropdown state.
//!
//! View models are immutable snapshots created via
//! [`Multiselect::view_model`](crate::app::Multiselect::view_model) for
//! presentation layers that redraw from snapshots instead of executing
//! individual render actions. They contain no business logic.

use crate::engine::GroupState;
use crate::mirror::{EntryKind, MirrorId};

/// Complete dropdown view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownViewModel {
    /// Rows in display order, including hidden ones.
    pub rows: Vec<RowViewModel>,

    /// Select-all aggregate, `None` when the control has no select-all entry.
    pub select_all_checked: Option<bool>,

    /// Control button label and title.
    pub button: ButtonInfo,

    /// Whether the whole control is disabled.
    pub disabled: bool,

    /// Active filter query (empty when unfiltered).
    pub query: String,
}

impl DropdownViewModel {
    /// Rows currently shown.
    pub fn visible_rows(&self) -> impl Iterator<Item = &RowViewModel> {
        self.rows.iter().filter(|row| !row.hidden)
    }
}

/// Display information for one mirror entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViewModel {
    pub id: MirrorId,
    pub kind: EntryKind,
    pub label: String,
    pub checked: bool,
    pub hidden: bool,
    pub disabled: bool,

    /// Whether the configured selected class applies to the row.
    pub active: bool,

    /// Aggregate of a group row, `None` for other rows.
    pub group_state: Option<GroupState>,

    /// Whether a group row is collapsed.
    pub collapsed: bool,
}

/// Control button information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonInfo {
    pub text: String,
    pub title: String,
}
