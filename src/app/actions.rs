//! Actions representing effects to be executed by the presentation layer.
//!
//! Engine operations never touch the visual representation directly. They
//! return a `Vec<Action>` describing what changed, in order, and the caller
//! executes it, typically through [`dispatch`]. Render actions reflect mirror
//! state; at most one [`Action::Notify`] closes every logical action.
//!
//! # Example
//!
//! ```rust
//! use picklist::app::{dispatch, Action};
//! use picklist::notify::RecordingListener;
//! use picklist::ui::RecordingRenderer;
//!
//! let actions = vec![Action::RenderSelectAllState { checked: true }];
//! let mut renderer = RecordingRenderer::default();
//! let mut listener = RecordingListener::default();
//! dispatch(&actions, &mut renderer, &mut listener);
//! assert_eq!(renderer.calls, actions);
//! ```

use crate::domain::GroupId;
use crate::engine::GroupState;
use crate::mirror::MirrorId;
use crate::notify::{Listener, Notification};
use crate::ui::Renderer;

/// Effects produced by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reflects an item mirror's checked state.
    RenderChecked {
        /// Mirror of the item.
        id: MirrorId,
        /// New checked state.
        checked: bool,
    },

    /// Reflects a group aggregate. Only produced when groups are clickable.
    RenderGroupState {
        /// The group whose aggregate changed.
        group: GroupId,
        /// New aggregate.
        state: GroupState,
    },

    /// Reflects the global select-all aggregate. Only produced when the
    /// select-all entry exists.
    RenderSelectAllState {
        /// New aggregate.
        checked: bool,
    },

    /// Shows or hides an item or group entry.
    SetHidden {
        /// Mirror of the entry.
        id: MirrorId,
        /// Whether the entry is hidden.
        hidden: bool,
    },

    /// Marks a group header as collapsed or expanded.
    RenderGroupCollapsed {
        /// The group header.
        group: GroupId,
        /// Whether the group is collapsed.
        collapsed: bool,
    },

    /// Updates the control button label and title.
    RefreshButton {
        /// Button label.
        text: String,
        /// Button title (tooltip).
        title: String,
    },

    /// Enables or disables the whole control.
    RenderDisabled {
        /// Whether the control is disabled.
        disabled: bool,
    },

    /// Closes the interaction surface, sent after a single-mode choice.
    CloseDropdown,

    /// Delivers the semantic outcome of the action to the caller.
    Notify(Notification),
}

impl Action {
    /// Whether this action carries a notification rather than a render effect.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        matches!(self, Self::Notify(_))
    }
}

/// Executes actions in order against a renderer and a listener.
pub fn dispatch(actions: &[Action], renderer: &mut dyn Renderer, listener: &mut dyn Listener) {
    for action in actions {
        match action {
            Action::RenderChecked { id, checked } => renderer.render_checked(*id, *checked),
            Action::RenderGroupState { group, state } => renderer.render_group_state(*group, *state),
            Action::RenderSelectAllState { checked } => renderer.render_select_all_state(*checked),
            Action::SetHidden { id, hidden } => renderer.set_hidden(*id, *hidden),
            Action::RenderGroupCollapsed { group, collapsed } => {
                renderer.render_group_collapsed(*group, *collapsed);
            }
            Action::RefreshButton { text, title } => renderer.render_button(text, title),
            Action::RenderDisabled { disabled } => renderer.render_disabled(*disabled),
            Action::CloseDropdown => renderer.close(),
            Action::Notify(notification) => listener.notify(notification),
        }
    }
}
