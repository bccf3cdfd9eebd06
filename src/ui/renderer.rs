//! Rendering contract consumed by the engine.
//!
//! The engine owns no visual representation. It reports computed state through
//! these callbacks (via [`dispatch`](crate::app::dispatch)) and the
//! presentation layer decides what checked, hidden or collapsed looks like.

use crate::app::Action;
use crate::domain::GroupId;
use crate::engine::GroupState;
use crate::mirror::MirrorId;

/// Presentation-layer callbacks.
pub trait Renderer {
    fn render_checked(&mut self, id: MirrorId, checked: bool);

    fn render_group_state(&mut self, group: GroupId, state: GroupState);

    fn render_select_all_state(&mut self, checked: bool);

    fn set_hidden(&mut self, id: MirrorId, hidden: bool);

    fn render_group_collapsed(&mut self, group: GroupId, collapsed: bool) {
        let _ = (group, collapsed);
    }

    fn render_button(&mut self, text: &str, title: &str) {
        let _ = (text, title);
    }

    fn render_disabled(&mut self, disabled: bool) {
        let _ = disabled;
    }

    /// Closes the interaction surface.
    fn close(&mut self) {}
}

/// Renderer that records every call as the equivalent [`Action`].
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub calls: Vec<Action>,
}

impl RecordingRenderer {
    /// Latest checked state rendered for `id`, if any.
    #[must_use]
    pub fn last_checked(&self, id: MirrorId) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            Action::RenderChecked { id: rendered, checked } if *rendered == id => Some(*checked),
            _ => None,
        })
    }

    /// Latest button label rendered, if any.
    #[must_use]
    pub fn last_button_text(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            Action::RefreshButton { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn render_checked(&mut self, id: MirrorId, checked: bool) {
        self.calls.push(Action::RenderChecked { id, checked });
    }

    fn render_group_state(&mut self, group: GroupId, state: GroupState) {
        self.calls.push(Action::RenderGroupState { group, state });
    }

    fn render_select_all_state(&mut self, checked: bool) {
        self.calls.push(Action::RenderSelectAllState { checked });
    }

    fn set_hidden(&mut self, id: MirrorId, hidden: bool) {
        self.calls.push(Action::SetHidden { id, hidden });
    }

    fn render_group_collapsed(&mut self, group: GroupId, collapsed: bool) {
        self.calls.push(Action::RenderGroupCollapsed { group, collapsed });
    }

    fn render_button(&mut self, text: &str, title: &str) {
        self.calls.push(Action::RefreshButton {
            text: text.to_string(),
            title: title.to_string(),
        });
    }

    fn render_disabled(&mut self, disabled: bool) {
        self.calls.push(Action::RenderDisabled { disabled });
    }

    fn close(&mut self) {
        self.calls.push(Action::CloseDropdown);
    }
}
