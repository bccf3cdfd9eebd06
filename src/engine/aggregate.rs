//! Group and global aggregates.
//!
//! Both aggregates are pure functions of item selection, item enablement and
//! filter eligibility. They are cached on the mirror entries for rendering only
//! and recomputed after every mutating operation and every filter pass.

use crate::domain::{Group, OptionModel};
use crate::mirror::MirrorSet;

/// Tri-state aggregate of a group's eligible, enabled members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupState {
    /// No counted member is selected, or the group has no counted member.
    #[default]
    Unchecked,
    /// Some but not all counted members are selected.
    Mixed,
    /// Every counted member is selected.
    Checked,
}

impl GroupState {
    /// Binary rendering of the state: only a fully selected group is checked.
    #[must_use]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}

/// Computes the aggregate of `group`.
///
/// Members hidden by the filter or disabled are excluded. A group with no
/// counted member is vacuously unchecked.
#[must_use]
pub fn group_state(model: &OptionModel, mirrors: &MirrorSet, group: &Group) -> GroupState {
    let (counted, selected) = group
        .item_ids
        .iter()
        .filter(|&&id| mirrors.is_item_eligible(id) && model.is_enabled(id))
        .fold((0usize, 0usize), |(counted, selected), &id| {
            let is_selected = model.item(id).is_some_and(|item| item.selected);
            (counted + 1, selected + usize::from(is_selected))
        });

    if counted == 0 || selected == 0 {
        GroupState::Unchecked
    } else if selected == counted {
        GroupState::Checked
    } else {
        GroupState::Mixed
    }
}

/// Computes the global select-all aggregate.
///
/// Checked iff at least one eligible, enabled item exists and all of them are
/// selected.
#[must_use]
pub fn select_all_state(model: &OptionModel, mirrors: &MirrorSet) -> bool {
    let mut any = false;
    for id in mirrors.eligible_items().filter(|&id| model.is_enabled(id)) {
        if !model.item(id).is_some_and(|item| item.selected) {
            return false;
        }
        any = true;
    }
    any
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataEntry, GroupId, ItemId};

    fn setup(entries: Vec<DataEntry>) -> (OptionModel, MirrorSet) {
        let model = OptionModel::from_data(&[DataEntry::group("G", entries)]).unwrap();
        let mirrors = MirrorSet::build(&model, false);
        (model, mirrors)
    }

    #[test]
    fn test_group_state_tri_state() {
        let (mut model, mirrors) = setup(vec![
            DataEntry::option("M1", "m1").selected(),
            DataEntry::option("M2", "m2").selected(),
        ]);
        let group = model.group(GroupId(0)).unwrap().clone();
        assert_eq!(group_state(&model, &mirrors, &group), GroupState::Checked);

        model.item_mut(ItemId(1)).unwrap().selected = false;
        assert_eq!(group_state(&model, &mirrors, &group), GroupState::Mixed);
        assert!(!group_state(&model, &mirrors, &group).is_checked());

        model.item_mut(ItemId(0)).unwrap().selected = false;
        assert_eq!(group_state(&model, &mirrors, &group), GroupState::Unchecked);
    }

    #[test]
    fn test_group_state_ignores_hidden_and_disabled_members() {
        let (model, mut mirrors) = setup(vec![
            DataEntry::option("M1", "m1").selected(),
            DataEntry::option("M2", "m2"),
            DataEntry::option("M3", "m3").disabled(),
        ]);
        let group = model.group(GroupId(0)).unwrap().clone();
        assert_eq!(group_state(&model, &mirrors, &group), GroupState::Mixed);

        mirrors.item_entry_mut(ItemId(1)).unwrap().eligible = false;
        assert_eq!(group_state(&model, &mirrors, &group), GroupState::Checked);

        mirrors.item_entry_mut(ItemId(0)).unwrap().eligible = false;
        assert_eq!(group_state(&model, &mirrors, &group), GroupState::Unchecked);
    }

    #[test]
    fn test_select_all_state_requires_one_eligible_item() {
        let (mut model, mut mirrors) = setup(vec![
            DataEntry::option("A", "a").selected(),
            DataEntry::option("B", "b"),
        ]);
        assert!(!select_all_state(&model, &mirrors));

        mirrors.item_entry_mut(ItemId(1)).unwrap().eligible = false;
        assert!(select_all_state(&model, &mirrors));

        mirrors.item_entry_mut(ItemId(0)).unwrap().eligible = false;
        assert!(!select_all_state(&model, &mirrors));

        model.item_mut(ItemId(1)).unwrap().selected = true;
        assert!(!select_all_state(&model, &mirrors));
    }
}
