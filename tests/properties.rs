//! Property tests for the selection invariants under random operation sequences.

use picklist::app::{handle_event, Action, Event, Multiselect};
use picklist::domain::{DataEntry, GroupId, ItemId, OptionModel};
use picklist::Config;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize, bool),
    Range(usize, usize, bool),
    Group(usize, bool),
    SelectAll(bool),
    DeselectAll(bool),
    Filter(String),
    ClearFilter,
    Collapse(usize),
    Click(usize, bool),
}

fn option_strategy() -> impl Strategy<Value = DataEntry> {
    ("[abc]{1,3}", any::<bool>(), prop::bool::weighted(0.2)).prop_map(|(label, selected, disabled)| DataEntry {
        label: Some(label.clone()),
        value: Some(label),
        selected,
        disabled,
        children: None,
    })
}

fn entry_strategy() -> impl Strategy<Value = DataEntry> {
    prop_oneof![
        3 => option_strategy(),
        1 => (
            "[abc]{1,3}",
            prop::collection::vec(option_strategy(), 1..4),
            prop::bool::weighted(0.1),
        )
            .prop_map(|(label, children, disabled)| DataEntry {
                label: Some(label),
                disabled,
                children: Some(children),
                ..DataEntry::default()
            }),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), any::<bool>()).prop_map(|(i, c)| Op::Toggle(i, c)),
        (any::<usize>(), any::<usize>(), any::<bool>()).prop_map(|(a, b, c)| Op::Range(a, b, c)),
        (any::<usize>(), any::<bool>()).prop_map(|(i, c)| Op::Group(i, c)),
        any::<bool>().prop_map(Op::SelectAll),
        any::<bool>().prop_map(Op::DeselectAll),
        "[abc]{0,2}".prop_map(Op::Filter),
        Just(Op::ClearFilter),
        any::<usize>().prop_map(Op::Collapse),
        (any::<usize>(), any::<bool>()).prop_map(|(i, s)| Op::Click(i, s)),
    ]
}

fn control(multiple: bool, entries: &[DataEntry]) -> Multiselect {
    let config = Config {
        multiple,
        enable_filtering: true,
        enable_clickable_opt_groups: true,
        enable_collapsible_opt_groups: true,
        include_select_all_option: true,
        ..Config::default()
    };
    let model = OptionModel::from_data(entries).unwrap_or_else(|e| panic!("invalid model: {e}"));
    Multiselect::new(config, model).unwrap_or_else(|e| panic!("invalid control: {e}"))
}

fn item_mirror(select: &Multiselect, index: usize) -> picklist::mirror::MirrorId {
    let item = ItemId(index % select.model().item_count());
    select.item_mirror(item).unwrap_or_else(|| panic!("no mirror for {item}"))
}

fn apply(select: &mut Multiselect, op: &Op) -> Vec<Action> {
    match op {
        Op::Toggle(i, checked) => {
            let id = item_mirror(select, *i);
            select.toggle_item(id, *checked)
        }
        Op::Range(a, b, checked) => {
            let (from, to) = (item_mirror(select, *a), item_mirror(select, *b));
            select.toggle_range(from, to, *checked)
        }
        Op::Group(i, checked) => match select.model().group_count() {
            0 => vec![],
            n => select.toggle_group(GroupId(i % n), *checked),
        },
        Op::SelectAll(just_visible) => select.select_all(*just_visible, true),
        Op::DeselectAll(just_visible) => select.deselect_all(*just_visible, true),
        Op::Filter(query) => select.apply_filter(query),
        Op::ClearFilter => select.clear_filter(),
        Op::Collapse(i) => match select.model().group_count() {
            0 => vec![],
            n => select.toggle_group_collapse(GroupId(i % n)),
        },
        Op::Click(i, shift) => {
            let entries = select.mirrors().entries();
            let id = entries[i % entries.len()].id;
            handle_event(select, &Event::Click { id, shift: *shift }).unwrap_or_else(|e| panic!("click failed: {e}"))
        }
    }
}

fn check_invariants(select: &Multiselect, actions: &[Action]) -> Result<(), TestCaseError> {
    let model = select.model();

    prop_assert!(select.verify_structure().is_ok());
    prop_assert!(actions.iter().filter(|a| a.is_notification()).count() <= 1);

    if !select.mode().is_multiple() {
        prop_assert!(model.selected_items().count() <= 1);
    }

    for item in model.items() {
        let entry = select.mirrors().item_entry(item.id).unwrap();
        prop_assert_eq!(entry.checked, item.selected);
    }

    for group in model.groups() {
        let counted: Vec<ItemId> = group
            .item_ids
            .iter()
            .copied()
            .filter(|&id| select.is_eligible(id) && model.is_enabled(id))
            .collect();
        let expected = !counted.is_empty() && counted.iter().all(|&id| select.is_selected(id));
        let state = select.group_state(group.id).unwrap();
        prop_assert_eq!(state.is_checked(), expected);
    }

    let counted: Vec<ItemId> = model
        .items()
        .iter()
        .map(|item| item.id)
        .filter(|&id| select.is_eligible(id) && model.is_enabled(id))
        .collect();
    let expected = !counted.is_empty() && counted.iter().all(|&id| select.is_selected(id));
    prop_assert_eq!(select.is_select_all_checked(), expected);

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn invariants_hold_after_every_operation(
        multiple in any::<bool>(),
        entries in prop::collection::vec(entry_strategy(), 1..6),
        ops in prop::collection::vec(op_strategy(), 1..24),
    ) {
        let mut select = control(multiple, &entries);
        let initial = select.take_actions();
        check_invariants(&select, &initial)?;

        for op in &ops {
            let actions = apply(&mut select, op);
            check_invariants(&select, &actions)?;
        }
    }

    #[test]
    fn toggle_item_is_idempotent(
        multiple in any::<bool>(),
        entries in prop::collection::vec(entry_strategy(), 1..6),
        index in any::<usize>(),
        checked in any::<bool>(),
    ) {
        let mut select = control(multiple, &entries);
        let id = item_mirror(&select, index);

        select.toggle_item(id, checked);
        let once = select.view_model();
        select.toggle_item(id, checked);

        prop_assert_eq!(select.view_model(), once);
    }

    #[test]
    fn filtering_never_changes_selection(
        entries in prop::collection::vec(entry_strategy(), 1..6),
        queries in prop::collection::vec("[abc]{0,2}", 1..5),
    ) {
        let mut select = control(true, &entries);
        let before: Vec<bool> = select.model().items().iter().map(|item| item.selected).collect();

        for query in &queries {
            select.apply_filter(query);
        }
        select.clear_filter();

        let after: Vec<bool> = select.model().items().iter().map(|item| item.selected).collect();
        prop_assert_eq!(before, after);
        prop_assert!(select.model().items().iter().all(|item| select.is_eligible(item.id)));
    }
}
