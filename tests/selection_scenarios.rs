//! End-to-end selection scenarios driven through the public API.

use picklist::app::{dispatch, handle_event, Action, Event, Multiselect};
use picklist::domain::{DataEntry, GroupId, ItemId, OptionModel};
use picklist::engine::GroupState;
use picklist::notify::{Notification, RecordingListener};
use picklist::ui::RecordingRenderer;
use picklist::{Config, FilterBehavior};
use std::time::{Duration, Instant};

fn multiple() -> Config {
    Config {
        multiple: true,
        enable_filtering: true,
        include_select_all_option: true,
        enable_clickable_opt_groups: true,
        ..Config::default()
    }
}

fn flat(labels: &[&str]) -> OptionModel {
    let entries: Vec<DataEntry> = labels
        .iter()
        .map(|label| DataEntry::option(*label, label.to_lowercase()))
        .collect();
    OptionModel::from_data(&entries).unwrap()
}

fn control(config: Config, model: OptionModel) -> Multiselect {
    let mut select = Multiselect::new(config, model).unwrap();
    select.take_actions();
    select
}

fn mirror(select: &Multiselect, item: usize) -> picklist::mirror::MirrorId {
    select.item_mirror(ItemId(item)).unwrap()
}

#[test]
fn test_range_toggle_skips_filtered_entry() {
    let mut select = control(
        Config {
            filter_behavior: FilterBehavior::Value,
            ..multiple()
        },
        OptionModel::from_data(&[
            DataEntry::option("A", "keep-a"),
            DataEntry::option("B", "drop-b"),
            DataEntry::option("C", "keep-c"),
            DataEntry::option("D", "keep-d"),
        ])
        .unwrap(),
    );
    select.apply_filter("keep");
    assert!(!select.is_eligible(ItemId(1)));

    let (a, d) = (mirror(&select, 0), mirror(&select, 3));
    let actions = select.toggle_range(a, d, true);

    assert_eq!(select.selected_values(), vec!["keep-a", "keep-c", "keep-d"]);
    assert!(!select.is_selected(ItemId(1)));
    let notifications: Vec<_> = actions.iter().filter(|a| a.is_notification()).collect();
    assert_eq!(notifications.len(), 1);
}

#[test]
fn test_select_all_visible_then_clear_filter() {
    let mut select = control(
        Config {
            filter_behavior: FilterBehavior::Value,
            ..multiple()
        },
        OptionModel::from_data(&[
            DataEntry::option("One", "item"),
            DataEntry::option("Two", "item"),
            DataEntry::option("Three", "other"),
            DataEntry::option("Four", "item"),
            DataEntry::option("Five", "item"),
        ])
        .unwrap(),
    );

    select.apply_filter("item");
    assert!(!select.is_eligible(ItemId(2)));

    let all = select.select_all_mirror().unwrap();
    let actions = select.toggle_item(all, true);

    let selected: Vec<ItemId> = select
        .model()
        .selected_items()
        .map(|item| item.id)
        .collect();
    assert_eq!(selected, vec![ItemId(0), ItemId(1), ItemId(3), ItemId(4)]);
    assert!(select.is_select_all_checked());
    assert!(actions.contains(&Action::RenderSelectAllState { checked: true }));

    let actions = select.clear_filter();
    assert!(!select.is_select_all_checked());
    assert!(!select.is_selected(ItemId(2)));
    assert!(actions.contains(&Action::RenderSelectAllState { checked: false }));
}

#[test]
fn test_single_mode_exclusive_choice() {
    let model = OptionModel::from_data(&[
        DataEntry::option("X", "x").selected(),
        DataEntry::option("Y", "y"),
        DataEntry::option("Z", "z"),
    ])
    .unwrap();
    let mut select = control(Config::default(), model);

    let y = mirror(&select, 1);
    select.toggle_item(y, true);

    assert!(!select.is_selected(ItemId(0)));
    assert!(select.is_selected(ItemId(1)));
    assert!(!select.is_selected(ItemId(2)));
}

#[test]
fn test_group_aggregate_follows_members() {
    let model = OptionModel::from_data(&[DataEntry::group(
        "G",
        vec![DataEntry::option("M1", "m1").selected(), DataEntry::option("M2", "m2").selected()],
    )])
    .unwrap();
    let mut select = control(multiple(), model);
    assert_eq!(select.group_state(GroupId(0)), Some(GroupState::Checked));

    let m2 = mirror(&select, 1);
    let actions = select.toggle_item(m2, false);

    let state = select.group_state(GroupId(0)).unwrap();
    assert!(!state.is_checked());
    assert_eq!(state, GroupState::Mixed);
    assert!(actions.contains(&Action::RenderGroupState {
        group: GroupId(0),
        state: GroupState::Mixed
    }));
    assert_eq!(actions.iter().filter(|a| a.is_notification()).count(), 1);
}

#[test]
fn test_group_name_match_reveals_children() {
    let model = OptionModel::from_data(&[
        DataEntry::group("Fruit", vec![DataEntry::option("Apple", "a"), DataEntry::option("Pear", "p")]),
        DataEntry::group("Veg", vec![DataEntry::option("Leek", "l"), DataEntry::option("Kale", "k")]),
    ])
    .unwrap();
    let mut select = control(multiple(), model);

    select.apply_filter("Fruit");
    assert!(select.is_eligible(ItemId(0)));
    assert!(select.is_eligible(ItemId(1)));
    assert!(!select.is_eligible(ItemId(2)));

    select.apply_filter("Kale");
    let veg = select.mirrors().group_entry(GroupId(1)).unwrap();
    assert!(veg.eligible);
    assert!(!select.is_eligible(ItemId(2)));
    assert!(select.is_eligible(ItemId(3)));
}

#[test]
fn test_hidden_group_members_leave_aggregate() {
    let model = OptionModel::from_data(&[DataEntry::group(
        "G",
        vec![DataEntry::option("Red", "r").selected(), DataEntry::option("Blue", "b")],
    )])
    .unwrap();
    let mut select = control(multiple(), model);
    assert_eq!(select.group_state(GroupId(0)), Some(GroupState::Mixed));

    select.apply_filter("Red");
    assert_eq!(select.group_state(GroupId(0)), Some(GroupState::Checked));

    select.apply_filter("Nothing");
    assert_eq!(select.group_state(GroupId(0)), Some(GroupState::Unchecked));
    assert!(!select.is_select_all_checked());
}

#[test]
fn test_debounced_typing_through_events() {
    let mut select = control(multiple(), flat(&["Cheese", "Tomatoes", "Mozzarella"]));
    let start = Instant::now();

    for (i, query) in ["M", "Mo", "Moz"].iter().enumerate() {
        let at = start + Duration::from_millis(100 * i as u64);
        let actions = handle_event(
            &mut select,
            &Event::FilterInput {
                query: (*query).to_string(),
                at,
            },
        )
        .unwrap();
        assert!(actions.is_empty());
    }

    let early = handle_event(&mut select, &Event::Tick { now: start + Duration::from_millis(450) }).unwrap();
    assert!(early.is_empty());

    let actions = handle_event(&mut select, &Event::Tick { now: start + Duration::from_millis(500) }).unwrap();
    let filtering: Vec<_> = actions
        .iter()
        .filter(|a| matches!(a, Action::Notify(Notification::Filtering { .. })))
        .collect();
    assert_eq!(filtering.len(), 1);
    assert_eq!(select.query(), "Moz");
    assert!(select.is_eligible(ItemId(2)));
    assert!(!select.is_eligible(ItemId(0)));
}

#[test]
fn test_dispatch_delivers_one_event_per_action() {
    let model = OptionModel::from_data(&[DataEntry::group(
        "G",
        vec![DataEntry::option("M1", "m1"), DataEntry::option("M2", "m2")],
    )])
    .unwrap();
    let mut select = Multiselect::new(multiple(), model).unwrap();
    let mut renderer = RecordingRenderer::default();
    let mut listener = RecordingListener::default();
    dispatch(&select.take_actions(), &mut renderer, &mut listener);
    assert!(listener.received.is_empty());

    let group = select.mirrors().id_of_group(GroupId(0)).unwrap();
    let actions = handle_event(&mut select, &Event::Click { id: group, shift: false }).unwrap();
    dispatch(&actions, &mut renderer, &mut listener);

    assert_eq!(listener.received.len(), 1);
    assert!(matches!(
        &listener.received[0],
        Notification::Changed { items, checked: true } if items.len() == 2
    ));
    assert_eq!(renderer.last_checked(mirror(&select, 0)), Some(true));
    assert_eq!(renderer.last_checked(mirror(&select, 1)), Some(true));
    assert_eq!(renderer.last_button_text(), Some("All selected (2)"));
}

#[test]
fn test_data_provider_rebuild_invalidates_old_ids() {
    let mut select = control(multiple(), flat(&["A", "B"]));
    let stale = mirror(&select, 0);

    handle_event(
        &mut select,
        &Event::DataProvider(vec![
            DataEntry::option("C", "c"),
            DataEntry {
                children: Some(vec![DataEntry::option("D", "d").selected()]),
                ..DataEntry::default()
            },
        ]),
    )
    .unwrap();

    assert!(select.resolve(stale).is_none());
    assert!(handle_event(&mut select, &Event::Click { id: stale, shift: false })
        .unwrap()
        .is_empty());
    assert_eq!(select.model().groups()[0].label, "Group 1");
    assert_eq!(select.selected_values(), vec!["d"]);
    assert!(select.verify_structure().is_ok());
}

#[test]
fn test_json_data_provider() {
    let model = OptionModel::from_json(
        r#"[
            {"label": "Cheese", "value": "cheese", "selected": true},
            {"label": "Veg", "children": [
                {"label": "Onion", "value": "onion", "disabled": true},
                {"label": "Leek"}
            ]}
        ]"#,
    )
    .unwrap();
    let mut select = control(multiple(), model);

    select.select_all(false, false);

    assert_eq!(select.selected_values(), vec!["cheese", "Leek"]);
    assert!(select.is_select_all_checked());
}
