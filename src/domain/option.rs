//! Option model: the canonical ordered list of selectable items and group headers.
//!
//! The model is owned by the caller and mutated by the engine only during a
//! user-driven action. Items are stored in document order; members of a group
//! are always contiguous and follow their group header, so group membership is
//! an explicit `group_id` foreign key rather than something inferred from
//! sibling order.

use super::error::{PicklistError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position-derived identity of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

/// Position-derived identity of a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub usize);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// A selectable option.
///
/// # Fields
///
/// - `id`: Identity, equal to the item's position in document order
/// - `label`: Display text used by text filtering and the button label
/// - `value`: Raw value used by value filtering and programmatic selection
/// - `enabled`: `false` freezes `selected` at its current value
/// - `selected`: Canonical selection flag
/// - `group_id`: Owning group, `None` for flat items
/// - `order`: Document order index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    pub value: String,
    pub enabled: bool,
    pub selected: bool,
    pub group_id: Option<GroupId>,
    pub order: usize,
}

/// A group header owning a contiguous, non-empty run of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub label: String,
    pub value: String,
    pub enabled: bool,
    pub item_ids: Vec<ItemId>,
}

/// One entry of data provider input.
///
/// An entry with `children` describes a group, any other entry a flat option.
/// A missing `value` defaults to the label, matching how a native option
/// without a value attribute reports its text.
///
/// # Example
///
/// ```
/// use picklist::domain::DataEntry;
///
/// let entries = vec![
///     DataEntry::option("Cheese", "cheese").selected(),
///     DataEntry::group("Vegetables", vec![
///         DataEntry::option("Tomatoes", "tomatoes"),
///         DataEntry::option("Onions", "onions").disabled(),
///     ]),
/// ];
/// assert!(entries[1].children.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataEntry {
    pub label: Option<String>,
    pub value: Option<String>,
    pub selected: bool,
    pub disabled: bool,
    pub children: Option<Vec<DataEntry>>,
}

impl DataEntry {
    /// Creates a flat option entry.
    #[must_use]
    pub fn option(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Creates a group entry with the given children.
    #[must_use]
    pub fn group(label: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            label: Some(label.into()),
            children: Some(children),
            ..Self::default()
        }
    }

    /// Marks the entry as initially selected.
    #[must_use]
    pub const fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Marks the entry as disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Selection flags keyed by item value, taken for reset-to-default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    by_value: HashMap<String, bool>,
}

impl SelectionSnapshot {
    /// Returns the remembered flag for `value`, `false` if it was never seen.
    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        self.by_value.get(value).copied().unwrap_or(false)
    }
}

/// The canonical ordered list of items and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionModel {
    items: Vec<Item>,
    groups: Vec<Group>,
}

impl OptionModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from data provider entries.
    ///
    /// Groups without a label are named `Group N`, counting groups from 1.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::InvalidModel`] for a group with no children.
    pub fn from_data(entries: &[DataEntry]) -> Result<Self> {
        let mut model = Self::new();
        for entry in entries {
            if let Some(children) = &entry.children {
                let label = entry
                    .label
                    .clone()
                    .unwrap_or_else(|| format!("Group {}", model.groups.len() + 1));
                let group = model.push_group(label, children)?;
                model.groups[group.0].enabled = !entry.disabled;
                if let Some(value) = &entry.value {
                    model.groups[group.0].value.clone_from(value);
                }
            } else {
                model.push_entry(entry, None);
            }
        }
        Ok(model)
    }

    /// Parses data provider entries from a JSON array and builds a model.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::Json`] on malformed input, or any error of
    /// [`OptionModel::from_data`].
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<DataEntry> = serde_json::from_str(json)?;
        Self::from_data(&entries)
    }

    /// Appends a flat, enabled, unselected item.
    pub fn push_item(&mut self, label: impl Into<String>, value: impl Into<String>) -> ItemId {
        self.push_entry(&DataEntry::option(label, value), None)
    }

    /// Appends a group header followed by its members.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::InvalidModel`] if `children` is empty or
    /// contains nested groups.
    pub fn push_group(&mut self, label: impl Into<String>, children: &[DataEntry]) -> Result<GroupId> {
        let label = label.into();
        if children.is_empty() {
            return Err(PicklistError::InvalidModel(format!("group `{label}` has no items")));
        }
        if children.iter().any(|c| c.children.is_some()) {
            return Err(PicklistError::InvalidModel(format!("group `{label}` contains a nested group")));
        }

        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            id,
            label,
            value: String::new(),
            enabled: true,
            item_ids: Vec::with_capacity(children.len()),
        });
        for child in children {
            let item = self.push_entry(child, Some(id));
            self.groups[id.0].item_ids.push(item);
        }
        Ok(id)
    }

    fn push_entry(&mut self, entry: &DataEntry, group_id: Option<GroupId>) -> ItemId {
        let id = ItemId(self.items.len());
        let label = entry
            .label
            .clone()
            .or_else(|| entry.value.clone())
            .unwrap_or_default();
        let value = entry.value.clone().unwrap_or_else(|| label.clone());
        self.items.push(Item {
            id,
            label,
            value,
            enabled: !entry.disabled,
            selected: entry.selected,
            group_id,
            order: id.0,
        });
        id
    }

    /// All items in document order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All groups in document order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.0)
    }

    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(id.0)
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item can currently change its selection.
    ///
    /// An item inside a disabled group is disabled as well.
    #[must_use]
    pub fn is_enabled(&self, id: ItemId) -> bool {
        self.item(id).is_some_and(|item| {
            item.enabled
                && item
                    .group_id
                    .and_then(|g| self.group(g))
                    .map_or(true, |group| group.enabled)
        })
    }

    /// Selected items in document order.
    pub fn selected_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.selected)
    }

    /// Ids of every item carrying `value`.
    pub fn ids_with_value<'a>(&'a self, value: &'a str) -> impl Iterator<Item = ItemId> + 'a {
        self.items
            .iter()
            .filter(move |item| item.value == value)
            .map(|item| item.id)
    }

    /// Captures every item's selection keyed by value.
    #[must_use]
    pub fn snapshot_selection(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            by_value: self
                .items
                .iter()
                .map(|item| (item.value.clone(), item.selected))
                .collect(),
        }
    }

    /// Restores selection from a snapshot, deselecting values it never saw.
    pub fn restore_selection(&mut self, snapshot: &SelectionSnapshot) {
        for item in &mut self.items {
            item.selected = snapshot.is_selected(&item.value);
        }
    }
}
