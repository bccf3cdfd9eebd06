use crate::domain::{GroupId, ItemId, OptionModel, PicklistError, Result};

/// Identifier of a checkable UI entry, scoped to one build generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MirrorId {
    generation: u32,
    index: u32,
}

impl MirrorId {
    /// Build generation that allocated this id.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for MirrorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "picklist-{}-{}", self.generation, self.index)
    }
}

/// What a mirror entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// The synthetic select-all entry. Never a normal item.
    SelectAll,
    /// A group header.
    Group(GroupId),
    /// A selectable item.
    Item(ItemId),
}

/// The UI-facing counterpart of an item, a group or the select-all entry.
///
/// After every settle point `checked` equals the item's `selected` flag (item
/// entries), the group aggregate (group entries) or the global aggregate
/// (select-all entry). `eligible` is owned by the visibility filter and is
/// orthogonal to `checked`; `collapsed` is purely visual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry {
    pub id: MirrorId,
    pub kind: EntryKind,
    pub checked: bool,
    pub eligible: bool,
    pub collapsed: bool,
}

impl MirrorEntry {
    /// Whether the entry is currently not shown.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        !self.eligible || self.collapsed
    }
}

/// Ordered set of mirror entries for one build pass.
#[derive(Debug, Clone, Default)]
pub struct MirrorSet {
    generation: u32,
    entries: Vec<MirrorEntry>,
    by_item: Vec<usize>,
    by_group: Vec<usize>,
    select_all: Option<usize>,
}

impl MirrorSet {
    /// Builds the first generation of mirrors for `model`.
    ///
    /// The select-all entry, when included, comes first; items and group
    /// headers follow in document order with each header directly before its
    /// members. Entries start unchecked and eligible; checked state is seeded
    /// from the model on first synchronization.
    #[must_use]
    pub fn build(model: &OptionModel, include_select_all: bool) -> Self {
        Self::build_generation(model, include_select_all, 0)
    }

    /// Builds a fresh set for `model`, invalidating every id of `self`.
    #[must_use]
    pub fn rebuild(&self, model: &OptionModel, include_select_all: bool) -> Self {
        Self::build_generation(model, include_select_all, self.generation.wrapping_add(1))
    }

    fn build_generation(model: &OptionModel, include_select_all: bool, generation: u32) -> Self {
        let mut set = Self {
            generation,
            entries: Vec::with_capacity(model.item_count() + model.group_count() + 1),
            by_item: Vec::with_capacity(model.item_count()),
            by_group: Vec::with_capacity(model.group_count()),
            select_all: None,
        };

        if include_select_all {
            set.select_all = Some(set.push(EntryKind::SelectAll));
        }

        let mut current_group = None;
        for item in model.items() {
            if item.group_id.is_some() && item.group_id != current_group {
                if let Some(group) = item.group_id {
                    let index = set.push(EntryKind::Group(group));
                    set.by_group.push(index);
                }
            }
            current_group = item.group_id;
            let index = set.push(EntryKind::Item(item.id));
            set.by_item.push(index);
        }

        tracing::debug!(
            generation,
            entries = set.entries.len(),
            items = set.by_item.len(),
            groups = set.by_group.len(),
            "mirror set built"
        );

        set
    }

    fn push(&mut self, kind: EntryKind) -> usize {
        let index = self.entries.len();
        self.entries.push(MirrorEntry {
            id: MirrorId {
                generation: self.generation,
                index: u32::try_from(index).unwrap_or(u32::MAX),
            },
            kind,
            checked: false,
            eligible: true,
            collapsed: false,
        });
        index
    }

    /// Checks that the set covers exactly the entities of `model`.
    ///
    /// # Errors
    ///
    /// Returns [`PicklistError::StructuralMismatch`] when the number of item or
    /// group mirrors differs from the model.
    pub fn verify(&self, model: &OptionModel) -> Result<()> {
        let expected = model.item_count() + model.group_count() + usize::from(self.select_all.is_some());
        let consistent = self.by_item.len() == model.item_count()
            && self.by_group.len() == model.group_count()
            && self.entries.len() == expected;
        if consistent {
            Ok(())
        } else {
            Err(PicklistError::StructuralMismatch {
                mirrors: self.entries.len(),
                expected,
            })
        }
    }

    /// Resolves an id back to the entity it mirrors.
    ///
    /// Returns `None` for ids of another generation or out of range.
    #[must_use]
    pub fn resolve(&self, id: MirrorId) -> Option<EntryKind> {
        self.entry(id).map(|entry| entry.kind)
    }

    #[must_use]
    pub fn entry(&self, id: MirrorId) -> Option<&MirrorEntry> {
        if id.generation != self.generation {
            return None;
        }
        self.entries.get(id.index as usize)
    }

    /// All entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[MirrorEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn item_entry(&self, item: ItemId) -> Option<&MirrorEntry> {
        self.by_item.get(item.0).map(|&i| &self.entries[i])
    }

    pub fn item_entry_mut(&mut self, item: ItemId) -> Option<&mut MirrorEntry> {
        self.by_item.get(item.0).map(|&i| &mut self.entries[i])
    }

    #[must_use]
    pub fn group_entry(&self, group: GroupId) -> Option<&MirrorEntry> {
        self.by_group.get(group.0).map(|&i| &self.entries[i])
    }

    pub fn group_entry_mut(&mut self, group: GroupId) -> Option<&mut MirrorEntry> {
        self.by_group.get(group.0).map(|&i| &mut self.entries[i])
    }

    #[must_use]
    pub fn select_all_entry(&self) -> Option<&MirrorEntry> {
        self.select_all.map(|i| &self.entries[i])
    }

    pub fn select_all_entry_mut(&mut self) -> Option<&mut MirrorEntry> {
        self.select_all.map(|i| &mut self.entries[i])
    }

    #[must_use]
    pub fn has_select_all(&self) -> bool {
        self.select_all.is_some()
    }

    #[must_use]
    pub fn id_of_item(&self, item: ItemId) -> Option<MirrorId> {
        self.item_entry(item).map(|entry| entry.id)
    }

    #[must_use]
    pub fn id_of_group(&self, group: GroupId) -> Option<MirrorId> {
        self.group_entry(group).map(|entry| entry.id)
    }

    /// Whether the item's mirror is currently eligible. Unknown items are not.
    #[must_use]
    pub fn is_item_eligible(&self, item: ItemId) -> bool {
        self.item_entry(item).is_some_and(|entry| entry.eligible)
    }

    /// Eligible items in document order.
    pub fn eligible_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.by_item.iter().filter_map(|&i| {
            let entry = &self.entries[i];
            match entry.kind {
                EntryKind::Item(item) if entry.eligible => Some(item),
                _ => None,
            }
        })
    }

    /// Item and group entries, i.e. everything the filter can hide.
    pub fn filterable_entries_mut(&mut self) -> impl Iterator<Item = &mut MirrorEntry> {
        self.entries
            .iter_mut()
            .filter(|entry| !matches!(entry.kind, EntryKind::SelectAll))
    }
}
