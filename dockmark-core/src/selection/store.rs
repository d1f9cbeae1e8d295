use std::collections::{BTreeMap, BTreeSet};

use crate::category::Category;

use super::ItemId;

/// Per-category sets of selected identifiers.
///
/// Owned by the application and passed by reference to the controller and
/// the batch orchestrator. Empty sets are never stored.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    sets: BTreeMap<Category, BTreeSet<ItemId>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, category: Category, id: &ItemId) -> bool {
        self.sets
            .get(&category)
            .is_some_and(|set| set.contains(id))
    }

    /// Flip membership of `id`, returning whether it is now selected
    pub fn toggle(&mut self, category: Category, id: ItemId) -> bool {
        let set = self.sets.entry(category).or_default();
        let selected = if set.remove(&id) {
            false
        } else {
            set.insert(id);
            true
        };
        if set.is_empty() {
            self.sets.remove(&category);
        }
        selected
    }

    /// Add every id to the category's set
    pub fn select_many(&mut self, category: Category, ids: impl IntoIterator<Item = ItemId>) {
        let set = self.sets.entry(category).or_default();
        set.extend(ids);
        if set.is_empty() {
            self.sets.remove(&category);
        }
    }

    /// Reset one category to empty
    pub fn clear_category(&mut self, category: Category) {
        self.sets.remove(&category);
    }

    /// Reset every category to empty
    pub fn clear_everything(&mut self) {
        self.sets.clear();
    }

    pub fn count(&self, category: Category) -> usize {
        self.sets.get(&category).map_or(0, BTreeSet::len)
    }

    pub fn total_count(&self) -> usize {
        self.sets.values().map(BTreeSet::len).sum()
    }

    /// Nonzero counts in removal order
    pub fn per_category_counts(&self) -> Vec<(Category, usize)> {
        self.sets
            .iter()
            .map(|(category, set)| (*category, set.len()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn has_any_selection(&self) -> bool {
        self.total_count() > 0
    }

    /// Selected ids of one category
    pub fn selected(&self, category: Category) -> impl Iterator<Item = &ItemId> {
        self.sets.get(&category).into_iter().flatten()
    }

    /// Immutable copy for a batch run
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            entries: self
                .sets
                .iter()
                .map(|(category, set)| (*category, set.iter().cloned().collect()))
                .collect(),
        }
    }
}

/// Selection frozen at the moment a batch starts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    entries: Vec<(Category, Vec<ItemId>)>,
}

impl SelectionSnapshot {
    /// Categories with their ids, in removal order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ItemId])> {
        self.entries
            .iter()
            .map(|(category, ids)| (*category, ids.as_slice()))
    }

    pub fn ids(&self, category: Category) -> &[ItemId] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, ids)| ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn counts(&self) -> Vec<(Category, usize)> {
        self.entries
            .iter()
            .map(|(category, ids)| (*category, ids.len()))
            .collect()
    }
}
