//! Ordered playable list
//!
//! Every page that lists playable items (explore tracks, library, trending
//! samples, ...) owns one of these: an ordered collection plus a single
//! selection that next/previous navigation walks over.

use stem_core::{ItemId, PlayableItem};
use tracing::debug;

/// An ordered list of playable items with at most one selected
///
/// Invariant: `selected_index` is `None` (nothing selected) or a valid
/// index such that `ids[selected_index] == selected_id`.
///
/// Walking past either end clears the selection entirely rather than
/// wrapping or stopping at the boundary item.
#[derive(Debug, Clone, Default)]
pub struct OrderedPlayableList {
    /// Items in display order
    items: Vec<PlayableItem>,

    /// Parallel id ordering (rebuilt on every replace)
    ids: Vec<ItemId>,

    /// Currently selected id, if any
    selected_id: Option<ItemId>,

    /// Index of the selected id in `ids`, if any
    selected_index: Option<usize>,
}

impl OrderedPlayableList {
    /// Create a new empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire contents with a fresh fetch response
    ///
    /// The id ordering is rebuilt. If the previously selected id is still
    /// present its index is re-resolved (it may have moved); otherwise the
    /// selection is cleared.
    pub fn replace_all(&mut self, items: Vec<PlayableItem>) {
        self.ids = items.iter().map(|item| item.id.clone()).collect();
        self.items = items;

        match self.selected_id.take() {
            Some(id) => match self.position_of(&id) {
                Some(index) => {
                    self.selected_id = Some(id);
                    self.selected_index = Some(index);
                }
                None => {
                    debug!(item_id = %id, "selected item gone after refresh, clearing selection");
                    self.selected_index = None;
                }
            },
            None => self.selected_index = None,
        }
    }

    /// Select the item with the given id
    ///
    /// If the id is not present the selection is cleared.
    pub fn select_by_id(&mut self, id: &ItemId) {
        match self.position_of(id) {
            Some(index) => {
                self.selected_id = Some(id.clone());
                self.selected_index = Some(index);
            }
            None => self.clear_selection(),
        }
    }

    /// Move the selection forward
    ///
    /// No-op when nothing is selected. Moving past the last item clears
    /// the selection.
    pub fn select_next(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        if index + 1 < self.ids.len() {
            self.select_index(index + 1);
        } else {
            self.clear_selection();
        }
    }

    /// Move the selection backward
    ///
    /// No-op when nothing is selected. Moving before the first item clears
    /// the selection.
    pub fn select_previous(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        if index > 0 {
            self.select_index(index - 1);
        } else {
            self.clear_selection();
        }
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.selected_index = None;
    }

    fn select_index(&mut self, index: usize) {
        self.selected_id = Some(self.ids[index].clone());
        self.selected_index = Some(index);
    }

    /// Get the currently selected item
    pub fn selected_item(&self) -> Option<&PlayableItem> {
        self.selected_index.map(|index| &self.items[index])
    }

    /// Get the currently selected id
    pub fn selected_id(&self) -> Option<&ItemId> {
        self.selected_id.as_ref()
    }

    /// Get the index of the selection, if any
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Get the item at an index
    pub fn get(&self, index: usize) -> Option<&PlayableItem> {
        self.items.get(index)
    }

    /// Find the position of an id in the current ordering
    pub fn position_of(&self, id: &ItemId) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    /// All items in display order
    pub fn items(&self) -> &[PlayableItem] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
