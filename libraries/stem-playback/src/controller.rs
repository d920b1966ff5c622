//! Page-level wiring
//!
//! Each page that lists playable items owns a `PageController`: it holds
//! the page's ordered list, registers the page as the source of truth for
//! next/previous/play-count on mount, re-registers on update, and pushes
//! row clicks into the playback slot.

use crate::catalog::{CatalogSource, PlayCountSink};
use crate::error::Result;
use crate::list::OrderedPlayableList;
use crate::slot::{HandlerSet, HandlerToken, PlaybackSlot};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use stem_core::{CatalogQuery, ItemId, PlayableItem};

/// Controller for one playable-item page
///
/// Read-only contexts (admin management views, anonymous embeds) can
/// withhold navigation or play counting; the slot treats the missing
/// handlers as capability negotiation, and the UI hides the matching
/// controls.
pub struct PageController {
    list: Rc<RefCell<OrderedPlayableList>>,
    token: Option<HandlerToken>,
    navigation: bool,
    sink: Option<Rc<dyn PlayCountSink>>,
}

impl PageController {
    /// Create a controller with full capabilities except counting
    pub fn new() -> Self {
        Self {
            list: Rc::new(RefCell::new(OrderedPlayableList::new())),
            token: None,
            navigation: true,
            sink: None,
        }
    }

    /// Create a controller with no next/previous capability
    pub fn read_only() -> Self {
        Self {
            navigation: false,
            ..Self::new()
        }
    }

    /// Attach a play-count sink (absent in anonymous/admin contexts)
    pub fn with_play_counts(mut self, sink: Rc<dyn PlayCountSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Register this page's handlers, taking ownership of the slot
    ///
    /// Called on mount. Overwrites whatever page registered before; pages
    /// also call this again on update, which is why registration is
    /// unconditional.
    pub fn install(&mut self, slot: &mut PlaybackSlot) {
        let mut handlers = HandlerSet::new();

        if self.navigation {
            let list = Rc::clone(&self.list);
            handlers = handlers.on_next(move |slot: &mut PlaybackSlot| {
                let item = {
                    let mut list = list.borrow_mut();
                    list.select_next();
                    list.selected_item().cloned()
                };
                push_selection(slot, item);
            });

            let list = Rc::clone(&self.list);
            handlers = handlers.on_previous(move |slot: &mut PlaybackSlot| {
                let item = {
                    let mut list = list.borrow_mut();
                    list.select_previous();
                    list.selected_item().cloned()
                };
                push_selection(slot, item);
            });
        }

        if let Some(sink) = self.sink.clone() {
            handlers = handlers.on_increment_play_count(move |slot: &mut PlaybackSlot| {
                if let Some(item_id) = slot.current_item_id() {
                    sink.record_play(&item_id);
                }
            });
        }

        self.token = Some(slot.register_handlers(handlers));
    }

    /// Replace the page's items from a fresh fetch response
    ///
    /// Re-registers the handlers, as a page update effect would.
    pub fn set_items(&mut self, items: Vec<PlayableItem>, slot: &mut PlaybackSlot) {
        self.list.borrow_mut().replace_all(items);
        self.install(slot);
    }

    /// Fetch a page of items from the catalog and install them
    pub fn refresh(
        &mut self,
        source: &mut dyn CatalogSource,
        query: &CatalogQuery,
        slot: &mut PlaybackSlot,
    ) -> Result<()> {
        let items = source.fetch(query)?;
        self.set_items(items, slot);
        Ok(())
    }

    /// Row click: select an item and start playing it
    ///
    /// An unknown id clears the selection and stops, mirroring list
    /// semantics; nothing is raised.
    pub fn play_item_by_id(&mut self, id: &ItemId, slot: &mut PlaybackSlot) {
        let item = {
            let mut list = self.list.borrow_mut();
            list.select_by_id(id);
            list.selected_item().cloned()
        };
        push_selection(slot, item);
    }

    /// Unregister on unmount
    ///
    /// With a stale token (another page took over already) this is a
    /// no-op.
    pub fn unmount(&mut self, slot: &mut PlaybackSlot) {
        if let Some(token) = self.token.take() {
            slot.unregister(token);
        }
    }

    /// Whether this page still owns the slot
    pub fn owns_slot(&self, slot: &PlaybackSlot) -> bool {
        self.token.is_some_and(|token| slot.is_current(token))
    }

    /// Read access to the page's list
    pub fn list(&self) -> Ref<'_, OrderedPlayableList> {
        self.list.borrow()
    }
}

impl Default for PageController {
    fn default() -> Self {
        Self::new()
    }
}

/// Push a selection change into the slot
///
/// A real item starts playback; an exhausted selection (walked off either
/// end of the list) unloads and stops.
fn push_selection(slot: &mut PlaybackSlot, item: Option<PlayableItem>) {
    match item {
        Some(item) => {
            slot.set_current_item(Some(item));
            slot.request_play();
        }
        None => {
            slot.set_current_item(None);
            slot.request_stop();
        }
    }
}
