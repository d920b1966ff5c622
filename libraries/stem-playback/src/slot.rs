//! Global playback slot
//!
//! One `PlaybackSlot` exists per application session. It records what is
//! currently loaded for playback and which page's callbacks are active.
//! Whichever page registered most recently owns the slot (last writer
//! wins); registration hands back a generation token so a page that has
//! since been superseded can never have its closures invoked.

use crate::events::PlaybackEvent;
use stem_core::{ItemId, PlayableItem};
use tracing::debug;

/// A handler installed by a page
///
/// Handlers receive the slot itself so they can drive it re-entrantly:
/// a typical `on_next` resolves the next item against its page's list,
/// sets it as current, and requests play again.
pub type Handler = Box<dyn FnMut(&mut PlaybackSlot)>;

/// The callbacks a page installs on mount or update
///
/// Any handler may be omitted, meaning the capability is unavailable in
/// that page's context (a read-only library view omits next/previous;
/// anonymous and admin contexts omit play counting). Omission is
/// negotiation, not an error.
#[derive(Default)]
pub struct HandlerSet {
    /// Invoked when playback is requested
    pub on_play: Option<Handler>,

    /// Invoked when a pause is requested
    pub on_pause: Option<Handler>,

    /// Invoked when a stop is requested
    pub on_stop: Option<Handler>,

    /// Invoked on natural completion or explicit skip forward
    pub on_next: Option<Handler>,

    /// Invoked on explicit skip backward
    pub on_previous: Option<Handler>,

    /// Invoked when a playthrough should be counted
    pub on_increment_play_count: Option<Handler>,
}

impl HandlerSet {
    /// Create an empty handler set (every capability unavailable)
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an `on_play` handler
    pub fn on_play(mut self, handler: impl FnMut(&mut PlaybackSlot) + 'static) -> Self {
        self.on_play = Some(Box::new(handler));
        self
    }

    /// Install an `on_pause` handler
    pub fn on_pause(mut self, handler: impl FnMut(&mut PlaybackSlot) + 'static) -> Self {
        self.on_pause = Some(Box::new(handler));
        self
    }

    /// Install an `on_stop` handler
    pub fn on_stop(mut self, handler: impl FnMut(&mut PlaybackSlot) + 'static) -> Self {
        self.on_stop = Some(Box::new(handler));
        self
    }

    /// Install an `on_next` handler
    pub fn on_next(mut self, handler: impl FnMut(&mut PlaybackSlot) + 'static) -> Self {
        self.on_next = Some(Box::new(handler));
        self
    }

    /// Install an `on_previous` handler
    pub fn on_previous(mut self, handler: impl FnMut(&mut PlaybackSlot) + 'static) -> Self {
        self.on_previous = Some(Box::new(handler));
        self
    }

    /// Install an `on_increment_play_count` handler
    pub fn on_increment_play_count(
        mut self,
        handler: impl FnMut(&mut PlaybackSlot) + 'static,
    ) -> Self {
        self.on_increment_play_count = Some(Box::new(handler));
        self
    }
}

/// Proof of a registration
///
/// Tokens are compared against the slot's current generation before any
/// handler runs, so closures from an unmounted page are unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerToken {
    generation: u64,
}

/// The single process-wide record of what is loaded and who controls it
pub struct PlaybackSlot {
    current_item: Option<PlayableItem>,
    is_playing: bool,
    handlers: HandlerSet,
    generation: u64,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            current_item: None,
            is_playing: false,
            handlers: HandlerSet::new(),
            generation: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Handler registration =====

    /// Install a page's handlers, replacing whatever was there
    ///
    /// All six handler slots are overwritten unconditionally. The returned
    /// token identifies this registration; it goes stale the moment any
    /// later registration (or unregistration) happens.
    pub fn register_handlers(&mut self, handlers: HandlerSet) -> HandlerToken {
        self.generation += 1;
        self.handlers = handlers;
        debug!(generation = self.generation, "playback handlers registered");
        HandlerToken {
            generation: self.generation,
        }
    }

    /// Remove the handlers installed under `token`
    ///
    /// Called on page unmount. A stale token is ignored: the page that
    /// replaced this one keeps its handlers.
    pub fn unregister(&mut self, token: HandlerToken) {
        if !self.is_current(token) {
            debug!("ignoring unregister with stale handler token");
            return;
        }
        self.generation += 1;
        self.handlers = HandlerSet::new();
    }

    /// Check whether a token still owns the slot
    pub fn is_current(&self, token: HandlerToken) -> bool {
        token.generation == self.generation
    }

    /// Whether a forward-skip capability is installed (UI hides the next
    /// button otherwise)
    pub fn can_advance_next(&self) -> bool {
        self.handlers.on_next.is_some()
    }

    /// Whether a backward-skip capability is installed
    pub fn can_advance_previous(&self) -> bool {
        self.handlers.on_previous.is_some()
    }

    // ===== Current item =====

    /// Set the item loaded for playback; does not start playback
    pub fn set_current_item(&mut self, item: Option<PlayableItem>) {
        let previous_item_id = self.current_item.as_ref().map(|item| item.id.clone());
        let item_id = item.as_ref().map(|item| item.id.clone());

        if previous_item_id == item_id {
            self.current_item = item;
            return;
        }

        debug!(?item_id, ?previous_item_id, "current item changed");
        self.current_item = item;
        self.pending_events.push(PlaybackEvent::ItemChanged {
            item_id,
            previous_item_id,
        });
    }

    /// Get the currently loaded item
    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.current_item.as_ref()
    }

    /// Get the id of the currently loaded item
    pub fn current_item_id(&self) -> Option<ItemId> {
        self.current_item.as_ref().map(|item| item.id.clone())
    }

    /// Whether the slot requests playback
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    // ===== Transport requests =====

    /// Request playback
    ///
    /// Flips `is_playing` and invokes the installed `on_play` handler if
    /// any. Never errors; with nothing loaded the surfaces simply have
    /// nothing to mirror.
    pub fn request_play(&mut self) {
        self.is_playing = true;
        self.emit_state_changed();
        self.invoke(|handlers| &mut handlers.on_play);
    }

    /// Request a pause
    ///
    /// Not deduplicated: every call invokes `on_pause` again.
    pub fn request_pause(&mut self) {
        self.is_playing = false;
        self.emit_state_changed();
        self.invoke(|handlers| &mut handlers.on_pause);
    }

    /// Request a stop
    ///
    /// Behaviorally identical to pause at this layer; the current item is
    /// kept loaded. Only the surface distinguishes transport pause from
    /// unload.
    pub fn request_stop(&mut self) {
        self.is_playing = false;
        self.emit_state_changed();
        self.invoke(|handlers| &mut handlers.on_stop);
    }

    // ===== Navigation delegation =====

    /// Advance to the next item via the owning page
    ///
    /// Invoked by a playback surface on natural completion, or by the UI
    /// on explicit skip. No-op when the owning page installed no `on_next`.
    pub fn advance_to_next(&mut self) {
        self.invoke(|handlers| &mut handlers.on_next);
    }

    /// Go back to the previous item via the owning page
    pub fn advance_to_previous(&mut self) {
        self.invoke(|handlers| &mut handlers.on_previous);
    }

    /// Report an attributable playthrough to the owning page
    ///
    /// Fire-and-forget: with no `on_increment_play_count` installed
    /// (anonymous or admin context) counting is suppressed entirely.
    pub fn notify_play_count(&mut self) {
        if self.handlers.on_increment_play_count.is_none() {
            return;
        }
        if let Some(item_id) = self.current_item_id() {
            self.pending_events
                .push(PlaybackEvent::PlayCounted { item_id });
        }
        self.invoke(|handlers| &mut handlers.on_increment_play_count);
    }

    /// Run one handler re-entrantly
    ///
    /// The callback is taken out of the set, run against the slot, and put
    /// back only if no registration happened in between. A handler that
    /// re-registers (or whose page was replaced mid-call) therefore cannot
    /// be reinstalled over the new owner's set.
    fn invoke(&mut self, select: fn(&mut HandlerSet) -> &mut Option<Handler>) {
        let generation = self.generation;
        let Some(mut handler) = select(&mut self.handlers).take() else {
            return;
        };

        handler(self);

        if self.generation == generation {
            *select(&mut self.handlers) = Some(handler);
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// The UI calls this once per frame to synchronize with playback
    /// state.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    pub(crate) fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::StateChanged {
            playing: self.is_playing,
        });
    }
}

impl Default for PlaybackSlot {
    fn default() -> Self {
        Self::new()
    }
}
