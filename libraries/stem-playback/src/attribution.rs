//! Play-count attribution
//!
//! A playthrough counts toward an item's play counter the first time
//! elapsed time crosses the configured fraction of its duration, at most
//! once per loaded session. The signal is best-effort analytics, never
//! billing-relevant: it is fired and forgotten.

use std::time::Duration;
use stem_core::ItemId;

/// Tracks whether the current playthrough has been counted
///
/// `begin` is called each time a surface starts loading a new item; the
/// counted flag is cleared only there, so seeking back and forth across
/// the threshold cannot double-count.
#[derive(Debug, Clone)]
pub struct PlayCountTracker {
    /// Fraction of the duration that must elapse (0.0 to 1.0)
    threshold: f32,

    /// Whether the current session has been counted
    counted: bool,

    /// Item the current session belongs to
    item_id: Option<ItemId>,
}

impl PlayCountTracker {
    /// Create a tracker with the given threshold
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            counted: false,
            item_id: None,
        }
    }

    /// Start a new session for an item
    pub fn begin(&mut self, item_id: ItemId) {
        self.counted = false;
        self.item_id = Some(item_id);
    }

    /// Feed a progress tick
    ///
    /// Returns true exactly once per session, the first time
    /// `elapsed / duration` reaches the threshold. Unknown or zero
    /// duration never fires.
    pub fn update(&mut self, elapsed: Duration, duration: Duration) -> bool {
        if self.counted || self.item_id.is_none() || duration.is_zero() {
            return false;
        }

        let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
        if progress >= self.threshold {
            self.counted = true;
            return true;
        }

        false
    }

    /// Clear the session entirely
    pub fn reset(&mut self) {
        self.counted = false;
        self.item_id = None;
    }

    /// Whether the current session has already been counted
    pub fn counted(&self) -> bool {
        self.counted
    }

    /// Item of the current session
    pub fn item_id(&self) -> Option<&ItemId> {
        self.item_id.as_ref()
    }
}
