//! Playback events
//!
//! Event-based communication for UI synchronization. Events accumulate on
//! the playback slot and are drained by the UI loop each frame:
//! - Play/pause state flips
//! - Current item changes (row click, next/previous, natural completion)
//! - Waveform progress ticks
//! - Play-count attribution
//! - Non-fatal engine failures

use serde::{Deserialize, Serialize};
use stem_core::ItemId;

/// Events emitted by the playback system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// The playing/paused boolean flipped
    StateChanged {
        /// Whether the slot now requests playback
        playing: bool,
    },

    /// The loaded item changed (including to nothing)
    ItemChanged {
        /// ID of the new item, if any
        item_id: Option<ItemId>,
        /// ID of the previously loaded item, if any
        previous_item_id: Option<ItemId>,
    },

    /// An item played through to the end
    ItemFinished {
        /// ID of the finished item
        item_id: ItemId,
    },

    /// Progress tick while playing (drives the waveform cursor)
    ProgressUpdate {
        /// Elapsed time in milliseconds
        elapsed_ms: u64,
        /// Total duration in milliseconds
        duration_ms: u64,
    },

    /// A playthrough was attributed to the item's play counter
    PlayCounted {
        /// ID of the counted item
        item_id: ItemId,
    },

    /// Non-fatal engine failure; the surface stalls, no retry
    Error {
        /// Error message
        message: String,
    },
}
