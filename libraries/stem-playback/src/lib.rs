//! Stem Player - Playback Coordination
//!
//! UI-framework-agnostic playback coordination for the Stem marketplace
//! client.
//!
//! This crate provides:
//! - Ordered playable lists with single-selection next/previous navigation
//! - The global playback slot (one per session) with last-writer-wins
//!   handler registration and generation tokens
//! - Playback surface sessions (one per physical player: track waveform,
//!   inline sample) as an explicit state machine
//! - Play-count attribution at 60% of duration, once per playthrough
//! - Collaborator traits for the catalog backend and the media engine
//!
//! # Architecture
//!
//! `stem-playback` is completely UI-agnostic: no dependency on the
//! rendering layer, the HTTP client, or the media decoding library. Pages
//! inject those through `CatalogSource`, `PlayCountSink`, and
//! `EngineFactory`; the UI loop drives the engine by calling
//! `PlaybackSurface::sync` and `PlaybackSurface::pump` each frame and
//! draining `PlaybackSlot` events.
//!
//! All coordination runs on the single UI event loop; the slot and the
//! surfaces are not `Send` and are meant to live in the UI thread for the
//! whole session.
//!
//! # Example: a page driving the slot
//!
//! ```rust
//! use stem_core::{ItemId, PlayableItem};
//! use stem_playback::{PageController, PlaybackSlot};
//!
//! let mut slot = PlaybackSlot::new();
//! let mut page = PageController::new();
//! page.install(&mut slot);
//!
//! // Fetch response arrives.
//! page.set_items(
//!     vec![
//!         PlayableItem::track("Glasswork", "Mira Voss", "https://cdn/t1.mp3").with_id("trk_1"),
//!         PlayableItem::track("Undertow", "Mira Voss", "https://cdn/t2.mp3").with_id("trk_2"),
//!     ],
//!     &mut slot,
//! );
//!
//! // User clicks the first row.
//! page.play_item_by_id(&ItemId::new("trk_1"), &mut slot);
//! assert!(slot.is_playing());
//!
//! // Natural completion (reported by the playback surface) moves on.
//! slot.advance_to_next();
//! assert_eq!(slot.current_item_id(), Some(ItemId::new("trk_2")));
//! ```

#![forbid(unsafe_code)]

mod attribution;
mod catalog;
mod controller;
mod engine;
mod error;
mod events;
mod list;
mod slot;
mod surface;
pub mod types;

// Public exports
pub use attribution::PlayCountTracker;
pub use catalog::{CatalogSource, PlayCountSink};
pub use controller::PageController;
pub use engine::{EngineEvent, EngineFactory, MediaEngine};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use list::OrderedPlayableList;
pub use slot::{Handler, HandlerSet, HandlerToken, PlaybackSlot};
pub use surface::{transition, PlaybackSurface, SurfaceEffect, SurfaceEvent, SurfaceState};
pub use types::PlaybackConfig;

// Re-export the core types this crate speaks in
pub use stem_core::{CatalogQuery, ItemId, ItemKind, PlayableItem};
