//! Catalog collaborators
//!
//! The playback engine never talks HTTP itself; pages hand it items
//! fetched through `CatalogSource`, and attributed plays leave through
//! `PlayCountSink`.

use crate::error::Result;
use stem_core::{CatalogQuery, ItemId, PlayableItem};

/// Entity-fetch collaborator
///
/// Given a (search, sort, page) triple, returns an ordered list of
/// playable items. Backed by the marketplace REST API in the client.
pub trait CatalogSource {
    /// Fetch one page of items
    fn fetch(&mut self, query: &CatalogQuery) -> Result<Vec<PlayableItem>>;
}

/// Play-count persistence collaborator
///
/// Records one play for an item. Fire-and-forget: no return value is
/// consumed and failures are not observed by the playback engine.
pub trait PlayCountSink {
    /// Record a single play
    fn record_play(&self, item_id: &ItemId);
}
