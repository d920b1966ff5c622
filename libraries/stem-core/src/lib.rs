//! Stem Core
//!
//! Domain types shared across the Stem marketplace client.
//!
//! Stem is a marketplace where artists sell tracks, samples, and sample
//! packs. This crate defines the types every other crate speaks in:
//! playable catalog items, strongly-typed ids, and the paging/filter
//! request model used against the catalog backend.
//!
//! # Example
//!
//! ```rust
//! use stem_core::types::{CatalogQuery, ItemKind, PlayableItem};
//!
//! let item = PlayableItem::track("Midnight Run", "Vera Klein", "https://cdn.stem.example/t/1.mp3");
//! assert_eq!(item.kind, ItemKind::Track);
//!
//! let query = CatalogQuery::new().search("lofi").page(1, 25);
//! assert_eq!(query.page.offset(), 25);
//! ```

#![forbid(unsafe_code)]

pub mod types;

// Re-export commonly used types
pub use types::{
    CatalogPage, CatalogQuery, ItemId, ItemKind, PlayableItem, SortField, SortOrder,
};
