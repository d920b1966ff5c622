mod catalog;
mod ids;
mod item;

pub use catalog::{CatalogPage, CatalogQuery, SortField, SortOrder};
pub use ids::ItemId;
pub use item::{ItemKind, PlayableItem};
