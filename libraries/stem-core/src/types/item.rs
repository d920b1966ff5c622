/// Playable item domain type
use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The two playable variants sold on the marketplace
///
/// Each physical player surface in the client binds to exactly one kind:
/// the waveform player renders tracks, the inline player renders samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Full track with waveform preview
    Track,

    /// Sample or loop with inline preview
    Sample,
}

/// A track or sample record with a playable media URL
///
/// Created when a catalog list-fetch response is deserialized; replaced
/// wholesale when the owning list is re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayableItem {
    /// Unique item identifier (server-owned)
    pub id: ItemId,

    /// Track or sample
    #[serde(default = "default_kind")]
    pub kind: ItemKind,

    /// Display title (samples come down the wire as `name`)
    #[serde(alias = "name")]
    pub title: String,

    /// Artist display name
    pub artist_name: String,

    /// Cover artwork URL
    #[serde(default)]
    pub artwork_url: Option<String>,

    /// Media resource locator for preview playback
    #[serde(alias = "url")]
    pub media_url: String,

    /// Duration in milliseconds; unknown until the media engine reports it
    #[serde(default)]
    pub duration_ms: Option<u64>,

    /// Server-owned monotonically increasing play counter
    #[serde(default)]
    pub play_count: u64,
}

fn default_kind() -> ItemKind {
    ItemKind::Track
}

impl PlayableItem {
    /// Create a track with minimal metadata
    pub fn track(
        title: impl Into<String>,
        artist_name: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self::new(ItemKind::Track, title, artist_name, media_url)
    }

    /// Create a sample with minimal metadata
    pub fn sample(
        title: impl Into<String>,
        artist_name: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self::new(ItemKind::Sample, title, artist_name, media_url)
    }

    fn new(
        kind: ItemKind,
        title: impl Into<String>,
        artist_name: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::generate(),
            kind,
            title: title.into(),
            artist_name: artist_name.into(),
            artwork_url: None,
            media_url: media_url.into(),
            duration_ms: None,
            play_count: 0,
        }
    }

    /// Builder-style id override (catalog responses carry server ids)
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder-style play count override
    pub fn with_play_count(mut self, count: u64) -> Self {
        self.play_count = count;
        self
    }

    /// Get the item duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Set the item duration from a Duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_ms = Some(duration.as_millis() as u64);
    }
}
