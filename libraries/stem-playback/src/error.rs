//! Error types for playback coordination
//!
//! Failure is rare by design: absent handlers and missing items are silent
//! no-ops, so errors only come out of the injected collaborators.

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Media engine failed to load or decode
    #[error("Media engine error: {0}")]
    Engine(String),

    /// Catalog fetch failed
    #[error("Catalog error: {0}")]
    Catalog(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
