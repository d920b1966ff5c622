//! Media engine collaborator seam
//!
//! The real media engine is a third-party decoding library; this crate
//! only speaks to it through `MediaEngine` and builds one per loaded item
//! through `EngineFactory`. A playback surface owns at most one live
//! engine at a time and tears it down fully before building the next.

use crate::error::Result;
use std::time::Duration;

/// Events a media engine reports back to its surface
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The media resource is decoded and ready for transport commands
    Ready {
        /// Total duration as reported by the engine
        duration: Duration,
    },

    /// Loading or decoding failed; the engine is unusable
    Error(String),

    /// Playback reached the end of the resource
    Finished,

    /// Periodic elapsed-time tick while playing
    Progress {
        /// Elapsed time from the start of the resource
        elapsed: Duration,
    },
}

/// An in-flight media transport bound to one URL
///
/// Transport commands before the engine reports `Ready` are allowed and
/// ignored by implementations; the surface re-issues the current intent
/// once `Ready` arrives.
pub trait MediaEngine {
    /// Start or resume the transport
    fn play(&mut self);

    /// Pause the transport
    fn pause(&mut self);

    /// Take the events emitted since the last poll, in order
    fn poll_events(&mut self) -> Vec<EngineEvent>;

    /// Current transport position
    fn position(&self) -> Duration;
}

/// Builds a fresh engine for each item a surface binds
pub trait EngineFactory {
    /// Create an engine loading the given media URL
    ///
    /// The returned engine starts loading immediately and reports
    /// `EngineEvent::Ready` or `EngineEvent::Error` through `poll_events`.
    fn create(&mut self, media_url: &str) -> Result<Box<dyn MediaEngine>>;
}
