//! Core types for playback coordination

use serde::{Deserialize, Serialize};

/// Configuration for the playback coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Fraction of the duration that must elapse before a playthrough
    /// is counted (default: 0.60)
    pub attribution_threshold: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            attribution_threshold: 0.60,
        }
    }
}
