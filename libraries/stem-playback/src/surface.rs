//! Playback surface session
//!
//! One `PlaybackSurface` exists per physical player in the client: the
//! track waveform player and the inline sample player. A surface owns the
//! real media transport for exactly one loaded item at a time, mirrors the
//! slot's playing boolean into transport calls, and reports completion and
//! progress back into the slot.
//!
//! The session is an explicit state machine; `transition` is a pure
//! function over (state, event) so the transition table is testable
//! without an engine.

use crate::attribution::PlayCountTracker;
use crate::engine::{EngineEvent, EngineFactory, MediaEngine};
use crate::events::PlaybackEvent;
use crate::slot::PlaybackSlot;
use crate::types::PlaybackConfig;
use std::time::Duration;
use stem_core::{ItemKind, PlayableItem};
use tracing::{debug, warn};

/// Session states of a playback surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// Nothing bound
    Idle,

    /// Engine is acquiring the media resource
    Loading,

    /// Resource decoded, transport idle
    Ready,

    /// Transport running
    Playing,

    /// Transport paused mid-item
    Paused,

    /// Playback reached the end of the item
    Ended,

    /// Load or decode failed; surface stalls here until rebound
    Error,
}

/// Inputs to the session state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A new item was bound to this surface
    Bind,

    /// The bound item went away (cleared, or claimed by the other player)
    Unbind,

    /// Engine reported the resource ready
    EngineReady,

    /// Engine reported a load/decode failure
    EngineError,

    /// Engine reached the end of the resource
    EngineFinished,

    /// The slot's playing boolean flipped
    PlayingChanged(bool),
}

/// Side effects a transition asks the surface to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEffect {
    /// Release the current engine and all session state
    TearDownEngine,

    /// Build a fresh engine for the bound item
    BuildEngine,

    /// Issue a transport play
    TransportPlay,

    /// Issue a transport pause
    TransportPause,

    /// Hand control to the owning page's next handler
    AdvanceNext,
}

/// The session transition table
///
/// Unmatched (state, event) pairs keep the state with no effects; in
/// particular transport intent arriving during `Loading` is dropped and
/// re-mirrored once the engine reports ready.
pub fn transition(state: SurfaceState, event: &SurfaceEvent) -> (SurfaceState, Vec<SurfaceEffect>) {
    use SurfaceEffect::{AdvanceNext, BuildEngine, TearDownEngine, TransportPause, TransportPlay};
    use SurfaceEvent::{Bind, EngineError, EngineFinished, EngineReady, PlayingChanged, Unbind};
    use SurfaceState::{Ended, Error, Idle, Loading, Paused, Playing, Ready};

    match (state, event) {
        // Binding always tears down first: no two engines may be live
        // concurrently for one physical player. This is also what cancels
        // an in-flight load when the user skips again before it resolves.
        (Idle, Bind) => (Loading, vec![BuildEngine]),
        (_, Bind) => (Loading, vec![TearDownEngine, BuildEngine]),

        (Idle, Unbind) => (Idle, vec![]),
        (_, Unbind) => (Idle, vec![TearDownEngine]),

        (Loading, EngineReady) => (Ready, vec![]),
        (Loading | Ready, EngineError) => (Error, vec![TearDownEngine]),

        (Ready | Paused, PlayingChanged(true)) => (Playing, vec![TransportPlay]),
        (Playing, PlayingChanged(false)) => (Paused, vec![TransportPause]),

        // Natural completion hands control to the owning page; a later
        // explicit play while Ended is a replay of the same item.
        (Ready | Playing, EngineFinished) => (Ended, vec![AdvanceNext]),
        (Ended, PlayingChanged(true)) => (Loading, vec![TearDownEngine, BuildEngine]),

        (state, _) => (state, vec![]),
    }
}

/// A physical player instance bound to one item kind
pub struct PlaybackSurface {
    kind: ItemKind,
    state: SurfaceState,
    bound: Option<PlayableItem>,
    engine: Option<Box<dyn MediaEngine>>,
    factory: Box<dyn EngineFactory>,
    duration: Option<Duration>,
    elapsed: Duration,
    attribution: PlayCountTracker,
}

impl PlaybackSurface {
    /// Create a surface for one player kind
    pub fn new(kind: ItemKind, factory: Box<dyn EngineFactory>, config: &PlaybackConfig) -> Self {
        Self {
            kind,
            state: SurfaceState::Idle,
            bound: None,
            engine: None,
            factory,
            duration: None,
            elapsed: Duration::ZERO,
            attribution: PlayCountTracker::new(config.attribution_threshold),
        }
    }

    /// Reconcile against the slot
    ///
    /// Called by the UI loop after commands have run: binds or unbinds when
    /// the bound item's identity or media URL changes, then mirrors the
    /// slot's playing boolean into the transport. Mirroring is
    /// one-directional slot-to-engine here; engine-to-slot flows through
    /// `pump`.
    pub fn sync(&mut self, slot: &mut PlaybackSlot) {
        let target = slot
            .current_item()
            .filter(|item| item.kind == self.kind)
            .cloned();

        // A re-fetch can deliver the same id with a rotated (re-signed)
        // media URL; the engine is bound to the URL, so that is a rebind
        // too.
        let rebind = match (target.as_ref(), self.bound.as_ref()) {
            (Some(target), Some(bound)) => {
                target.id != bound.id || target.media_url != bound.media_url
            }
            (target, bound) => target.is_some() != bound.is_some(),
        };

        if rebind {
            match target {
                Some(item) => {
                    self.bound = Some(item);
                    self.dispatch(&SurfaceEvent::Bind, slot);
                }
                None => {
                    self.bound = None;
                    self.dispatch(&SurfaceEvent::Unbind, slot);
                }
            }
        }

        self.mirror(slot);
    }

    /// Drain and process pending engine events
    ///
    /// The UI loop calls this each frame, after `sync`.
    pub fn pump(&mut self, slot: &mut PlaybackSlot) {
        let events = match self.engine.as_mut() {
            Some(engine) => engine.poll_events(),
            None => return,
        };

        for event in events {
            self.handle_engine_event(event, slot);
        }
    }

    /// Process one engine event
    pub fn handle_engine_event(&mut self, event: EngineEvent, slot: &mut PlaybackSlot) {
        match event {
            EngineEvent::Ready { duration } => {
                self.duration = Some(duration);
                if let Some(item) = self.bound.as_mut() {
                    item.set_duration(duration);
                }
                self.dispatch(&SurfaceEvent::EngineReady, slot);
                // The load resolved; re-mirror whatever the slot wants now,
                // not the intent captured when loading began.
                self.mirror(slot);
            }
            EngineEvent::Error(message) => {
                warn!(kind = ?self.kind, %message, "media engine error");
                slot.emit(PlaybackEvent::Error { message });
                self.dispatch(&SurfaceEvent::EngineError, slot);
            }
            EngineEvent::Finished => {
                if let Some(item) = self.bound.as_ref() {
                    slot.emit(PlaybackEvent::ItemFinished {
                        item_id: item.id.clone(),
                    });
                }
                self.dispatch(&SurfaceEvent::EngineFinished, slot);
            }
            EngineEvent::Progress { elapsed } => {
                self.handle_progress(elapsed, slot);
            }
        }
    }

    fn handle_progress(&mut self, elapsed: Duration, slot: &mut PlaybackSlot) {
        if self.state != SurfaceState::Playing {
            return;
        }
        self.elapsed = elapsed;

        let Some(duration) = self.duration else {
            return;
        };

        slot.emit(PlaybackEvent::ProgressUpdate {
            elapsed_ms: elapsed.as_millis() as u64,
            duration_ms: duration.as_millis() as u64,
        });

        if self.attribution.update(elapsed, duration) {
            slot.notify_play_count();
        }
    }

    fn mirror(&mut self, slot: &mut PlaybackSlot) {
        let desired = slot.is_playing();
        match self.state {
            SurfaceState::Ready | SurfaceState::Paused | SurfaceState::Ended if desired => {
                self.dispatch(&SurfaceEvent::PlayingChanged(true), slot);
            }
            SurfaceState::Playing if !desired => {
                self.dispatch(&SurfaceEvent::PlayingChanged(false), slot);
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, event: &SurfaceEvent, slot: &mut PlaybackSlot) {
        let (next, effects) = transition(self.state, event);
        debug!(kind = ?self.kind, from = ?self.state, to = ?next, ?event, "surface transition");
        self.state = next;

        for effect in effects {
            self.apply_effect(&effect, slot);
        }
    }

    fn apply_effect(&mut self, effect: &SurfaceEffect, slot: &mut PlaybackSlot) {
        match effect {
            SurfaceEffect::TearDownEngine => {
                self.engine = None;
                self.duration = None;
                self.elapsed = Duration::ZERO;
                self.attribution.reset();
            }
            SurfaceEffect::BuildEngine => {
                let Some(item) = self.bound.clone() else {
                    self.state = SurfaceState::Idle;
                    return;
                };
                match self.factory.create(&item.media_url) {
                    Ok(engine) => {
                        self.engine = Some(engine);
                        self.attribution.begin(item.id);
                    }
                    Err(error) => {
                        warn!(item_id = %item.id, %error, "engine construction failed");
                        slot.emit(PlaybackEvent::Error {
                            message: error.to_string(),
                        });
                        self.state = SurfaceState::Error;
                    }
                }
            }
            SurfaceEffect::TransportPlay => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.play();
                }
            }
            SurfaceEffect::TransportPause => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.pause();
                }
            }
            SurfaceEffect::AdvanceNext => {
                if slot.can_advance_next() {
                    slot.advance_to_next();
                } else {
                    // No page owns navigation: completion drops the play
                    // intent so the finished item does not loop.
                    slot.request_stop();
                }
            }
        }
    }

    // ===== State queries =====

    /// Player kind this surface renders
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Current session state
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Item this surface is loaded (or loading) for
    pub fn bound_item(&self) -> Option<&PlayableItem> {
        self.bound.as_ref()
    }

    /// Elapsed transport time
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Duration as reported by the engine
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Fractional progress for the waveform cursor, if duration is known
    pub fn progress(&self) -> Option<f32> {
        self.duration.filter(|d| !d.is_zero()).map(|duration| {
            (self.elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
        })
    }

    /// Whether a live engine is held
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }
}
