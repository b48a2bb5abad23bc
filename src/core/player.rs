//! Reference playback engine.
//!
//! **Architecture**: `Player` keeps all state behind one `RwLock`, so the
//! [`PlayerEngine`] entry points can be called from HTTP handler threads
//! while the engine thread advances position via [`EngineHost::tick`].
//! Media loading goes through [`EngineHost::open`] only, i.e. on the thread
//! that owns the `Runner`.
//!
//! There is no decoding here: position is a clock driven by wall time and
//! playback speed, which is enough to make the remote-control surface
//! observable end to end.
//!
//! # States
//!
//! ```text
//!            open()               play_or_pause()
//! Stopped ──────────▶ Playing ◀──────────────────▶ Paused
//!    ▲                   │                           │
//!    └──── stop() ───────┴───────── stop() ──────────┘
//! ```

use crate::core::engine::{EngineHost, PlaybackState, PlayerEngine, PlayerSnapshot, RATE_MAX, RATE_MIN};
use log::{debug, info, trace};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Volume on startup (0-100)
pub const DEFAULT_VOLUME: i32 = 50;

#[derive(Debug, Clone)]
struct PlayerState {
    state: PlaybackState,
    filename: String,
    position: f64,
    speed: f64,
    volume: i32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            state: PlaybackState::Stopped,
            filename: String::new(),
            position: 0.0,
            speed: 1.0,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PlayerState {
    fn is_loaded(&self) -> bool {
        !self.filename.is_empty()
    }
}

/// Internally synchronized playback state.
#[derive(Debug, Default)]
pub struct Player {
    inner: RwLock<PlayerState>,
}

impl Player {
    pub fn new() -> Self {
        info!("Player initialized");
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, PlayerState> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PlayerState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Load media and start playing from the beginning.
    ///
    /// An empty name has nothing to load and leaves the player untouched.
    pub fn load(&self, name: &str) {
        if name.is_empty() {
            debug!("open: empty name, nothing to load");
            return;
        }
        let mut s = self.write();
        s.filename = name.to_string();
        s.position = 0.0;
        s.state = PlaybackState::Playing;
        info!("Opened {}", name);
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.read().state
    }

    /// Advance the clock by `elapsed` wall time scaled by speed.
    pub fn advance(&self, elapsed: Duration) {
        let mut s = self.write();
        if s.state == PlaybackState::Playing {
            s.position += elapsed.as_secs_f64() * s.speed;
            trace!("Position {:.3}s", s.position);
        }
    }
}

impl PlayerEngine for Player {
    fn play(&self) {
        let mut s = self.write();
        if !s.is_loaded() {
            debug!("play: nothing loaded");
            return;
        }
        s.state = PlaybackState::Playing;
    }

    fn play_or_pause(&self) {
        let mut s = self.write();
        s.state = match s.state {
            PlaybackState::Playing => PlaybackState::Paused,
            _ if s.is_loaded() => PlaybackState::Playing,
            other => other,
        };
    }

    fn set_pause(&self, paused: bool) {
        let mut s = self.write();
        s.state = match (s.state, paused) {
            (PlaybackState::Playing, true) => PlaybackState::Paused,
            (PlaybackState::Paused, false) => PlaybackState::Playing,
            (other, _) => other,
        };
    }

    fn stop(&self) {
        let mut s = self.write();
        s.state = PlaybackState::Stopped;
        s.position = 0.0;
    }

    fn seek_relative(&self, secs: i32) {
        let mut s = self.write();
        if s.is_loaded() {
            s.position = (s.position + secs as f64).max(0.0);
        }
    }

    fn go_to_sec(&self, secs: f64) {
        let mut s = self.write();
        if s.is_loaded() && secs.is_finite() {
            s.position = secs.max(0.0);
        }
    }

    fn set_speed(&self, speed: f64) {
        if speed.is_finite() {
            self.write().speed = speed.clamp(RATE_MIN, RATE_MAX);
        }
    }

    fn set_volume(&self, volume: i32) {
        self.write().volume = volume.clamp(0, 100);
    }

    fn current_volume(&self) -> i32 {
        self.read().volume
    }

    fn state_to_string(&self) -> String {
        self.read().state.to_string()
    }

    fn filename(&self) -> String {
        self.read().filename.clone()
    }

    fn current_sec(&self) -> f64 {
        self.read().position
    }

    fn speed(&self) -> f64 {
        self.read().speed
    }

    fn snapshot(&self) -> PlayerSnapshot {
        let s = self.read();
        PlayerSnapshot {
            state: s.state.to_string(),
            filename: s.filename.clone(),
            position: s.position,
            rate: s.speed,
            volume: s.volume,
        }
    }
}

impl EngineHost for Arc<Player> {
    fn open(&mut self, name: &str) {
        self.load(name);
    }

    fn tick(&mut self, elapsed: Duration) {
        self.advance(elapsed);
    }
}
