//! Contracts between the control endpoint and the player it drives.
//!
//! The endpoint never reaches into engine internals. It only sees:
//!
//! - [`PlayerEngine`] - mutating entry points callable from any thread
//!   (play/pause/stop/seek/volume/rate) plus the read accessors used for
//!   status reports
//! - [`Playlist`] - next/prev navigation
//! - [`EngineHost`] - operations that must run on the engine's owning thread
//!   (file open), reached only through [`crate::core::bridge`]
//!
//! Implementations must be internally synchronized: HTTP handlers call
//! `PlayerEngine` and `Playlist` methods concurrently from server threads.

use std::fmt;
use std::time::Duration;

/// Lowest accepted playback rate
pub const RATE_MIN: f64 = 0.01;
/// Highest accepted playback rate
pub const RATE_MAX: f64 = 100.0;

/// Coarse playback state reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable copy of player state taken at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    /// Textual playback state ("Playing", "Paused", ...)
    pub state: String,
    /// Current media, empty when nothing is loaded
    pub filename: String,
    /// Position in seconds
    pub position: f64,
    /// Playback rate multiplier
    pub rate: f64,
    /// Volume 0-100
    pub volume: i32,
}

impl PlayerSnapshot {
    /// Volume as the 0.0-1.0 fraction exposed to clients.
    pub fn volume_fraction(&self) -> f64 {
        self.volume as f64 / 100.0
    }
}

/// Player operations callable from any thread.
pub trait PlayerEngine: Send + Sync {
    fn play(&self);
    fn play_or_pause(&self);
    fn set_pause(&self, paused: bool);
    fn stop(&self);
    /// Seek relative to the current position, in whole seconds.
    fn seek_relative(&self, secs: i32);
    /// Seek to an absolute position in seconds.
    fn go_to_sec(&self, secs: f64);
    fn set_speed(&self, speed: f64);
    /// Volume 0-100.
    fn set_volume(&self, volume: i32);

    fn current_volume(&self) -> i32;
    fn state_to_string(&self) -> String;
    fn filename(&self) -> String;
    fn current_sec(&self) -> f64;
    fn speed(&self) -> f64;

    /// Read all reported fields.
    ///
    /// The default composes the individual accessors; engines that can read
    /// everything under one lock should override it so the report is a
    /// single consistent view.
    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state_to_string(),
            filename: self.filename(),
            position: self.current_sec(),
            rate: self.speed(),
            volume: self.current_volume(),
        }
    }
}

/// Playlist navigation.
pub trait Playlist: Send + Sync {
    fn play_next(&self);
    fn play_prev(&self);
}

/// Operations that must execute on the engine's owning thread.
pub trait EngineHost {
    fn open(&mut self, name: &str);

    /// Periodic housekeeping on the owning thread (position advance etc).
    fn tick(&mut self, _elapsed: Duration) {}
}
