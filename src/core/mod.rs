//! Engine side: player contract, reference player, playlist, bridge, engine loop
//!
//! These modules know nothing about HTTP.

pub mod bridge;
pub mod engine;
pub mod player;
pub mod playlist;
pub mod runner;

// Re-exports for convenience
pub use bridge::{BridgeCommand, BridgeReceiver, BridgeSender};
pub use engine::{EngineHost, PlaybackState, PlayerEngine, PlayerSnapshot, Playlist};
pub use player::Player;
pub use playlist::PlaylistQueue;
pub use runner::Runner;
