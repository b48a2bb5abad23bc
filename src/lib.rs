//! PLAYCTL - HTTP remote control for a media player
//!
//! Re-exports all modules for use by the binary target.

// Engine side (contract, reference player, playlist, bridge, engine loop)
pub mod core;

// HTTP side
pub mod server;

// App modules
pub mod cli;
pub mod paths;

// Re-export commonly used types
pub use core::bridge::{BridgeCommand, BridgeReceiver, BridgeSender};
pub use core::engine::{EngineHost, PlaybackState, PlayerEngine, PlayerSnapshot, Playlist};
pub use core::player::Player;
pub use server::{ApiServer, ControlRequest, Dispatcher, ServerConfig};
