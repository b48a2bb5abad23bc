//! HTTP remote control for the player.
//!
//! # Purpose
//!
//! A single always-on control surface: any request to any path returns the
//! player status as JSON; POST requests may also carry form fields that
//! drive the player first.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐                            ┌──────────────────────┐
//! │   rouille thread pool   │  direct calls (Send+Sync)  │   PlayerEngine       │
//! │                         │  ───────────────────────▶  │   play/pause/seek/   │
//! │  params  -> dispatch    │                            │   rate/volume        │
//! │  dispatch -> report     │                            └──────────────────────┘
//! │                         │       bridge channel       ┌──────────────────────┐
//! │  filename=...           │  ───── Open(name) ──────▶  │   Engine thread      │
//! └─────────────────────────┘                            │   (Runner)           │
//!                                                        └──────────────────────┘
//! ```
//!
//! # Form fields
//!
//! | Field      | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `command`  | `play`, `playpause`, `pause`, `stop`, `next`, `prev`, `seek` |
//! | `value`    | seek delta in seconds (with `command=seek`)         |
//! | `filename` | open media (queued on the engine thread)            |
//! | `position` | absolute seek in seconds, `>= 0`                    |
//! | `rate`     | playback speed in `[0.01, 100]`                     |
//! | `volume`   | `0.0`-`1.0`, clamped                                |

pub mod api;
pub mod dispatch;
pub mod params;
pub mod report;

pub use api::{ApiHandle, ApiServer};
pub use dispatch::{ControlCommand, ControlRequest, Dispatcher, ParsedCommand};

/// Default listening port
pub const DEFAULT_PORT: u16 = 9876;
/// Default cap on buffered request bodies
pub const DEFAULT_MAX_BODY: usize = 64 * 1024;

/// Server-side settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub bind: String,
    pub port: u16,
    /// Max request body bytes read; the rest is ignored
    pub max_body: usize,
    /// Add `Access-Control-Allow-Origin: *` to responses
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_body: DEFAULT_MAX_BODY,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding. IPv6 literals are bracketed.
    pub fn addr(&self) -> String {
        if self.bind.contains(':') && !self.bind.starts_with('[') {
            format!("[{}]:{}", self.bind, self.port)
        } else {
            format!("{}:{}", self.bind, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr() {
        let mut config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:9876");

        config.bind = "::1".into();
        config.port = 8080;
        assert_eq!(config.addr(), "[::1]:8080");

        config.bind = "[::]".into();
        assert_eq!(config.addr(), "[::]:8080");
    }
}
