//! Translate one control request into player operations.
//!
//! # Request flow
//!
//! ```text
//! POST body ──▶ command=  ──▶ play / playpause / pause / stop / next / prev / seek(value=)
//!           ──▶ filename= ──▶ bridge (engine thread, fire-and-forget)
//!           ──▶ position= ──▶ go_to_sec      (if >= 0)
//!           ──▶ rate=     ──▶ set_speed      (if in [0.01, 100])
//!           ──▶ volume=   ──▶ set_volume     (x100, clamped to 0..=100)
//! always    ──▶ snapshot
//! ```
//!
//! Every field is handled independently and in that order. Missing or
//! invalid fields are skipped without any error reaching the client.
//! Non-POST requests skip all mutations and only report state.
//!
//! The snapshot is taken after the direct engine calls, but a file open
//! submitted in the same request runs later on the engine thread and may
//! not be visible in it yet.

use crate::core::bridge::BridgeSender;
use crate::core::engine::{PlayerEngine, PlayerSnapshot, Playlist, RATE_MAX, RATE_MIN};
use crate::server::params;
use log::{debug, info};
use std::sync::Arc;

/// One inbound request: method and buffered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    pub method: String,
    pub body: Vec<u8>,
}

impl ControlRequest {
    pub fn new(method: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: method.into(),
            body: body.into(),
        }
    }

    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self::new("POST", body)
    }

    pub fn is_post(&self) -> bool {
        self.method == "POST"
    }
}

/// Values of the `command` parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    Play,
    PlayPause,
    Pause,
    Stop,
    Next,
    Prev,
    /// Relative seek in whole seconds, `None` when `value` is missing, invalid or zero
    Seek(Option<i32>),
}

impl ControlCommand {
    /// Parse `command` (and `value` for seeks) from a form body.
    /// Unknown names give `None`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let name = params::decode(body, "command=")?;
        let cmd = match name.as_str() {
            "play" => ControlCommand::Play,
            "playpause" => ControlCommand::PlayPause,
            "pause" => ControlCommand::Pause,
            "stop" => ControlCommand::Stop,
            "next" => ControlCommand::Next,
            "prev" => ControlCommand::Prev,
            "seek" => ControlCommand::Seek(seek_delta(body)),
            other => {
                debug!("Ignoring unknown command {:?}", other);
                return None;
            }
        };
        Some(cmd)
    }
}

/// `value=` as whole seconds. Zero counts as "no seek", like a parse failure.
fn seek_delta(body: &[u8]) -> Option<i32> {
    params::decode_f64(body, "value=")
        .filter(|v| *v != 0.0)
        .map(|v| v as i32)
}

/// Everything extracted from one request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedCommand {
    pub command: Option<ControlCommand>,
    pub filename: Option<String>,
    pub position: Option<f64>,
    pub rate: Option<f64>,
    /// Already scaled to 0..=100
    pub volume: Option<i32>,
}

impl ParsedCommand {
    /// Apply each field's validity rule; invalid fields become `None`.
    pub fn parse(body: &[u8]) -> Self {
        Self {
            command: ControlCommand::from_body(body),
            filename: params::decode(body, "filename="),
            position: params::decode_f64(body, "position=").filter(|p| *p >= 0.0),
            rate: params::decode_f64(body, "rate=").filter(|r| (RATE_MIN..=RATE_MAX).contains(r)),
            volume: params::decode_f64(body, "volume=").map(volume_percent),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 0.0-1.0 fraction to clamped integer percent.
fn volume_percent(fraction: f64) -> i32 {
    let v = fraction * 100.0;
    if v <= 0.0 {
        0
    } else if v >= 100.0 {
        100
    } else {
        v as i32
    }
}

/// Request handler shared by all server threads.
pub struct Dispatcher {
    engine: Arc<dyn PlayerEngine>,
    playlist: Arc<dyn Playlist>,
    bridge: BridgeSender,
}

impl Dispatcher {
    pub fn new(engine: Arc<dyn PlayerEngine>, playlist: Arc<dyn Playlist>, bridge: BridgeSender) -> Self {
        Self {
            engine,
            playlist,
            bridge,
        }
    }

    /// Apply the request, then report state.
    pub fn handle(&self, request: &ControlRequest) -> PlayerSnapshot {
        if request.is_post() {
            self.apply(&ParsedCommand::parse(&request.body));
        } else {
            debug!("{} request: status only", request.method);
        }
        self.engine.snapshot()
    }

    /// Execute parsed fields in their fixed order.
    pub fn apply(&self, parsed: &ParsedCommand) {
        if parsed.is_empty() {
            debug!("POST without usable fields: status only");
            return;
        }

        if let Some(cmd) = parsed.command {
            debug!("Command: {:?}", cmd);
            self.run_command(cmd);
        }

        if let Some(filename) = &parsed.filename {
            info!("Filename: {}", filename);
            self.bridge.open(filename.clone());
        }

        if let Some(pos) = parsed.position {
            debug!("Position: {}", pos);
            self.engine.go_to_sec(pos);
        }

        if let Some(rate) = parsed.rate {
            debug!("Rate: {}", rate);
            self.engine.set_speed(rate);
        }

        if let Some(volume) = parsed.volume {
            debug!("Volume: {}", volume);
            self.engine.set_volume(volume);
        }
    }

    fn run_command(&self, cmd: ControlCommand) {
        match cmd {
            ControlCommand::Play => self.engine.play(),
            ControlCommand::PlayPause => self.engine.play_or_pause(),
            ControlCommand::Pause => self.engine.set_pause(true),
            ControlCommand::Stop => self.engine.stop(),
            ControlCommand::Next => self.playlist.play_next(),
            ControlCommand::Prev => self.playlist.play_prev(),
            ControlCommand::Seek(Some(secs)) => self.engine.seek_relative(secs),
            ControlCommand::Seek(None) => debug!("Seek without usable value, skipped"),
        }
    }
}
