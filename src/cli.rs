use crate::server::{DEFAULT_MAX_BODY, DEFAULT_PORT, ServerConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "HTTP:   rouille 3\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// HTTP remote control for a media player
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Media files for the initial playlist
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Start playing the first playlist entry
    #[arg(short = 'a', long = "autoplay")]
    pub autoplay: bool,

    /// Interface to listen on
    #[arg(short = 'b', long = "bind", value_name = "ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(short = 'p', long = "port", value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum request body size in bytes
    #[arg(long = "max-body", value_name = "BYTES", default_value_t = DEFAULT_MAX_BODY)]
    pub max_body: usize,

    /// Do not send Access-Control-Allow-Origin
    #[arg(long = "no-cors")]
    pub no_cors: bool,

    /// Engine clock tick in milliseconds
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = 50)]
    pub tick_ms: u64,

    /// Enable debug logging to file (default: playctl.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind.clone(),
            port: self.port,
            max_body: self.max_body,
            cors: !self.no_cors,
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Level name for the console logger
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["playctl"]);
        assert_eq!(args.server_config(), ServerConfig::default());
        assert_eq!(args.tick(), Duration::from_millis(50));
        assert_eq!(args.log_level(), "warn");
        assert!(args.files.is_empty());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "playctl", "-vv", "--port", "8080", "--bind", "127.0.0.1", "--no-cors", "--log", "a.mp4", "b.mp4",
        ]);
        let config = args.server_config();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind, "127.0.0.1");
        assert!(!config.cors);
        assert_eq!(args.log_level(), "debug");
        // --log takes an optional value, so the first file is consumed by it
        assert_eq!(args.log_file, Some(Some(PathBuf::from("a.mp4"))));
        assert_eq!(args.files, vec!["b.mp4"]);
    }

    #[test]
    fn test_log_without_file() {
        let args = Args::parse_from(["playctl", "a.mp4", "--log"]);
        assert_eq!(args.log_file, Some(None));
        assert_eq!(args.files, vec!["a.mp4"]);
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let args = Args::parse_from(["playctl", "--tick-ms", "0"]);
        assert_eq!(args.tick(), Duration::from_millis(1));
    }
}
