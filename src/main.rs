use playctl::cli::Args;
use playctl::core::{bridge, Player, PlaylistQueue, Runner};
use playctl::paths::{self, PathConfig};
use playctl::server::{ApiServer, Dispatcher};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::sync::Arc;

fn init_logging(args: &Args, path_config: &PathConfig) -> Result<()> {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| paths::data_file("playctl.log", path_config));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("tiny_http", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
            .filter_module("tiny_http", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = paths::ensure_dirs(&path_config) {
        eprintln!("Warning: {:#}", e);
    }

    init_logging(&args, &path_config)?;

    info!("playctl v{} starting...", env!("CARGO_PKG_VERSION"));
    debug!("Command-line args: {:?}", args);

    // Engine state is shared with server threads; media loading stays on this thread
    let player = Arc::new(Player::new());
    let (bridge_tx, bridge_rx) = bridge::channel();
    let playlist = Arc::new(PlaylistQueue::new(args.files.clone(), bridge_tx.clone()));

    if args.autoplay {
        if playlist.is_empty() {
            warn!("--autoplay given without files");
        }
        playlist.start();
        if let Some(first) = playlist.current() {
            info!("Autoplay: {}", first);
        }
    }

    let dispatcher = Arc::new(Dispatcher::new(player.clone(), playlist, bridge_tx));
    let server = ApiServer::start(args.server_config(), dispatcher)?;
    println!("Listening on http://{}", server.addr());

    // The server keeps a bridge sender alive, so this runs until the process is killed
    Runner::new(player, bridge_rx, args.tick()).run();

    server.stop();
    Ok(())
}
