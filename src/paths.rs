use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "PLAYCTL_CONFIG_DIR";

/// Application folder name under platform directories
const APP_DIR: &str = "playctl";

/// Files whose presence in the working directory makes it the app directory
const LOCAL_MARKERS: &[&str] = &["playctl.log"];

/// Overrides for default application paths
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args → ENV var (PLAYCTL_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));

        Self { config_dir }
    }
}

/// Get path to a data file (logs)
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. PLAYCTL_CONFIG_DIR environment variable
/// 3. Local folder IF a marker file exists (playctl.log)
/// 4. Platform-specific data directory from dirs-next (default)
///
/// Platform paths:
/// - Linux: ~/.local/share/playctl/{name}
/// - macOS: ~/Library/Application Support/playctl/{name}
/// - Windows: %APPDATA%\playctl\{name}
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    data_dir(config).join(name)
}

/// Create the data directory if missing.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let dir = data_dir(config);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    }
    Ok(())
}

fn has_local_markers(dir: &Path) -> bool {
    LOCAL_MARKERS.iter().any(|f| dir.join(f).exists())
}

fn data_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir()
        && has_local_markers(&current_dir)
    {
        return current_dir;
    }

    if let Some(dir) = dirs_next::data_dir() {
        return dir.join(APP_DIR);
    }

    PathBuf::from(".")
}
