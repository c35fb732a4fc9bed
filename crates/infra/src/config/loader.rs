//! Configuration loader
//!
//! Loads application configuration from a TOML or JSON file.
//!
//! ## Loading Strategy
//! 1. An explicit path (from `--config`) is used as-is and must exist
//! 2. Otherwise, standard locations are probed
//! 3. Format is detected by file extension
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./caltally.toml` or `./caltally.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};

use caltally_domain::{AppConfig, CalTallyError, Result};

/// Load configuration from an explicit path or the probed locations.
///
/// # Errors
/// Returns `CalTallyError::Config` if:
/// - The explicit file does not exist
/// - No config file is found in any standard location
/// - The file format is invalid or unsupported
pub fn load(path: Option<PathBuf>) -> Result<AppConfig> {
    load_from_file(path)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations via
/// [`probe_config_paths`].
///
/// # Errors
/// See [`load`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CalTallyError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CalTallyError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CalTallyError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content.
///
/// Format is detected by file extension (`.toml` or `.json`).
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CalTallyError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CalTallyError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CalTallyError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("caltally.toml"),
            cwd.join("caltally.json"),
            cwd.join("config.toml"),
            cwd.join("config.json"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("caltally.toml"),
                exe_dir.join("caltally.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("config.json"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}
