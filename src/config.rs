// Configuration management

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::AppConfig;

/// Command-line overrides for the config file
#[derive(Parser, Debug, Default)]
#[command(name = "storyform", version, about = "Terminal client for a story generation server")]
pub struct Args {
    /// Base URL of the story server
    #[arg(long)]
    pub server_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Path to an alternative config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.server_url {
            config.server_url.clone_from(url);
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout = Some(timeout);
        }
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("storyform");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn get_log_dir() -> Result<PathBuf> {
    let log_dir = get_config_dir()?.join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;
    Ok(log_dir)
}

/// Load the config named on the command line, or the default one.
pub fn load(args: &Args) -> Result<AppConfig> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    let mut config = load_config_from(&path)?;
    args.apply(&mut config);
    Ok(config)
}

/// Read a config file, writing the defaults there first if it is missing.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_config = AppConfig::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path).context("Failed to read config file")?;

    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, contents).context("Failed to write config file")?;

    Ok(())
}
