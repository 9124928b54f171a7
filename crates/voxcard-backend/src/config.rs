use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use tokio::fs::{OpenOptions, create_dir_all, read_to_string};
use tokio::io::AsyncWriteExt;
use voxcard_bridge::config::Config;

/// Environment variable overriding the configured lookup base URL. The
/// deployment provides the service address this way.
pub(crate) const API_URL_ENV: &str = "VOXCARD_API_URL";

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directories. This
    /// usually occurs when required environment variables are missing (e.g.,
    /// `$HOME` on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the
    /// expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the default configuration to TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn build_config_dir() -> Result<PathBuf, ConfigError> {
    match ProjectDirs::from("dev", "voxcard", "voxcard") {
        Some(path) => Ok(path.config_dir().to_path_buf()),
        None => Err(ConfigError::DirectoriesNotFound),
    }
}

/// Loads the application configuration from disk, writing a default file on
/// first run. The [`API_URL_ENV`] environment variable takes precedence
/// over the configured lookup base URL.
pub async fn load_config() -> Result<Config, ConfigError> {
    let config_dir = build_config_dir()?;

    let config_path = config_dir.join("config.toml");
    log::info!("Loading configuration from {config_path:?}");
    let mut config = if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        toml::from_str(&contents)?
    } else {
        let config = Config::default();
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(&config)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(config_path)
            .await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        config
    };

    if let Ok(base_url) = env::var(API_URL_ENV) {
        log::info!("Lookup base URL overridden by {API_URL_ENV}");
        config.lookup.base_url = base_url;
    }

    Ok(config)
}
