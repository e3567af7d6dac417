//! Configuration loading functionality.
//!
//! Handles loading configuration files from the default or a custom
//! directory, applying defaults, and managing geo.toml overrides.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::validation::validate_config;
use super::{Config, GeoConfig};
use crate::common::constants::*;
use crate::common::utils::private_path;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Path of `wordclock.toml`, honoring `--config`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join("wordclock.toml"));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("wordclock").join("wordclock.toml"))
}

/// Load configuration using automatic path detection.
///
/// This function will create a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path)
            .context("Failed to create default config during load")?;
        log_pipe!();
        log_info!(
            "Created default configuration at {}",
            private_path(&config_path)
        );
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// This version does NOT create a default config if the path doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found at {}", private_path(path));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    // geo.toml values are validated together with the main file
    load_geo_override_from_path(&mut config, path)?;

    validate_config(&config)?;

    apply_defaults(&mut config);

    Ok(config)
}

/// Apply default values to configuration fields.
pub(crate) fn apply_defaults(config: &mut Config) {
    config.device.get_or_insert(DEFAULT_DEVICE);
    config
        .spi_device
        .get_or_insert_with(|| DEFAULT_SPI_DEVICE.to_string());
    config.pixel_count.get_or_insert(DEFAULT_PIXEL_COUNT);
    config.fade_in_step.get_or_insert(DEFAULT_FADE_IN_STEP);
    config.fade_out_step.get_or_insert(DEFAULT_FADE_OUT_STEP);
    config.sub_tick_ms.get_or_insert(DEFAULT_SUB_TICK_MS);
    config
        .twilight_start
        .get_or_insert_with(|| DEFAULT_TWILIGHT_START.to_string());
    config
        .twilight_end
        .get_or_insert_with(|| DEFAULT_TWILIGHT_END.to_string());
    config.twilight_scale.get_or_insert(DEFAULT_TWILIGHT_SCALE);
    config.night_scale.get_or_insert(DEFAULT_NIGHT_SCALE);
}

/// Load geo.toml from the directory of `config_path`.
pub(crate) fn load_geo_override_from_path(config: &mut Config, config_path: &Path) -> Result<()> {
    let geo_path = if let Some(parent) = config_path.parent() {
        parent.join("geo.toml")
    } else {
        return Ok(());
    };

    if !geo_path.exists() {
        // geo.toml is optional, no error if missing
        return Ok(());
    }

    match fs::read_to_string(&geo_path) {
        Ok(content) => match toml::from_str::<GeoConfig>(&content) {
            Ok(geo_config) => {
                if let Some(lat) = geo_config.latitude {
                    config.latitude = Some(lat);
                }
                if let Some(lon) = geo_config.longitude {
                    config.longitude = Some(lon);
                }
            }
            Err(e) => {
                // Malformed geo.toml - log warning and continue
                log_pipe!();
                log_warning!("Failed to parse geo.toml: {e}. Using coordinates from main config.");
            }
        },
        Err(e) => {
            log_pipe!();
            log_warning!("Failed to read geo.toml: {e}. Using coordinates from main config.");
        }
    }

    Ok(())
}
