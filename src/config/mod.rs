//! Configuration system for wordclock with validation and geo coordinate integration.
//!
//! Settings live in `wordclock.toml` under `$XDG_CONFIG_HOME/wordclock/`, or in
//! the directory passed with `--config`. A commented default file is created
//! on first start. Every field is optional and falls back to the defaults in
//! [`crate::common::constants`].
//!
//! ```toml
//! #[Strip]
//! device = "dummy"              # LED strip driver: "dummy" or "ws2801"
//! spi_device = "/dev/spidev0.0" # SPI character device for the ws2801 driver
//! pixel_count = 40              # Number of LEDs on the strip
//!
//! #[Fading]
//! fade_in_step = 3              # Max channel change per sub-tick when lighting (1-255)
//! fade_out_step = 12            # Max channel change per sub-tick when dimming out (1-255)
//! sub_tick_ms = 30              # Pause between fade sub-ticks (1-1000)ms
//!
//! #[Dimming]
//! twilight_start = "21:00:00"   # Start of the fixed twilight window (HH:MM:SS)
//! twilight_end = "07:00:00"     # End of the fixed twilight window (HH:MM:SS)
//! twilight_scale = 0.9          # Depth of the twilight dimming [0, 1)
//! night_scale = 0.95            # Depth of the solar night dimming [0, 1)
//!
//! #[Geolocation]
//! latitude = 59.3293            # Enables the solar night curve
//! longitude = 18.0686
//! ```
//!
//! An optional `geo.toml` next to the main file overrides the coordinates so
//! the main settings can be shared without revealing the location.

pub mod builder;
pub mod loading;
pub mod validation;

use serde::Deserialize;

use crate::common::constants::*;

// Re-export public API
pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};
pub use validation::validate_config;

/// Geographic configuration structure for storing coordinates separately.
///
/// This structure represents the optional geo.toml file that can store
/// latitude and longitude separately from the main configuration file.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct GeoConfig {
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
}

/// LED strip driver selection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// In-memory strip; nothing is sent to hardware.
    Dummy,
    /// WS2801 strip on a spidev character device.
    Ws2801,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Dummy => "dummy",
            Device::Ws2801 => "ws2801",
        }
    }
}

/// Configuration structure for wordclock settings.
///
/// ## Configuration Categories
///
/// - **Strip**: `device`, `spi_device`, `pixel_count`
/// - **Fading**: `fade_in_step`, `fade_out_step`, `sub_tick_ms`
/// - **Dimming**: `twilight_start`, `twilight_end`, `twilight_scale`, `night_scale`
/// - **Geolocation**: `latitude`, `longitude` (the night curve is skipped without them)
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub device: Option<Device>,
    pub spi_device: Option<String>,
    pub pixel_count: Option<usize>,
    pub fade_in_step: Option<u8>,
    pub fade_out_step: Option<u8>,
    pub sub_tick_ms: Option<u64>, // milliseconds between fade sub-ticks
    pub twilight_start: Option<String>,
    pub twilight_end: Option<String>,
    pub twilight_scale: Option<f64>,
    pub night_scale: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Config {
    /// Load configuration using the module's load function
    pub fn load() -> anyhow::Result<Self> {
        load()
    }

    /// Log the effective settings as a block.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");

        let device = self.device.unwrap_or(DEFAULT_DEVICE);
        match device {
            Device::Dummy => log_indented!("Device: dummy (no hardware output)"),
            Device::Ws2801 => log_indented!(
                "Device: ws2801 on {}",
                self.spi_device.as_deref().unwrap_or(DEFAULT_SPI_DEVICE)
            ),
        }
        log_indented!(
            "Pixels: {}",
            self.pixel_count.unwrap_or(DEFAULT_PIXEL_COUNT)
        );
        log_indented!(
            "Fade steps: +{} / -{} every {}ms",
            self.fade_in_step.unwrap_or(DEFAULT_FADE_IN_STEP),
            self.fade_out_step.unwrap_or(DEFAULT_FADE_OUT_STEP),
            self.sub_tick_ms.unwrap_or(DEFAULT_SUB_TICK_MS)
        );
        log_indented!(
            "Twilight: {} - {} (depth {:.0}%)",
            self.twilight_start.as_deref().unwrap_or(DEFAULT_TWILIGHT_START),
            self.twilight_end.as_deref().unwrap_or(DEFAULT_TWILIGHT_END),
            self.twilight_scale.unwrap_or(DEFAULT_TWILIGHT_SCALE) * 100.0
        );

        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            let lat_dir = if lat >= 0.0 { "N" } else { "S" };
            let lon_dir = if lon >= 0.0 { "E" } else { "W" };
            log_indented!(
                "Location: {:.3}°{}, {:.3}°{}",
                lat.abs(),
                lat_dir,
                lon.abs(),
                lon_dir
            );
            log_indented!(
                "Night depth: {:.0}%",
                self.night_scale.unwrap_or(DEFAULT_NIGHT_SCALE) * 100.0
            );
        } else {
            log_indented!("Location: not set (night dimming disabled)");
        }
    }
}
