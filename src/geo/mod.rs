//! Geographic location and solar events.
//!
//! The night curve needs to know when the sun sets and rises. Both the
//! location and the solar calculation sit behind narrow traits so the render
//! loop can run without either: no location simply means no night dimming.
//!
//! - [`solar`]: [`SolarProvider`](solar::SolarProvider) and the
//!   `sunrise`-crate implementation

use anyhow::Result;

use crate::config::Config;

pub mod solar;

pub use solar::{SolarProvider, SolarTimes, SunriseProvider};

/// A validated coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            anyhow::bail!("Latitude must be between -90 and 90 degrees (got {latitude})");
        }
        if !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!("Longitude must be between -180 and 180 degrees (got {longitude})");
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Source of the clock's position.
pub trait LocationProvider {
    fn location(&self) -> Option<Location>;
}

/// Location taken from the configuration (and `geo.toml` override).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredLocation(Option<Location>);

impl ConfiguredLocation {
    pub fn from_config(config: &Config) -> Result<Self> {
        match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Ok(Self(Some(Location::new(lat, lon)?))),
            (None, None) => Ok(Self(None)),
            _ => anyhow::bail!("latitude and longitude must be set together"),
        }
    }
}

impl From<Option<Location>> for ConfiguredLocation {
    fn from(location: Option<Location>) -> Self {
        Self(location)
    }
}

impl LocationProvider for ConfiguredLocation {
    fn location(&self) -> Option<Location> {
        self.0
    }
}
