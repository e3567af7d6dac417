//! Brightness profile.
//!
//! Overall brightness starts at 1.0 and is multiplied by up to two independent
//! dimming curves:
//!
//! - the **night curve**, a gaussian over the solar night (sunset to the next
//!   sunrise), only available with a location fix
//! - the **twilight curve**, a Bezier over fixed clock hours (21:00 to 07:00 by
//!   default), always available
//!
//! The resulting level is turned into a scaled white on-color for the strip.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveTime};
use smart_leds::RGB8;

use crate::common::constants::*;
use crate::config::Config;

pub mod curves;
pub mod window;

pub use window::TimeWindow;

/// Dimming parameters, fixed for the lifetime of the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessProfile {
    pub twilight_start: NaiveTime,
    pub twilight_end: NaiveTime,
    pub twilight_scale: f64,
    pub night_scale: f64,
}

impl Default for BrightnessProfile {
    fn default() -> Self {
        Self {
            twilight_start: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
            twilight_end: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            twilight_scale: DEFAULT_TWILIGHT_SCALE,
            night_scale: DEFAULT_NIGHT_SCALE,
        }
    }
}

impl BrightnessProfile {
    pub fn from_config(config: &Config) -> Result<Self> {
        let start = config
            .twilight_start
            .as_deref()
            .unwrap_or(DEFAULT_TWILIGHT_START);
        let end = config.twilight_end.as_deref().unwrap_or(DEFAULT_TWILIGHT_END);

        Ok(Self {
            twilight_start: NaiveTime::parse_from_str(start, "%H:%M:%S")
                .with_context(|| format!("Invalid twilight_start '{start}'"))?,
            twilight_end: NaiveTime::parse_from_str(end, "%H:%M:%S")
                .with_context(|| format!("Invalid twilight_end '{end}'"))?,
            twilight_scale: config.twilight_scale.unwrap_or(DEFAULT_TWILIGHT_SCALE),
            night_scale: config.night_scale.unwrap_or(DEFAULT_NIGHT_SCALE),
        })
    }

    /// The twilight window instance containing `now`, if any.
    pub fn twilight_window(&self, now: DateTime<Local>) -> Option<TimeWindow> {
        TimeWindow::daily(self.twilight_start, self.twilight_end, now)
    }

    /// Evaluate both curves at `now`.
    ///
    /// `night` is the solar night instance containing `now`, or `None` when it
    /// is daytime or no solar data is available.
    pub fn evaluate(&self, now: DateTime<Local>, night: Option<&TimeWindow>) -> BrightnessLevel {
        let night_factor = night
            .filter(|window| window.contains(now))
            .map(|window| curves::night_factor(window.centered_progress(now), self.night_scale));

        let twilight_factor = self.twilight_window(now).map(|window| {
            let elapsed = window.elapsed(now).num_minutes() as f64;
            let total = window.duration().num_minutes().max(1) as f64;
            curves::twilight_factor(elapsed / total, self.twilight_scale)
        });

        BrightnessLevel {
            night_factor,
            twilight_factor,
        }
    }
}

/// The factors that applied at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessLevel {
    pub night_factor: Option<f64>,
    pub twilight_factor: Option<f64>,
}

impl BrightnessLevel {
    pub const FULL: BrightnessLevel = BrightnessLevel {
        night_factor: None,
        twilight_factor: None,
    };

    /// Combined multiplier in `(0, 1]`.
    pub fn value(&self) -> f64 {
        self.night_factor.unwrap_or(1.0) * self.twilight_factor.unwrap_or(1.0)
    }

    /// White scaled by the brightness, truncated per channel.
    pub fn on_color(&self) -> RGB8 {
        let level = (FULL_CHANNEL as f64 * self.value().clamp(0.0, 1.0)) as u8;
        RGB8::new(level, level, level)
    }
}

#[cfg(test)]
mod tests;
