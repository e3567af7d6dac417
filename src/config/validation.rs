//! Configuration validation functionality.
//!
//! Rejects values the render loop cannot work with: zero fade steps, sub-tick
//! pauses outside 1-1000ms, dimming scales that would turn the clock off,
//! unparsable or identical twilight times, out-of-range coordinates, and strips
//! too short for the phrase table.

use anyhow::{Context, Result};
use chrono::NaiveTime;

use super::Config;
use crate::common::constants::*;
use crate::phrases::PhraseTable;

/// Validate every field that is set; unset fields fall back to valid defaults.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_fade_step(config.fade_in_step, "fade_in_step")?;
    validate_fade_step(config.fade_out_step, "fade_out_step")?;

    if let Some(interval_ms) = config.sub_tick_ms
        && !(MINIMUM_SUB_TICK_MS..=MAXIMUM_SUB_TICK_MS).contains(&interval_ms)
    {
        anyhow::bail!(
            "sub_tick_ms ({} ms) must be between {} and {} milliseconds",
            interval_ms,
            MINIMUM_SUB_TICK_MS,
            MAXIMUM_SUB_TICK_MS
        );
    }

    validate_scale(config.twilight_scale, "twilight_scale")?;
    validate_scale(config.night_scale, "night_scale")?;

    let start = config
        .twilight_start
        .as_deref()
        .unwrap_or(DEFAULT_TWILIGHT_START);
    let end = config.twilight_end.as_deref().unwrap_or(DEFAULT_TWILIGHT_END);
    let start = NaiveTime::parse_from_str(start, "%H:%M:%S")
        .context("Invalid twilight_start time format in config. Use HH:MM:SS format")?;
    let end = NaiveTime::parse_from_str(end, "%H:%M:%S")
        .context("Invalid twilight_end time format in config. Use HH:MM:SS format")?;
    if start == end {
        anyhow::bail!(
            "twilight_start and twilight_end must differ (both are {})",
            start.format("%H:%M:%S")
        );
    }

    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        anyhow::bail!("latitude and longitude must be set together");
    }

    if config.spi_device.as_deref().is_some_and(str::is_empty) {
        anyhow::bail!("spi_device must not be empty");
    }

    let pixel_count = config.pixel_count.unwrap_or(DEFAULT_PIXEL_COUNT);
    PhraseTable::default()
        .validate(pixel_count)
        .context("pixel_count is too small for the word layout")?;

    Ok(())
}

fn validate_fade_step(step: Option<u8>, name: &str) -> Result<()> {
    if let Some(step) = step
        && step < MINIMUM_FADE_STEP
    {
        anyhow::bail!(
            "{} ({}) must be between {} and {}",
            name,
            step,
            MINIMUM_FADE_STEP,
            u8::MAX
        );
    }
    Ok(())
}

fn validate_scale(scale: Option<f64>, name: &str) -> Result<()> {
    if let Some(scale) = scale
        && !(MINIMUM_SCALE..MAXIMUM_SCALE).contains(&scale)
    {
        anyhow::bail!(
            "{} ({}) must be at least {} and below {}",
            name,
            scale,
            MINIMUM_SCALE,
            MAXIMUM_SCALE
        );
    }
    Ok(())
}
