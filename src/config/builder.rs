//! Default configuration file generation.
//!
//! Builds the commented `wordclock.toml` written on first start, with every
//! setting aligned so the comments form a column.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;

/// Create a default config file at `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))
}

/// Commented default configuration.
pub(crate) fn default_config_content() -> String {
    let mut content = ConfigBuilder::new()
        .add_section("Strip")
        .add_setting(
            "device",
            &format!("\"{}\"", DEFAULT_DEVICE.as_str()),
            "LED strip driver: \"dummy\" or \"ws2801\"",
        )
        .add_setting(
            "spi_device",
            &format!("\"{DEFAULT_SPI_DEVICE}\""),
            "SPI character device for the ws2801 driver",
        )
        .add_setting(
            "pixel_count",
            &DEFAULT_PIXEL_COUNT.to_string(),
            "Number of LEDs on the strip",
        )
        .add_section("Fading")
        .add_setting(
            "fade_in_step",
            &DEFAULT_FADE_IN_STEP.to_string(),
            &format!("Max channel change per sub-tick when lighting ({MINIMUM_FADE_STEP}-255)"),
        )
        .add_setting(
            "fade_out_step",
            &DEFAULT_FADE_OUT_STEP.to_string(),
            &format!("Max channel change per sub-tick when dimming out ({MINIMUM_FADE_STEP}-255)"),
        )
        .add_setting(
            "sub_tick_ms",
            &DEFAULT_SUB_TICK_MS.to_string(),
            &format!(
                "Pause between fade sub-ticks ({MINIMUM_SUB_TICK_MS}-{MAXIMUM_SUB_TICK_MS})ms"
            ),
        )
        .add_section("Dimming")
        .add_setting(
            "twilight_start",
            &format!("\"{DEFAULT_TWILIGHT_START}\""),
            "Start of the fixed twilight window (HH:MM:SS)",
        )
        .add_setting(
            "twilight_end",
            &format!("\"{DEFAULT_TWILIGHT_END}\""),
            "End of the fixed twilight window (HH:MM:SS)",
        )
        .add_setting(
            "twilight_scale",
            &DEFAULT_TWILIGHT_SCALE.to_string(),
            "Depth of the twilight dimming [0, 1)",
        )
        .add_setting(
            "night_scale",
            &DEFAULT_NIGHT_SCALE.to_string(),
            "Depth of the solar night dimming [0, 1)",
        )
        .add_section("Geolocation")
        .build();

    content.push_str(
        "\n# Set latitude and longitude (or put them in geo.toml) to dim with the sun\n\
         # latitude = 59.3293\n\
         # longitude = 18.0686\n",
    );
    content
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // One space between the widest setting and its comment
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
