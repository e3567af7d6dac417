//! Application coordinator that manages the complete lifecycle of wordclock.
//!
//! This module handles resource acquisition and orchestration of the render
//! loop. It manages:
//! - Configuration loading
//! - Device creation and phrase table validation
//! - Brightness profile and location setup
//! - Signal handler setup
//!
//! The `WordClock` struct uses a builder pattern to support different startup contexts:
//! - Normal startup: `WordClock::new(debug_enabled).run()`
//! - Dry run: `WordClock::new(debug_enabled).dry_run().run()`
//! - Simulation mode: `WordClock::new(debug_enabled).dry_run().with_time_source(source).without_headers().run()`

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::{
    brightness::BrightnessProfile,
    config::Config,
    core::{Core, CoreParams},
    device::create_device,
    geo::{ConfiguredLocation, LocationProvider, SunriseProvider},
    io::signals::setup_signal_handler,
    phrases::PhraseTable,
    time::{RealTimeSource, TimeSource},
};

/// Builder for configuring and running the word clock.
///
/// # Examples
///
/// ```no_run
/// use wordclock::WordClock;
///
/// # fn main() -> anyhow::Result<()> {
/// // Drive the configured strip
/// WordClock::new(false).run()?;
///
/// // Log phrase changes instead of touching hardware
/// WordClock::new(true).dry_run().run()?;
/// # Ok(())
/// # }
/// ```
pub struct WordClock {
    debug_enabled: bool,
    dry_run: bool,
    show_headers: bool,
    time_source: Arc<dyn TimeSource>,
}

impl WordClock {
    /// Create a new runner with defaults matching normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            dry_run: false,
            show_headers: true,
            time_source: Arc::new(RealTimeSource),
        }
    }

    /// Use the in-memory strip and log each phrase change
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Replace the wall clock (used by simulation)
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Skip header display
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Execute the application with the configured settings.
    ///
    /// Loads the configuration, opens the device, and runs the render loop
    /// until a shutdown signal arrives or the time source ends. The strip is
    /// turned off before returning.
    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();

            if self.debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled - showing per-tick brightness and fades");
            }
        }

        let config = match Config::load() {
            Ok(config) => config,
            Err(e) => {
                log_error_exit!("Configuration failed");
                eprintln!("{:?}", e);
                std::process::exit(1);
            }
        };

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        config.log_config();

        let table = PhraseTable::default();
        let device = create_device(&config, self.dry_run).context("Failed to open LED device")?;
        table
            .validate(device.pixel_count())
            .context("The phrase table does not fit the LED strip")?;

        let profile = BrightnessProfile::from_config(&config)?;
        let location = ConfiguredLocation::from_config(&config)?.location();
        let (steps, sub_tick) = CoreParams::fade_settings(&config);

        if self.dry_run {
            log_block_start!("Dry run: logging phrase changes instead of driving hardware");
        }

        let core = Core::new(CoreParams {
            device,
            table,
            profile,
            steps,
            sub_tick,
            location,
            solar: Box::new(SunriseProvider),
            time_source: self.time_source,
            signal_state,
            debug_enabled: self.debug_enabled,
            dry_run: self.dry_run,
        });

        core.execute()
    }
}
