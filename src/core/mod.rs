//! Render loop.
//!
//! Once per wall-clock second the loop reads the time, maps it to phrases,
//! computes the brightness, and fades the strip from the previous set of lit
//! LEDs to the new one in short sub-ticks. It stops when the shared running
//! flag is cleared (signals) or the time source reports the end of a
//! simulation, then turns every LED off and closes the device.
//!
//! The `Core` struct owns every piece of loop state: the device, the previous
//! active set, and the per-day solar cache.

pub mod transition;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    brightness::{BrightnessLevel, BrightnessProfile, TimeWindow},
    common::constants::*,
    config::{self, Config},
    common::utils,
    device::{LedDevice, OFF},
    geo::{Location, SolarProvider, SolarTimes},
    io::signals::SignalState,
    phrases::{ClockReading, PhraseTable, TimePhrase, map_time},
    time::TimeSource,
};
use transition::{ActiveSet, FadeSteps, Transition};

/// Parameters for creating a Core instance.
pub struct CoreParams {
    pub device: Box<dyn LedDevice>,
    pub table: PhraseTable,
    pub profile: BrightnessProfile,
    pub steps: FadeSteps,
    pub sub_tick: Duration,
    pub location: Option<Location>,
    pub solar: Box<dyn SolarProvider>,
    pub time_source: Arc<dyn TimeSource>,
    pub signal_state: SignalState,
    pub debug_enabled: bool,
    pub dry_run: bool,
}

impl CoreParams {
    /// Fade and timing settings taken from a loaded configuration.
    pub fn fade_settings(config: &Config) -> (FadeSteps, Duration) {
        let steps = FadeSteps {
            fade_in: config.fade_in_step.unwrap_or(DEFAULT_FADE_IN_STEP),
            fade_out: config.fade_out_step.unwrap_or(DEFAULT_FADE_OUT_STEP),
        };
        let sub_tick = Duration::from_millis(config.sub_tick_ms.unwrap_or(DEFAULT_SUB_TICK_MS));
        (steps, sub_tick)
    }
}

/// What one tick did.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub time: DateTime<Local>,
    pub phrase: TimePhrase,
    pub brightness: BrightnessLevel,
    /// Whether the active set differs from the previous tick.
    pub changed: bool,
    pub sub_ticks: u32,
    pub converged: bool,
}

/// Render loop state.
pub struct Core {
    device: Box<dyn LedDevice>,
    table: PhraseTable,
    profile: BrightnessProfile,
    steps: FadeSteps,
    sub_tick: Duration,
    location: Option<Location>,
    solar: Box<dyn SolarProvider>,
    time_source: Arc<dyn TimeSource>,
    signal_state: SignalState,
    debug_enabled: bool,
    dry_run: bool,
    // Main loop persistent state
    previous: ActiveSet,
    solar_cache: BTreeMap<NaiveDate, Option<SolarTimes>>,
}

impl Core {
    pub fn new(params: CoreParams) -> Self {
        Self {
            device: params.device,
            table: params.table,
            profile: params.profile,
            steps: params.steps,
            sub_tick: params.sub_tick,
            location: params.location,
            solar: params.solar,
            time_source: params.time_source,
            signal_state: params.signal_state,
            debug_enabled: params.debug_enabled,
            dry_run: params.dry_run,
            previous: ActiveSet::new(),
            solar_cache: BTreeMap::new(),
        }
    }

    /// Run the loop until stopped, then turn the strip off.
    ///
    /// Device errors end the loop and are returned after the cleanup attempt.
    pub fn execute(mut self) -> Result<()> {
        if let Some(custom_dir) = config::get_custom_config_dir() {
            log_block_start!("Base directory: {}", utils::private_path(&custom_dir));
        }

        log_block_start!(
            "Driving {} strip with {} pixels",
            self.device.name(),
            self.device.pixel_count()
        );

        if self.location.is_none() {
            log_pipe!();
            log_info!("No location configured, night dimming disabled");
        }

        let result = self.clear().and_then(|_| self.main_loop());

        log_block_start!("Shutting down wordclock...");
        let cleanup = self.shutdown();
        if let Err(ref e) = cleanup {
            log_warning!("Failed to turn the strip off: {e}");
        }
        log_end!();

        result.and(cleanup)
    }

    /// Tick once per second until the running flag clears or the time source ends.
    pub fn main_loop(&mut self) -> Result<()> {
        while self.should_continue() {
            let report = self.tick()?;

            if self.debug_enabled && report.changed {
                self.log_tick(&report);
            }

            if !self.should_continue() {
                break;
            }
            self.sleep_until_next_second();
        }
        Ok(())
    }

    /// One render iteration: map the time, plan the fade, and step it until
    /// the strip converges or the loop is cancelled.
    pub fn tick(&mut self) -> Result<TickReport> {
        let now = self.time_source.now();
        let reading = ClockReading::from_time(&now)?;
        let phrase = map_time(&self.table, reading);
        let active = phrase.active_set();

        let night = self.night_window(now);
        let brightness = self.profile.evaluate(now, night.as_ref());
        let on_color = brightness.on_color();

        let changed = active != self.previous;
        if changed && self.dry_run {
            log_block_start!("{} {}", now.format("%H:%M:%S"), phrase.text());
        }

        let mut transition =
            Transition::plan(&self.previous, &active, on_color, self.steps, self.device.as_ref())?;

        let converged = loop {
            let converged = transition.step(self.device.as_mut())?;
            if transition.sub_ticks() > 0 {
                self.device.update()?;
            }
            if converged {
                break true;
            }

            self.time_source.sleep(self.sub_tick);
            self.signal_state.poll(self.debug_enabled);
            if !self.signal_state.is_running() {
                break false;
            }
        };

        self.previous = active;

        Ok(TickReport {
            time: now,
            phrase,
            brightness,
            changed,
            sub_ticks: transition.sub_ticks(),
            converged,
        })
    }

    /// Turn every pixel off, flush, and release the device.
    pub fn shutdown(&mut self) -> Result<()> {
        self.clear()?;
        self.device.close()
    }

    pub fn device(&self) -> &dyn LedDevice {
        self.device.as_ref()
    }

    /// LEDs lit by the last tick.
    pub fn active_set(&self) -> &ActiveSet {
        &self.previous
    }

    fn clear(&mut self) -> Result<()> {
        self.device.set_all(OFF)?;
        self.device.update()
    }

    fn should_continue(&self) -> bool {
        self.signal_state.poll(self.debug_enabled);
        self.signal_state.is_running() && !self.time_source.is_ended()
    }

    fn sleep_until_next_second(&self) {
        let into_second = self.time_source.now().timestamp_subsec_millis() as u64 % TICK_INTERVAL_MS;
        self.time_source
            .sleep(Duration::from_millis(TICK_INTERVAL_MS - into_second));
    }

    /// The solar night containing `now`, if there is a location and solar data.
    fn night_window(&mut self, now: DateTime<Local>) -> Option<TimeWindow> {
        let location = self.location?;
        let solar = self.solar.as_ref();
        let cache = &mut self.solar_cache;

        // Only yesterday, today and tomorrow are ever looked up
        if let Some(oldest) = now.date_naive().pred_opt() {
            cache.retain(|day, _| *day >= oldest);
        }

        TimeWindow::resolve(now, |day| {
            let sunset = cached_solar_times(cache, solar, &location, day)?.sunset;
            let sunrise = cached_solar_times(cache, solar, &location, day.succ_opt()?)?.sunrise;
            TimeWindow::new(sunset, sunrise)
        })
    }

    fn log_tick(&self, report: &TickReport) {
        let factor = |value: Option<f64>| {
            value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
        };

        log_pipe!();
        log_debug!(
            "{} \"{}\"",
            report.time.format("%H:%M:%S"),
            report.phrase.text()
        );
        log_indented!(
            "Brightness: {:.3} (night {}, twilight {})",
            report.brightness.value(),
            factor(report.brightness.night_factor),
            factor(report.brightness.twilight_factor)
        );
        log_indented!(
            "Fade: {} sub-ticks, {}",
            report.sub_ticks,
            if report.converged {
                "converged"
            } else {
                "interrupted"
            }
        );
    }
}

/// Look up solar times for `day`, computing them at most once per day.
fn cached_solar_times(
    cache: &mut BTreeMap<NaiveDate, Option<SolarTimes>>,
    solar: &dyn SolarProvider,
    location: &Location,
    day: NaiveDate,
) -> Option<SolarTimes> {
    *cache.entry(day).or_insert_with(|| {
        let times = solar.solar_times(location, day);
        if times.is_none() {
            log_pipe!();
            log_warning!("No sunrise or sunset on {day}, night dimming skipped");
        }
        times
    })
}

#[cfg(test)]
mod tests;
