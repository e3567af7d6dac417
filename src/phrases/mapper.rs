//! Wall-clock time to phrase mapping.
//!
//! Minutes are bucketed down to the previous multiple of five; the remaining
//! 0-4 minutes light that many minute dots. Floor bucketing keeps the bucket
//! at or below 55 and the residual non-negative, so 23:58 reads
//! "five minutes to twelve" plus three dots rather than spilling into the
//! next hour.

use anyhow::Result;
use chrono::Timelike;

use super::table::{PhraseTable, Word};
use crate::core::transition::ActiveSet;

/// A validated hour/minute pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    hour: u32,
    minute: u32,
}

impl ClockReading {
    /// Create a reading, rejecting out-of-range values instead of clamping.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 {
            anyhow::bail!("hour must be between 0 and 23 (got {})", hour);
        }
        if minute > 59 {
            anyhow::bail!("minute must be between 0 and 59 (got {})", minute);
        }
        Ok(Self { hour, minute })
    }

    /// Read hour and minute from any chrono time value.
    pub fn from_time<T: Timelike>(time: &T) -> Result<Self> {
        Self::new(time.hour(), time.minute())
    }

    /// Parse `HH:MM`.
    pub fn parse(text: &str) -> Result<Self> {
        let (hour, minute) = text
            .trim()
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("time must be in HH:MM format (got '{}')", text))?;
        let hour = hour
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("invalid hour '{}'", hour))?;
        let minute = minute
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("invalid minute '{}'", minute))?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }
}

/// The resolved sentence for one clock reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePhrase {
    /// Minute rounded down to a multiple of five (0..=55).
    pub minute_bucket: u32,
    /// Minutes past the bucket (0..=4), one dot each.
    pub minute_residual: u32,
    /// Hour shown on the grid (0..=11, 0 reads "twelve").
    pub display_hour: u32,
    /// Ordered phrases: lead-in, bucket phrases, hour, dots.
    pub words: Vec<Word>,
}

impl TimePhrase {
    /// Human readable sentence, e.g. `it is a quarter to three . .`.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|word| word.phrase().text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Union of the LED indices of every phrase.
    pub fn active_set(&self) -> ActiveSet {
        self.words
            .iter()
            .flat_map(|word| word.phrase().leds.iter().copied())
            .collect()
    }
}

/// Map a clock reading to the phrases that spell it.
pub fn map_time(table: &PhraseTable, reading: ClockReading) -> TimePhrase {
    let minute_residual = reading.minute % 5;
    let minute_bucket = reading.minute - minute_residual;

    let mut display_hour = reading.hour % 12;
    if minute_bucket > 30 {
        display_hour = (display_hour + 1) % 12;
    }

    let mut words = vec![table.lead_in()];
    words.extend_from_slice(table.minute_bucket(minute_bucket));
    words.extend_from_slice(table.hour(display_hour));
    words.extend_from_slice(table.minute_dots(minute_residual));

    TimePhrase {
        minute_bucket,
        minute_residual,
        display_hour,
        words,
    }
}
