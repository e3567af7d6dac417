//! Implementation of the `simulate` command.
//!
//! Runs the render loop in dry-run mode on a fast-forward clock between two
//! local times, so a whole night of phrase changes and dimming can be checked
//! in a few seconds.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use std::sync::Arc;

use crate::brightness::window::local_datetime;
use crate::time::SimulatedTimeSource;
use crate::wordclock::WordClock;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a local date and time in `YYYY-MM-DD HH:MM:SS` format.
///
/// Times skipped by a DST gap resolve an hour later.
pub fn parse_local_datetime(text: &str) -> Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), DATETIME_FORMAT)
        .with_context(|| format!("'{}' is not in YYYY-MM-DD HH:MM:SS format", text))?;
    local_datetime(naive.date(), naive.time())
        .with_context(|| format!("'{}' does not exist in the local timezone", text))
}

/// Handle the simulate command.
///
/// # Arguments
/// * `start_time` - Start time in format "YYYY-MM-DD HH:MM:SS"
/// * `end_time` - End time in format "YYYY-MM-DD HH:MM:SS"
/// * `debug_enabled` - Whether per-tick brightness details are logged
pub fn handle_simulate_command(
    start_time: &str,
    end_time: &str,
    debug_enabled: bool,
) -> Result<()> {
    let start = parse_local_datetime(start_time).context("Invalid start time")?;
    let end = parse_local_datetime(end_time).context("Invalid end time")?;

    if end <= start {
        anyhow::bail!("End time must be after start time");
    }

    log_version!();
    log_block_start!("Simulation Mode");

    let duration = end.signed_duration_since(start);
    log_decorated!(
        "Simulating from {} to {}",
        start.format(DATETIME_FORMAT),
        end.format(DATETIME_FORMAT)
    );
    log_indented!(
        "Total simulated time: {} hours {} minutes",
        duration.num_hours(),
        duration.num_minutes() % 60
    );
    log_indented!("Time acceleration: fast-forward (instant execution)");

    let time_source = Arc::new(SimulatedTimeSource::new(start, end));

    WordClock::new(debug_enabled)
        .dry_run()
        .with_time_source(time_source)
        .without_headers()
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_local_datetime() {
        let parsed = parse_local_datetime("2024-01-15 20:30:05").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.day(), 15);
        assert_eq!(
            (parsed.hour(), parsed.minute(), parsed.second()),
            (20, 30, 5)
        );
    }

    #[test]
    fn test_parse_local_datetime_rejects_other_formats() {
        assert!(parse_local_datetime("2024-01-15 20:30").is_err());
        assert!(parse_local_datetime("15/01/2024 20:30:00").is_err());
        assert!(parse_local_datetime("2024-02-30 12:00:00").is_err());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let err =
            handle_simulate_command("2024-01-16 08:00:00", "2024-01-15 20:00:00", false)
                .unwrap_err();
        assert!(err.to_string().contains("End time must be after start time"));
    }

    #[test]
    fn test_invalid_start_time_is_reported() {
        let err = handle_simulate_command("tonight", "2024-01-15 20:00:00", false).unwrap_err();
        assert!(err.to_string().contains("Invalid start time"));
    }
}
