//! Sunrise and sunset times for a location.

use chrono::{DateTime, Local, NaiveDate};

use super::Location;

/// Solar events of one day, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarTimes {
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
    pub solar_noon: DateTime<Local>,
}

/// Source of solar event times.
///
/// Returns `None` when the sun does not rise or set on that date (polar day or
/// night) or when the calculation is otherwise unavailable.
#[cfg_attr(test, mockall::automock)]
pub trait SolarProvider {
    fn solar_times(&self, location: &Location, date: NaiveDate) -> Option<SolarTimes>;
}

/// Solar provider backed by the `sunrise` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunriseProvider;

impl SolarProvider for SunriseProvider {
    fn solar_times(&self, location: &Location, date: NaiveDate) -> Option<SolarTimes> {
        use sunrise::{Coordinates, SolarDay, SolarEvent};

        let coord = Coordinates::new(location.latitude, location.longitude)?;
        let solar_day = SolarDay::new(coord, date);
        let sunrise = solar_day.event_time(SolarEvent::Sunrise).with_timezone(&Local);
        let sunset = solar_day.event_time(SolarEvent::Sunset).with_timezone(&Local);

        // Polar days and nights produce degenerate or inverted events
        if sunset <= sunrise {
            return None;
        }

        let solar_noon = sunrise + (sunset - sunrise) / 2;
        Some(SolarTimes {
            sunrise,
            sunset,
            solar_noon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::test_constants::*;
    use chrono::Timelike;

    fn stockholm() -> Location {
        Location::new(TEST_LATITUDE, TEST_LONGITUDE).unwrap()
    }

    #[test]
    fn test_stockholm_has_short_winter_days() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
        let times = SunriseProvider.solar_times(&stockholm(), date).unwrap();

        let daylight = times.sunset - times.sunrise;
        assert!(daylight.num_hours() >= 5 && daylight.num_hours() <= 7, "{daylight}");
        assert!(times.sunrise < times.solar_noon && times.solar_noon < times.sunset);
    }

    #[test]
    fn test_solar_noon_is_midpoint() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let times = SunriseProvider.solar_times(&stockholm(), date).unwrap();

        assert_eq!(
            times.solar_noon - times.sunrise,
            times.sunset - times.solar_noon
        );
        // Solar noon in Stockholm is close to 11:00 UTC.
        let noon_utc = times.solar_noon.with_timezone(&chrono::Utc);
        assert!((10..=11).contains(&noon_utc.hour()), "{noon_utc}");
    }
}
