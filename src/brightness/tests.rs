use super::window::daily_instance;
use super::*;
use chrono::{Duration, NaiveDate, TimeZone};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Sunset at 16:00, sunrise at 08:00 the next day.
fn winter_night(day: NaiveDate) -> Option<TimeWindow> {
    let sunset = window::local_datetime(day, time(16, 0))?;
    let sunrise = window::local_datetime(day.succ_opt()?, time(8, 0))?;
    TimeWindow::new(sunset, sunrise)
}

#[test]
fn test_full_brightness_at_midday() {
    let profile = BrightnessProfile::default();
    let level = profile.evaluate(at(2024, 1, 15, 12, 0, 0), None);

    assert_eq!(level, BrightnessLevel::FULL);
    assert_eq!(level.value(), 1.0);
    assert_eq!(level.on_color(), RGB8::new(255, 255, 255));
}

#[test]
fn test_twilight_window_crosses_midnight() {
    let profile = BrightnessProfile::default();

    let window = profile.twilight_window(at(2024, 1, 16, 2, 0, 0)).unwrap();
    assert_eq!(window.start, at(2024, 1, 15, 21, 0, 0));
    assert_eq!(window.end, at(2024, 1, 16, 7, 0, 0));

    let window = profile.twilight_window(at(2024, 1, 15, 22, 0, 0)).unwrap();
    assert_eq!(window.start, at(2024, 1, 15, 21, 0, 0));
    assert_eq!(window.end, at(2024, 1, 16, 7, 0, 0));
}

#[test]
fn test_window_boundaries_are_exclusive() {
    let profile = BrightnessProfile::default();
    assert!(profile.twilight_window(at(2024, 1, 15, 21, 0, 0)).is_none());
    assert!(profile.twilight_window(at(2024, 1, 16, 7, 0, 0)).is_none());
    assert!(profile.twilight_window(at(2024, 1, 15, 21, 0, 1)).is_some());
}

#[test]
fn test_same_day_window() {
    let now = at(2024, 1, 15, 14, 0, 0);
    let window = TimeWindow::daily(time(13, 0), time(15, 0), now).unwrap();
    assert_eq!(window.start, at(2024, 1, 15, 13, 0, 0));
    assert_eq!(window.end, at(2024, 1, 15, 15, 0, 0));

    assert!(TimeWindow::daily(time(13, 0), time(15, 0), at(2024, 1, 15, 16, 0, 0)).is_none());
    assert!(TimeWindow::daily(time(13, 0), time(15, 0), at(2024, 1, 15, 2, 0, 0)).is_none());
}

#[test]
fn test_equal_start_and_end_spans_a_full_day() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let window = daily_instance(day, time(9, 0), time(9, 0)).unwrap();
    assert_eq!(window.duration(), Duration::hours(24));
}

#[test]
fn test_solar_night_resolves_to_previous_evening() {
    let window = TimeWindow::resolve(at(2024, 1, 16, 2, 0, 0), winter_night).unwrap();
    assert_eq!(window.start, at(2024, 1, 15, 16, 0, 0));
    assert_eq!(window.end, at(2024, 1, 16, 8, 0, 0));

    assert!(TimeWindow::resolve(at(2024, 1, 16, 12, 0, 0), winter_night).is_none());
    assert!(TimeWindow::resolve(at(2024, 1, 16, 12, 0, 0), |_| None).is_none());
}

#[test]
fn test_night_curve_is_symmetric() {
    let profile = BrightnessProfile::default();
    let night = winter_night(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap();

    for minutes in [1, 30, 90, 240, 479] {
        let delta = Duration::minutes(minutes);
        let after_sunset = profile.evaluate(night.start + delta, Some(&night));
        let before_sunrise = profile.evaluate(night.end - delta, Some(&night));
        assert_eq!(after_sunset.night_factor, before_sunrise.night_factor);
    }

    let midpoint = night.start + night.duration() / 2;
    let deepest = profile.evaluate(midpoint, Some(&night)).night_factor.unwrap();
    assert!((deepest - 0.05).abs() < 1e-9);
}

#[test]
fn test_night_window_outside_now_is_ignored() {
    let profile = BrightnessProfile::default();
    let night = winter_night(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap();
    let level = profile.evaluate(at(2024, 1, 16, 12, 0, 0), Some(&night));
    assert_eq!(level.night_factor, None);
}

#[test]
fn test_curves_are_independent() {
    let profile = BrightnessProfile::default();
    let night = winter_night(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap();

    for hour in [17, 20, 22, 23] {
        let now = at(2024, 1, 15, hour, 10, 0);
        let with_night = profile.evaluate(now, Some(&night));
        let without_night = profile.evaluate(now, None);

        assert_eq!(with_night.twilight_factor, without_night.twilight_factor);
        assert!(with_night.night_factor.is_some());
        assert_eq!(without_night.night_factor, None);
    }

    // Twilight settings never alter the night factor.
    let now = at(2024, 1, 15, 18, 0, 0);
    let no_twilight = BrightnessProfile {
        twilight_scale: 0.0,
        ..profile
    };
    assert_eq!(
        profile.evaluate(now, Some(&night)).night_factor,
        no_twilight.evaluate(now, Some(&night)).night_factor
    );
}

#[test]
fn test_twilight_drops_fast_and_recovers_slowly() {
    let profile = BrightnessProfile::default();
    let start = at(2024, 1, 15, 21, 0, 0);
    let factor_at = |minute: i64| {
        profile
            .evaluate(start + Duration::minutes(minute) + Duration::seconds(30), None)
            .twilight_factor
            .unwrap()
    };

    // First quarter of the ten hour window.
    for minute in 1..150 {
        assert!(factor_at(minute) <= factor_at(minute - 1), "minute {minute}");
    }
    // Second half.
    for minute in 301..600 {
        assert!(factor_at(minute) >= factor_at(minute - 1), "minute {minute}");
    }

    assert!(factor_at(60) < 0.4);
    assert!((factor_at(300) - 0.1).abs() < 1e-3);
}

#[test]
fn test_twilight_uses_whole_minutes() {
    let profile = BrightnessProfile::default();
    let start = at(2024, 1, 15, 21, 0, 0);

    let early = profile.evaluate(start + Duration::seconds(61), None);
    let late = profile.evaluate(start + Duration::seconds(119), None);
    assert_eq!(early.twilight_factor, late.twilight_factor);
}

#[test]
fn test_on_color_truncates() {
    let level = BrightnessLevel {
        night_factor: Some(0.5),
        twilight_factor: None,
    };
    assert_eq!(level.on_color(), RGB8::new(127, 127, 127));

    let level = BrightnessLevel {
        night_factor: Some(0.5),
        twilight_factor: Some(0.5),
    };
    assert_eq!(level.value(), 0.25);
    assert_eq!(level.on_color(), RGB8::new(63, 63, 63));
}

#[test]
fn test_profile_from_config() {
    let config = Config {
        twilight_start: Some("22:30:00".to_string()),
        twilight_scale: Some(0.5),
        ..Config::default()
    };
    let profile = BrightnessProfile::from_config(&config).unwrap();

    assert_eq!(profile.twilight_start, NaiveTime::from_hms_opt(22, 30, 0).unwrap());
    assert_eq!(profile.twilight_end, time(7, 0));
    assert_eq!(profile.twilight_scale, 0.5);
    assert_eq!(profile.night_scale, DEFAULT_NIGHT_SCALE);

    let config = Config {
        twilight_end: Some("7am".to_string()),
        ..Config::default()
    };
    let err = BrightnessProfile::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("twilight_end"));
}
