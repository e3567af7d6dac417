use super::*;
use crate::brightness::window::local_datetime;
use crate::common::constants::test_constants::*;
use crate::device::DummyStrip;
use crate::geo::solar::MockSolarProvider;
use crate::time::SimulatedTimeSource;
use chrono::{Duration as ChronoDuration, NaiveTime, TimeZone};
use smart_leds::RGB8;
use std::sync::atomic::Ordering;

const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap()
}

/// Sunset at 16:00, sunrise at 08:00 every day.
fn winter_solar(_: &Location, day: NaiveDate) -> Option<SolarTimes> {
    let sunrise = local_datetime(day, NaiveTime::from_hms_opt(8, 0, 0)?)?;
    let sunset = local_datetime(day, NaiveTime::from_hms_opt(16, 0, 0)?)?;
    Some(SolarTimes {
        sunrise,
        sunset,
        solar_noon: sunrise + (sunset - sunrise) / 2,
    })
}

fn core_at(start: DateTime<Local>, location: Option<Location>, solar: MockSolarProvider) -> Core {
    Core::new(CoreParams {
        device: Box::new(DummyStrip::new(DEFAULT_PIXEL_COUNT)),
        table: PhraseTable::default(),
        profile: BrightnessProfile::default(),
        steps: FadeSteps {
            fade_in: DEFAULT_FADE_IN_STEP,
            fade_out: DEFAULT_FADE_OUT_STEP,
        },
        sub_tick: Duration::from_millis(DEFAULT_SUB_TICK_MS),
        location,
        solar: Box::new(solar),
        time_source: Arc::new(SimulatedTimeSource::new(
            start,
            start + ChronoDuration::hours(1),
        )),
        signal_state: SignalState::detached(),
        debug_enabled: false,
        dry_run: true,
    })
}

fn no_solar() -> MockSolarProvider {
    let mut solar = MockSolarProvider::new();
    solar.expect_solar_times().never();
    solar
}

fn lit_pixels(core: &Core) -> Vec<usize> {
    (0..core.device().pixel_count())
        .filter(|&i| core.device().get_pixel(i).unwrap() != OFF)
        .collect()
}

#[test]
fn test_first_tick_fades_phrase_in_at_full_brightness() {
    let mut core = core_at(at(14, 40, 0), None, no_solar());

    let report = core.tick().unwrap();

    assert_eq!(report.phrase.text(), "it is twenty minutes to three");
    assert!(report.changed);
    assert!(report.converged);
    // ceil(255 / 3)
    assert_eq!(report.sub_ticks, 85);
    assert_eq!(report.brightness, BrightnessLevel::FULL);

    let expected: Vec<usize> = report.phrase.active_set().iter().collect();
    assert_eq!(lit_pixels(&core), expected);
    for index in expected {
        assert_eq!(core.device().get_pixel(index).unwrap(), WHITE);
    }
}

#[test]
fn test_unchanged_minute_is_idle() {
    let mut core = core_at(at(14, 40, 0), None, no_solar());
    core.tick().unwrap();

    let report = core.tick().unwrap();
    assert!(!report.changed);
    assert!(report.converged);
    assert_eq!(report.sub_ticks, 0);
}

#[test]
fn test_minute_change_fades_between_sets() {
    let mut core = core_at(at(14, 44, 50), None, no_solar());
    let first = core.tick().unwrap();
    assert_eq!(first.phrase.minute_residual, 4);

    // The fade-in took ~2.5 simulated seconds; move into 14:45.
    core.time_source.sleep(Duration::from_secs(10));
    let second = core.tick().unwrap();

    assert!(second.changed);
    assert_eq!(second.phrase.text(), "it is a quarter to three");
    // Dots fade out in ceil(255 / 12) sub-ticks; "a quarter" fades in slower.
    assert_eq!(second.sub_ticks, 85);
    let expected: Vec<usize> = second.phrase.active_set().iter().collect();
    assert_eq!(lit_pixels(&core), expected);
}

#[test]
fn test_cancellation_interrupts_fade() {
    let mut core = core_at(at(14, 40, 0), None, no_solar());
    core.signal_state.running.store(false, Ordering::SeqCst);

    let report = core.tick().unwrap();
    assert!(!report.converged);
    assert_eq!(report.sub_ticks, 1);
    assert_eq!(core.active_set(), &report.phrase.active_set());
}

#[test]
fn test_shutdown_turns_everything_off() {
    let mut core = core_at(at(14, 40, 0), None, no_solar());
    core.tick().unwrap();
    assert!(!lit_pixels(&core).is_empty());

    core.shutdown().unwrap();
    assert!(lit_pixels(&core).is_empty());
}

#[test]
fn test_night_curve_uses_cached_solar_times() {
    let mut solar = MockSolarProvider::new();
    // Yesterday, today and tomorrow; the second tick hits the cache.
    solar
        .expect_solar_times()
        .times(3)
        .returning(|location, day| winter_solar(location, day));
    let location = Location::new(TEST_LATITUDE, TEST_LONGITUDE).unwrap();
    let mut core = core_at(at(23, 0, 0), Some(location), solar);

    let report = core.tick().unwrap();
    let night = report.brightness.night_factor.unwrap();
    assert!(night < 0.5, "night factor {night}");
    assert!(report.brightness.twilight_factor.is_some());

    let on_color = report.brightness.on_color();
    for index in report.phrase.active_set().iter() {
        assert_eq!(core.device().get_pixel(index).unwrap(), on_color);
    }

    core.tick().unwrap();
}

#[test]
fn test_missing_solar_data_skips_night_curve() {
    let mut solar = MockSolarProvider::new();
    solar.expect_solar_times().returning(|_, _| None);
    let location = Location::new(TEST_LATITUDE, TEST_LONGITUDE).unwrap();
    let mut core = core_at(at(23, 0, 0), Some(location), solar);

    let report = core.tick().unwrap();
    assert_eq!(report.brightness.night_factor, None);
    assert!(report.brightness.twilight_factor.is_some());
}

#[test]
fn test_main_loop_stops_at_simulation_end() {
    let start = at(14, 40, 0);
    let mut core = Core::new(CoreParams {
        time_source: Arc::new(SimulatedTimeSource::new(
            start,
            start + ChronoDuration::minutes(6),
        )),
        ..params_from(core_at(start, None, no_solar()))
    });

    core.main_loop().unwrap();

    assert!(core.time_source.is_ended());
    let phrase = map_time(
        &PhraseTable::default(),
        ClockReading::new(14, 45).unwrap(),
    );
    // Last tick ran just before 14:46.
    assert_eq!(core.active_set(), &phrase.active_set());
}

/// Rebuild parameters from a core so single fields can be swapped.
fn params_from(core: Core) -> CoreParams {
    CoreParams {
        device: core.device,
        table: core.table,
        profile: core.profile,
        steps: core.steps,
        sub_tick: core.sub_tick,
        location: core.location,
        solar: core.solar,
        time_source: core.time_source,
        signal_state: core.signal_state,
        debug_enabled: core.debug_enabled,
        dry_run: core.dry_run,
    }
}
