use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone};
use std::sync::Arc;
use std::time::Duration;
use wordclock::{
    BrightnessLevel, BrightnessProfile, ClockReading, Core, CoreParams, PhraseTable, map_time,
    core::transition::FadeSteps,
    device::{DummyStrip, LedDevice, OFF},
    geo::{Location, SolarProvider, SunriseProvider},
    io::signals::SignalState,
    time::{SimulatedTimeSource, TimeSource},
};

const STOCKHOLM: (f64, f64) = (59.3293, 18.0686);

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

fn core_for(
    time_source: Arc<SimulatedTimeSource>,
    location: Option<Location>,
) -> Core {
    Core::new(CoreParams {
        device: Box::new(DummyStrip::new(40)),
        table: PhraseTable::default(),
        profile: BrightnessProfile::default(),
        steps: FadeSteps {
            fade_in: 3,
            fade_out: 12,
        },
        sub_tick: Duration::from_millis(30),
        location,
        solar: Box::new(SunriseProvider),
        time_source,
        signal_state: SignalState::detached(),
        debug_enabled: false,
        dry_run: true,
    })
}

fn lit_pixels(device: &dyn LedDevice) -> Vec<usize> {
    (0..device.pixel_count())
        .filter(|&index| device.get_pixel(index).unwrap() != OFF)
        .collect()
}

#[test]
fn test_midday_phrase_lights_at_full_brightness() {
    let start = at(15, 12, 10);
    let time_source = Arc::new(SimulatedTimeSource::new(start, start + ChronoDuration::hours(1)));
    let mut core = core_for(time_source, None);

    let report = core.tick().unwrap();
    assert_eq!(report.phrase.text(), "it is ten minutes past twelve");
    assert_eq!(report.brightness, BrightnessLevel::FULL);

    let expected: Vec<usize> = report.phrase.active_set().iter().collect();
    assert_eq!(lit_pixels(core.device()), expected);
    for index in expected {
        let color = core.device().get_pixel(index).unwrap();
        assert_eq!((color.r, color.g, color.b), (255, 255, 255));
    }
}

#[test]
fn test_winter_night_dims_the_phrase() {
    let location = Location::new(STOCKHOLM.0, STOCKHOLM.1).unwrap();
    let today = at(15, 12, 0).date_naive();
    let sunset = SunriseProvider.solar_times(&location, today).unwrap().sunset;
    let sunrise = SunriseProvider
        .solar_times(&location, today.succ_opt().unwrap())
        .unwrap()
        .sunrise;
    // Middle of the solar night
    let start = sunset + (sunrise - sunset) / 2;
    let time_source = Arc::new(SimulatedTimeSource::new(start, start + ChronoDuration::hours(1)));
    let mut core = core_for(time_source, Some(location));

    let report = core.tick().unwrap();
    assert!(report.converged);
    assert!(report.brightness.night_factor.is_some());

    let on_color = report.brightness.on_color();
    assert!(report.brightness.value() < 0.5);
    assert!(on_color.r < 128);
    for index in report.phrase.active_set().iter() {
        assert_eq!(core.device().get_pixel(index).unwrap(), on_color);
    }
}

#[test]
fn test_simulated_run_ends_and_shutdown_clears_strip() {
    let start = at(15, 12, 0);
    let end = start + ChronoDuration::minutes(3);
    let time_source = Arc::new(SimulatedTimeSource::new(start, end));
    let mut core = core_for(time_source.clone(), None);

    core.main_loop().unwrap();
    assert!(time_source.is_ended());

    // The last tick ran during 12:02
    let last = map_time(&PhraseTable::default(), ClockReading::new(12, 2).unwrap());
    assert_eq!(core.active_set(), &last.active_set());
    assert_eq!(
        lit_pixels(core.device()),
        last.active_set().iter().collect::<Vec<_>>()
    );

    core.shutdown().unwrap();
    assert!(lit_pixels(core.device()).is_empty());
}
