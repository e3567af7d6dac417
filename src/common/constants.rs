//! Application-wide defaults and validation limits.

// # Application Configuration Defaults

pub const DEFAULT_DEVICE: crate::config::Device = crate::config::Device::Dummy;
pub const DEFAULT_SPI_DEVICE: &str = "/dev/spidev0.0";
pub const DEFAULT_PIXEL_COUNT: usize = 40;

pub const DEFAULT_FADE_IN_STEP: u8 = 3;
pub const DEFAULT_FADE_OUT_STEP: u8 = 12;
pub const DEFAULT_SUB_TICK_MS: u64 = 30;

pub const DEFAULT_TWILIGHT_START: &str = "21:00:00";
pub const DEFAULT_TWILIGHT_END: &str = "07:00:00";
pub const DEFAULT_TWILIGHT_SCALE: f64 = 0.90;
pub const DEFAULT_NIGHT_SCALE: f64 = 0.95;

// # Validation Limits

pub const MINIMUM_FADE_STEP: u8 = 1;
pub const MINIMUM_SUB_TICK_MS: u64 = 1;
pub const MAXIMUM_SUB_TICK_MS: u64 = 1000;

/// Dimming scales must stay below 1.0 so brightness never reaches zero.
pub const MINIMUM_SCALE: f64 = 0.0;
pub const MAXIMUM_SCALE: f64 = 1.0;

// # Rendering

/// Period of the render loop.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Color channel value of a fully lit LED before dimming.
pub const FULL_CHANNEL: u8 = 255;

/// Width of the night gaussian over the normalized progress range [-1, 1].
pub const NIGHT_CURVE_SIGMA: f64 = 0.37;

/// Y control points of the twilight bezier: a quick overshoot right after the
/// window opens, a plateau, and a single drop at the very end.
pub const TWILIGHT_CONTROL_POINTS: [f64; 11] = [0.0, 1.2, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0];

// # Exit Codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
