//! LED strip abstraction.
//!
//! The render loop drives the strip exclusively through the [`LedDevice`]
//! trait: it reads the current color of a pixel, writes new colors, and
//! flushes once per sub-tick. Transport errors surface as `anyhow` errors and
//! are propagated to the caller; the renderer never retries a write.
//!
//! ## Devices
//!
//! - [`dummy::DummyStrip`]: in-memory strip for dry runs, simulation and tests
//! - [`ws2801::Ws2801Strip`]: WS2801 strip on a Linux spidev character device

use anyhow::Result;
use smart_leds::RGB8;

use crate::config::{Config, Device};
use crate::common::constants::*;

pub mod dummy;
pub mod ws2801;

pub use dummy::DummyStrip;
pub use ws2801::Ws2801Strip;

/// Color of an unlit pixel.
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Trait for LED strips addressed by pixel index.
#[cfg_attr(test, mockall::automock)]
pub trait LedDevice {
    /// Number of addressable pixels.
    fn pixel_count(&self) -> usize;

    /// Current (not yet necessarily flushed) color of a pixel.
    fn get_pixel(&self, index: usize) -> Result<RGB8>;

    /// Set the color of a pixel in the frame buffer.
    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<()>;

    /// Set every pixel to the same color.
    fn set_all(&mut self, color: RGB8) -> Result<()>;

    /// Push the frame buffer to the hardware.
    fn update(&mut self) -> Result<()>;

    /// Release the underlying transport.
    fn close(&mut self) -> Result<()>;

    /// Short human readable name for logs.
    fn name(&self) -> &'static str;
}

/// Create the device selected in the configuration.
///
/// Dry runs always get an in-memory strip so real hardware is never touched.
pub fn create_device(config: &Config, dry_run: bool) -> Result<Box<dyn LedDevice>> {
    let pixel_count = config.pixel_count.unwrap_or(DEFAULT_PIXEL_COUNT);
    let device = config.device.unwrap_or(DEFAULT_DEVICE);

    if dry_run {
        return Ok(Box::new(DummyStrip::new(pixel_count)));
    }

    match device {
        Device::Dummy => Ok(Box::new(DummyStrip::new(pixel_count))),
        Device::Ws2801 => {
            let path = config.spi_device.as_deref().unwrap_or(DEFAULT_SPI_DEVICE);
            Ok(Box::new(Ws2801Strip::open(path, pixel_count)?))
        }
    }
}

/// Bounds check shared by the device implementations.
pub(crate) fn check_index(index: usize, pixel_count: usize) -> Result<()> {
    if index >= pixel_count {
        anyhow::bail!(
            "pixel index {} out of range for a strip of {} pixels",
            index,
            pixel_count
        );
    }
    Ok(())
}
