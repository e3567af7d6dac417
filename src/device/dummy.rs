//! In-memory LED strip.

use anyhow::Result;
use smart_leds::RGB8;

use super::{LedDevice, OFF, check_index};

/// Strip that only keeps a frame buffer.
///
/// Used for `--dry-run`, simulation and tests. It counts pixel writes and
/// flushes so callers can verify that no redundant writes happen.
#[derive(Debug, Clone)]
pub struct DummyStrip {
    pixels: Vec<RGB8>,
    writes: usize,
    updates: usize,
    closed: bool,
}

impl DummyStrip {
    pub fn new(pixel_count: usize) -> Self {
        Self {
            pixels: vec![OFF; pixel_count],
            writes: 0,
            updates: 0,
            closed: false,
        }
    }

    /// Number of `set_pixel` calls so far (`set_all` counts once per pixel).
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }
}

impl LedDevice for DummyStrip {
    fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    fn get_pixel(&self, index: usize) -> Result<RGB8> {
        check_index(index, self.pixels.len())?;
        Ok(self.pixels[index])
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) -> Result<()> {
        check_index(index, self.pixels.len())?;
        self.pixels[index] = color;
        self.writes += 1;
        Ok(())
    }

    fn set_all(&mut self, color: RGB8) -> Result<()> {
        self.pixels.fill(color);
        self.writes += self.pixels.len();
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        if self.closed {
            anyhow::bail!("update on a closed strip");
        }
        self.updates += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dummy"
    }
}
