//! WS2801 strip on a Linux spidev device.
//!
//! The WS2801 latches after the clock line stays low for 500us, so a frame is
//! simply the raw RGB bytes of every pixel written in one go. The spidev
//! driver is configured by the system (speed, mode); this module only writes
//! to the character device.

use anyhow::{Context, Result};
use smart_leds::RGB8;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{LedDevice, OFF, check_index};

pub struct Ws2801Strip {
    path: PathBuf,
    file: Option<File>,
    pixels: Vec<RGB8>,
    frame: Vec<u8>,
}

impl Ws2801Strip {
    /// Open the spidev device for writing.
    pub fn open(path: impl AsRef<Path>, pixel_count: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open SPI device {}", path.display()))?;

        Ok(Self {
            path,
            file: Some(file),
            pixels: vec![OFF; pixel_count],
            frame: Vec::with_capacity(pixel_count * 3),
        })
    }

    fn encode_frame(&mut self) {
        self.frame.clear();
        for pixel in &self.pixels {
            self.frame.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }
    }
}

impl LedDevice for Ws2801Strip {
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
        Ok(())
    }

    fn set_all(&mut self, color: RGB8) -> Result<()> {
        self.pixels.fill(color);
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        self.encode_frame();
        let file = self
            .file
            .as_mut()
            .with_context(|| format!("SPI device {} is closed", self.path.display()))?;
        file.write_all(&self.frame)
            .and_then(|_| file.flush())
            .with_context(|| format!("Failed to write frame to {}", self.path.display()))
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the handle closes the descriptor
        self.file.take();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ws2801"
    }
}
