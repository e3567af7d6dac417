//! # Wordclock Library
//!
//! Internal library for the wordclock binary.
//!
//! This library exists to enable testing of the render loop internals and to
//! keep CLI dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: [`WordClock`] builder that loads configuration, opens the
//!   device, and runs the loop
//! - **Phrases**: `phrases` maps a wall-clock time to the words that spell it
//! - **Brightness**: `brightness` evaluates the twilight and solar night curves
//! - **Render Loop**: `core` ticks once per second and fades LEDs through
//!   `core::transition`
//! - **Devices**: `device` with the in-memory and WS2801 strips
//! - **Geographic**: `geo` for the location and sunrise/sunset times
//! - **Infrastructure**: configuration, signal handling, time sources, and logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

pub mod args;
pub mod brightness;
pub mod commands;
pub mod config;
pub mod core;
pub mod device;
pub mod geo;
pub mod io;
pub mod phrases;
pub mod time;
mod wordclock;

pub use brightness::{BrightnessLevel, BrightnessProfile};
pub use crate::core::{Core, CoreParams, TickReport};
pub use phrases::{ClockReading, PhraseTable, TimePhrase, map_time};
pub use wordclock::WordClock;
