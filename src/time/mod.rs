//! Time handling: real and simulated clocks.

pub mod source;

pub use source::{RealTimeSource, SimulatedTimeSource, TimeSource};
