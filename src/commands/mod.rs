//! Command-line command handlers for wordclock.
//!
//! Each one-shot command lives in its own submodule.

pub mod phrase;
pub mod simulate;
