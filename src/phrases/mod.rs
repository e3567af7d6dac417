//! Time phrases for the word grid.
//!
//! - [`table`]: the static phrase data and lookup tables
//! - [`mapper`]: hour/minute to ordered phrase list

pub mod mapper;
pub mod table;

pub use mapper::{ClockReading, TimePhrase, map_time};
pub use table::{Phrase, PhraseTable, Word};
