//! Implementation of the `phrase` command: print the sentence and LEDs for a time.

use anyhow::{Context, Result};

use crate::phrases::{ClockReading, PhraseTable, TimePhrase, map_time};

/// Resolve the phrase shown at `time` (`HH:MM`).
pub fn phrase_for(time: &str) -> Result<TimePhrase> {
    let reading = ClockReading::parse(time).context("Invalid time")?;
    Ok(map_time(&PhraseTable::default(), reading))
}

/// Handle the phrase command.
pub fn handle_phrase_command(time: &str) -> Result<()> {
    let phrase = phrase_for(time)?;

    log_version!();
    log_block_start!("{} reads \"{}\"", time.trim(), phrase.text());
    for word in &phrase.words {
        let entry = word.phrase();
        log_indented!("{:<12} LEDs {:?}", entry.text, entry.leds);
    }
    let leds: Vec<String> = phrase.active_set().iter().map(|i| i.to_string()).collect();
    log_decorated!("Active set: {}", leds.join(", "));
    log_end!();

    Ok(())
}
