//! Static phrase data for the default 40-LED English word grid.
//!
//! Every phrase is a [`Word`] variant so the tables below are checked by the
//! compiler; [`PhraseTable::validate`] then checks the runtime invariants
//! (non-empty buckets, unique LED indices, indices within the strip).

use anyhow::Result;
use std::collections::BTreeMap;

/// A named group of LEDs that lights up one word or fragment of the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    pub name: &'static str,
    pub leds: &'static [usize],
    pub text: &'static str,
}

/// Every phrase on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Word {
    ItIs,
    Half,
    Ten,
    AQuarter,
    Twenty,
    Five,
    Minutes,
    To,
    Past,
    HourOne,
    HourTwo,
    HourThree,
    HourFour,
    HourFive,
    HourSix,
    HourSeven,
    HourEight,
    HourNine,
    HourTen,
    HourEleven,
    HourTwelve,
    OClock,
    Minute1,
    Minute2,
    Minute3,
    Minute4,
}

impl Word {
    pub const ALL: [Word; 26] = [
        Word::ItIs,
        Word::Half,
        Word::Ten,
        Word::AQuarter,
        Word::Twenty,
        Word::Five,
        Word::Minutes,
        Word::To,
        Word::Past,
        Word::HourOne,
        Word::HourTwo,
        Word::HourThree,
        Word::HourFour,
        Word::HourFive,
        Word::HourSix,
        Word::HourSeven,
        Word::HourEight,
        Word::HourNine,
        Word::HourTen,
        Word::HourEleven,
        Word::HourTwelve,
        Word::OClock,
        Word::Minute1,
        Word::Minute2,
        Word::Minute3,
        Word::Minute4,
    ];

    pub fn phrase(self) -> Phrase {
        fn p(name: &'static str, leds: &'static [usize], text: &'static str) -> Phrase {
            Phrase { name, leds, text }
        }

        match self {
            Word::ItIs => p("it is", &[3, 4], "it is"),
            Word::Half => p("half", &[1, 2], "half"),
            Word::Ten => p("ten", &[0], "ten"),
            Word::AQuarter => p("a quarter", &[5, 6, 7], "a quarter"),
            Word::Twenty => p("twenty", &[8, 9], "twenty"),
            Word::Five => p("five", &[13, 14], "five"),
            Word::Minutes => p("minutes", &[11, 12], "minutes"),
            Word::To => p("to", &[10], "to"),
            Word::Past => p("past", &[15, 16], "past"),
            Word::HourOne => p("hour_one", &[17], "one"),
            Word::HourTwo => p("hour_two", &[18], "two"),
            Word::HourThree => p("hour_three", &[21], "three"),
            Word::HourFour => p("hour_four", &[20], "four"),
            Word::HourFive => p("hour_five", &[19], "five"),
            Word::HourSix => p("hour_six", &[22], "six"),
            Word::HourSeven => p("hour_seven", &[23], "seven"),
            Word::HourEight => p("hour_eight", &[24], "eight"),
            Word::HourNine => p("hour_nine", &[28], "nine"),
            Word::HourTen => p("hour_ten", &[27], "ten"),
            Word::HourEleven => p("hour_eleven", &[25, 26], "eleven"),
            Word::HourTwelve => p("hour_twelve", &[29, 30], "twelve"),
            Word::OClock => p("o clock", &[31, 32, 33], "o'clock"),
            Word::Minute1 => p("minute 1", &[37], "."),
            Word::Minute2 => p("minute 2", &[36], "."),
            Word::Minute3 => p("minute 3", &[35], "."),
            Word::Minute4 => p("minute 4", &[34], "."),
        }
    }

    /// True for the twelve hour names.
    pub const fn is_hour(self) -> bool {
        matches!(
            self,
            Word::HourOne
                | Word::HourTwo
                | Word::HourThree
                | Word::HourFour
                | Word::HourFive
                | Word::HourSix
                | Word::HourSeven
                | Word::HourEight
                | Word::HourNine
                | Word::HourTen
                | Word::HourEleven
                | Word::HourTwelve
        )
    }

    /// True for the single-LED minute dots.
    pub const fn is_minute_dot(self) -> bool {
        matches!(
            self,
            Word::Minute1 | Word::Minute2 | Word::Minute3 | Word::Minute4
        )
    }
}

/// Hour (0-12) to the phrase naming it.
const HOURS: [&[Word]; 13] = [
    &[Word::HourTwelve],
    &[Word::HourOne],
    &[Word::HourTwo],
    &[Word::HourThree],
    &[Word::HourFour],
    &[Word::HourFive],
    &[Word::HourSix],
    &[Word::HourSeven],
    &[Word::HourEight],
    &[Word::HourNine],
    &[Word::HourTen],
    &[Word::HourEleven],
    &[Word::HourTwelve],
];

/// Minute bucket (index = bucket / 5) to its phrases.
const MINUTES: [&[Word]; 12] = [
    &[Word::OClock],
    &[Word::Five, Word::Minutes, Word::Past],
    &[Word::Ten, Word::Minutes, Word::Past],
    &[Word::AQuarter, Word::Past],
    &[Word::Twenty, Word::Minutes, Word::Past],
    &[Word::Twenty, Word::Five, Word::Minutes, Word::Past],
    &[Word::Half, Word::Past],
    &[Word::Twenty, Word::Five, Word::Minutes, Word::To],
    &[Word::Twenty, Word::Minutes, Word::To],
    &[Word::AQuarter, Word::To],
    &[Word::Ten, Word::Minutes, Word::To],
    &[Word::Five, Word::Minutes, Word::To],
];

/// Residual minutes 1-4 light these dots, in order.
const MINUTE_DOTS: [Word; 4] = [Word::Minute1, Word::Minute2, Word::Minute3, Word::Minute4];

/// Lookup tables from clock values to phrases.
///
/// Built once at startup and shared immutably for the process lifetime.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    hours: [&'static [Word]; 13],
    minutes: [&'static [Word]; 12],
    dots: [Word; 4],
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self {
            hours: HOURS,
            minutes: MINUTES,
            dots: MINUTE_DOTS,
        }
    }
}

impl PhraseTable {
    pub fn lead_in(&self) -> Word {
        Word::ItIs
    }

    /// Phrases for an hour in 0..=12.
    pub fn hour(&self, hour: u32) -> &'static [Word] {
        self.hours[hour as usize]
    }

    /// Phrases for a minute bucket (a multiple of 5 in 0..=55).
    pub fn minute_bucket(&self, bucket: u32) -> &'static [Word] {
        self.minutes[(bucket / 5) as usize]
    }

    /// The first `residual` minute dots (residual in 0..=4).
    pub fn minute_dots(&self, residual: u32) -> &[Word] {
        &self.dots[..residual as usize]
    }

    /// Highest LED index referenced by any phrase.
    pub fn max_led(&self) -> usize {
        Word::ALL
            .iter()
            .flat_map(|word| word.phrase().leds.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Check the table invariants against a strip of `pixel_count` LEDs.
    pub fn validate(&self, pixel_count: usize) -> Result<()> {
        for (hour, words) in self.hours.iter().enumerate() {
            if words.is_empty() {
                anyhow::bail!("Phrase table has no phrase for hour {}", hour);
            }
        }
        for (index, words) in self.minutes.iter().enumerate() {
            if words.is_empty() {
                anyhow::bail!("Phrase table has no phrase for minute {}", index * 5);
            }
        }
        for dot in self.dots {
            if dot.phrase().leds.len() != 1 {
                anyhow::bail!(
                    "Minute dot '{}' must light exactly one LED",
                    dot.phrase().name
                );
            }
        }

        let mut owners: BTreeMap<usize, &'static str> = BTreeMap::new();
        for word in Word::ALL {
            let phrase = word.phrase();
            for &led in phrase.leds {
                if led >= pixel_count {
                    anyhow::bail!(
                        "Phrase '{}' uses LED {} but the strip only has {} pixels",
                        phrase.name,
                        led,
                        pixel_count
                    );
                }
                if let Some(owner) = owners.insert(led, phrase.name) {
                    anyhow::bail!(
                        "LED {} is shared by phrases '{}' and '{}'",
                        led,
                        owner,
                        phrase.name
                    );
                }
            }
        }

        Ok(())
    }
}
