//! Canonical pitch-class table.
//!
//! Maps the twelve chromatic semitone indices (0 = C .. 11 = B) to their
//! sharp-spelled labels and back. Preset note names are resolved through
//! this table only, so flat spellings such as "Db" never resolve.

use std::fmt;
use std::str::FromStr;

pub const NOTE_LABELS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the twelve semitones of the octave. Always in 0..12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const E: PitchClass = PitchClass(4);
    pub const B: PitchClass = PitchClass(11);

    pub fn from_index(index: usize) -> Option<Self> {
        if index < NOTE_LABELS.len() {
            Some(PitchClass(index as u8))
        } else {
            None
        }
    }

    /// Looks a label up in the canonical table. Exact match only.
    pub fn from_label(label: &str) -> Option<Self> {
        NOTE_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| PitchClass(i as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn label(self) -> &'static str {
        NOTE_LABELS[self.index()]
    }

    pub fn is_black_key(self) -> bool {
        matches!(self.0, 1 | 3 | 6 | 8 | 10)
    }

    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12u8).map(PitchClass)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a canonical label ("F#") or a semitone index ("6").
impl FromStr for PitchClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(pc) = PitchClass::from_label(trimmed) {
            return Ok(pc);
        }
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(PitchClass::from_index)
            .ok_or_else(|| {
                format!(
                    "'{}' is not a note; expected one of {} or 0-11",
                    s,
                    NOTE_LABELS.join(" ")
                )
            })
    }
}
