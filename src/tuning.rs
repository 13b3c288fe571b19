use crate::notes::PitchClass;
use crate::presets::MaqamPreset;

/// Offset applied by a quarter-tone toggle, in cents.
pub const QUARTER_TONE_FLAT: i32 = -50;

/// Outcome of resolving one preset entry against the note table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteResolution {
    Applied(PitchClass, i32),
    SkippedUnknownName(String),
}

/// Per-entry record of a preset application, in entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetReport {
    pub resolutions: Vec<NoteResolution>,
}

impl PresetReport {
    pub fn applied(&self) -> usize {
        self.resolutions
            .iter()
            .filter(|r| matches!(r, NoteResolution::Applied(..)))
            .count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.resolutions.iter().filter_map(|r| match r {
            NoteResolution::SkippedUnknownName(name) => Some(name.as_str()),
            NoteResolution::Applied(..) => None,
        })
    }
}

/// Cents offset for each of the twelve semitones, C through B.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaleTuning {
    offsets: [i32; 12],
}

impl ScaleTuning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offsets(&self) -> &[i32; 12] {
        &self.offsets
    }

    pub fn offset(&self, pc: PitchClass) -> i32 {
        self.offsets[pc.index()]
    }

    pub fn set_offset(&mut self, pc: PitchClass, cents: i32) {
        self.offsets[pc.index()] = cents;
    }

    pub fn is_retuned(&self, pc: PitchClass) -> bool {
        self.offset(pc) != 0
    }

    /// Flips a semitone between natural and a quarter-tone flat. Any
    /// non-zero offset counts as retuned and goes back to 0.
    pub fn toggle_quarter_tone(&mut self, pc: PitchClass) {
        let slot = &mut self.offsets[pc.index()];
        *slot = if *slot == 0 { QUARTER_TONE_FLAT } else { 0 };
    }

    pub fn reset(&mut self) {
        self.offsets = [0; 12];
    }

    pub fn apply_preset(&mut self, preset: &MaqamPreset) -> PresetReport {
        self.apply_note_offsets(preset.tunings.iter().copied())
    }

    /// Replaces the whole vector: everything goes to 0, then each entry
    /// whose label resolves is written. Unknown labels are skipped.
    pub fn apply_note_offsets<'a, I>(&mut self, entries: I) -> PresetReport
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        self.reset();
        let resolutions = entries
            .into_iter()
            .map(|(label, cents)| match PitchClass::from_label(label) {
                Some(pc) => {
                    self.set_offset(pc, cents);
                    NoteResolution::Applied(pc, cents)
                }
                None => NoteResolution::SkippedUnknownName(label.to_string()),
            })
            .collect();
        PresetReport { resolutions }
    }
}
