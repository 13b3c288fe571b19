use maqamctl::notes::PitchClass;
use maqamctl::presets::{find_preset, MaqamPreset, MAQAM_PRESETS};
use maqamctl::tuning::{NoteResolution, ScaleTuning};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_an_involution() {
        for pc in PitchClass::all() {
            let mut tuning = ScaleTuning::new();
            tuning.set_offset(PitchClass::C, -50);
            let before = tuning.clone();

            tuning.toggle_quarter_tone(pc);
            tuning.toggle_quarter_tone(pc);

            assert_eq!(tuning, before, "double toggle of {}", pc);
        }
    }

    #[test]
    fn test_toggle_touches_only_one_note() {
        let mut tuning = ScaleTuning::new();
        tuning.toggle_quarter_tone(PitchClass::E);

        for pc in PitchClass::all() {
            let expected = if pc == PitchClass::E { -50 } else { 0 };
            assert_eq!(tuning.offset(pc), expected);
        }
        assert!(tuning.is_retuned(PitchClass::E));
    }

    #[test]
    fn test_rast_do_preset() {
        let mut tuning = ScaleTuning::new();
        let preset = find_preset("Rast Do (C)").unwrap();
        let report = tuning.apply_preset(preset);

        assert_eq!(tuning.offsets(), &[0, 0, 0, 0, -50, 0, 0, 0, 0, 0, 0, -50]);
        assert_eq!(report.applied(), 2);
        assert_eq!(report.skipped().count(), 0);
    }

    #[test]
    fn test_apply_preset_is_idempotent() {
        for preset in MAQAM_PRESETS.iter() {
            let mut once = ScaleTuning::new();
            once.apply_preset(preset);

            let mut twice = ScaleTuning::new();
            twice.apply_preset(preset);
            twice.apply_preset(preset);

            assert_eq!(once, twice, "preset {}", preset.name);
        }
    }

    #[test]
    fn test_apply_preset_replaces_instead_of_merging() {
        let mut tuning = ScaleTuning::new();
        tuning.toggle_quarter_tone(PitchClass::C);
        tuning.apply_preset(&MAQAM_PRESETS[0]);
        tuning.apply_preset(&MAQAM_PRESETS[1]);

        // Rast Sol: B and F# only
        assert_eq!(tuning.offsets(), &[0, 0, 0, 0, 0, 0, -50, 0, 0, 0, 0, -50]);
    }

    #[test]
    fn test_unknown_note_names_are_skipped() {
        const ODD: MaqamPreset = MaqamPreset {
            name: "Odd",
            description: "Mixed spellings",
            tunings: &[("Eb", -50), ("E", -50), ("b", -50), ("H", -25)],
        };

        let mut tuning = ScaleTuning::new();
        let report = tuning.apply_preset(&ODD);

        assert_eq!(tuning.offsets(), &[0, 0, 0, 0, -50, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            report.resolutions,
            vec![
                NoteResolution::SkippedUnknownName("Eb".to_string()),
                NoteResolution::Applied(PitchClass::E, -50),
                NoteResolution::SkippedUnknownName("b".to_string()),
                NoteResolution::SkippedUnknownName("H".to_string()),
            ]
        );
    }

    #[test]
    fn test_reset() {
        let mut tuning = ScaleTuning::new();
        tuning.apply_preset(&MAQAM_PRESETS[2]);
        tuning.reset();
        assert_eq!(tuning.offsets(), &[0; 12]);
    }

    #[test]
    fn test_model_keeps_out_of_range_values() {
        let mut tuning = ScaleTuning::new();
        let report = tuning.apply_note_offsets([("A", -90)]);
        assert_eq!(tuning.offset("A".parse().unwrap()), -90);
        assert_eq!(report.applied(), 1);
    }
}
