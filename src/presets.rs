//! Built-in maqam presets.

/// A named scale: note label → cents offset, plus a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaqamPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub tunings: &'static [(&'static str, i32)],
}

impl MaqamPreset {
    /// Short label used on buttons and in menus: the part after the first
    /// word ("Rast Do (C)" → "Do (C)").
    pub fn short_name(&self) -> &'static str {
        self.name
            .split_once(' ')
            .map(|(_, rest)| rest)
            .unwrap_or(self.name)
    }
}

pub static MAQAM_PRESETS: [MaqamPreset; 3] = [
    MaqamPreset {
        name: "Rast Do (C)",
        description: "Rast on C. E and B are lowered by a quarter tone (50 cents flat).",
        tunings: &[("E", -50), ("B", -50)],
    },
    MaqamPreset {
        name: "Rast Sol (G)",
        description: "Rast on G. B and F# are lowered by a quarter tone (50 cents flat).",
        tunings: &[("B", -50), ("F#", -50)],
    },
    MaqamPreset {
        name: "Rast Fa (F)",
        description: "Rast on F. A and E are lowered by a quarter tone (50 cents flat).",
        tunings: &[("A", -50), ("E", -50)],
    },
];

/// Case-insensitive lookup by full name or short name.
pub fn find_preset(name: &str) -> Option<&'static MaqamPreset> {
    let wanted = name.trim();
    MAQAM_PRESETS.iter().find(|p| {
        p.name.eq_ignore_ascii_case(wanted) || p.short_name().eq_ignore_ascii_case(wanted)
    })
}
