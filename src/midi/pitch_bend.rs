pub const PITCH_BEND_STATUS: u8 = 0xE0;
pub const PROGRAM_CHANGE_STATUS: u8 = 0xC0;

pub const PITCH_BEND_MAX: u16 = 16383;
pub const PITCH_BEND_CENTER: u16 = 8192;

/// Ribbon rest position, in percent.
pub const RIBBON_CENTER: f32 = 50.0;

pub fn encode_pitch_bend(value: u16, channel: u8) -> [u8; 3] {
    [
        PITCH_BEND_STATUS | (channel & 0x0F),
        (value & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
    ]
}

pub fn encode_program_change(program: u8, channel: u8) -> [u8; 2] {
    [PROGRAM_CHANGE_STATUS | (channel & 0x0F), program & 0x7F]
}

/// Linear map of a ribbon position (percent) onto the 14-bit bend range.
pub fn ribbon_to_bend(percent: f32) -> u16 {
    let percent = if percent.is_nan() {
        RIBBON_CENTER
    } else {
        percent.clamp(0.0, 100.0)
    };
    ((percent / 100.0) * f32::from(PITCH_BEND_MAX)).floor() as u16
}

/// Signed bend amount shown next to the ribbon, -100..=100.
pub fn bend_amount(percent: f32) -> i32 {
    ((percent - RIBBON_CENTER) * 2.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_is_masked_to_four_bits() {
        assert_eq!(encode_pitch_bend(PITCH_BEND_CENTER, 0x1F)[0], 0xEF);
        assert_eq!(encode_program_change(3, 0x13), [0xC3, 3]);
    }

    #[test]
    fn test_ribbon_midpoint_is_just_below_center() {
        // floor(0.5 * 16383) = 8191; release sends the exact center instead.
        assert_eq!(ribbon_to_bend(50.0), 8191);
    }

    #[test]
    fn test_bend_amount() {
        assert_eq!(bend_amount(50.0), 0);
        assert_eq!(bend_amount(100.0), 100);
        assert_eq!(bend_amount(0.0), -100);
        assert_eq!(bend_amount(62.4), 25);
    }
}
