//! MIDI Tuning Standard, Scale/Octave Tuning (1-byte form).
//!
//! `F0 7E <device> 08 08 <mask x 2> <12 x tuning> F7`
//!
//! Each tuning byte is the offset in cents from equal temperament with 64
//! as center, covering -64..=+63 cents.

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;
pub const UNIVERSAL_NON_REALTIME: u8 = 0x7E;
pub const DEVICE_ID_ALL: u8 = 0x7F;
pub const TUNING_SUB_ID: u8 = 0x08;
pub const SCALE_TUNING_1BYTE_SUB_ID: u8 = 0x08;

/// Both mask bytes fully set: the tuning applies to every channel.
pub const ALL_NOTES_MASK: [u8; 2] = [0xFF, 0xFF];

pub const TUNING_CENTER: i32 = 64;

pub const SCALE_TUNING_MESSAGE_LEN: usize = 20;

/// Index of the first tuning data byte within the message.
pub const TUNING_DATA_OFFSET: usize = 7;

/// Maps a cents offset onto a 7-bit data byte, saturating out-of-range
/// values.
pub fn tuning_byte(cents: i32) -> u8 {
    TUNING_CENTER.saturating_add(cents).clamp(0, 127) as u8
}

pub fn encode_scale_tuning(offsets: &[i32; 12]) -> [u8; SCALE_TUNING_MESSAGE_LEN] {
    let mut msg = [0u8; SCALE_TUNING_MESSAGE_LEN];
    msg[..TUNING_DATA_OFFSET].copy_from_slice(&[
        SYSEX_START,
        UNIVERSAL_NON_REALTIME,
        DEVICE_ID_ALL,
        TUNING_SUB_ID,
        SCALE_TUNING_1BYTE_SUB_ID,
        ALL_NOTES_MASK[0],
        ALL_NOTES_MASK[1],
    ]);
    for (slot, cents) in msg[TUNING_DATA_OFFSET..TUNING_DATA_OFFSET + 12]
        .iter_mut()
        .zip(offsets)
    {
        *slot = tuning_byte(*cents);
    }
    msg[SCALE_TUNING_MESSAGE_LEN - 1] = SYSEX_END;
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_tuning_message() {
        assert_eq!(
            encode_scale_tuning(&[0; 12]),
            [
                0xF0, 0x7E, 0x7F, 0x08, 0x08, 0xFF, 0xFF, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40,
                0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0xF7
            ]
        );
    }

    #[test]
    fn test_tuning_byte_saturates() {
        assert_eq!(tuning_byte(i32::MIN), 0);
        assert_eq!(tuning_byte(i32::MAX), 127);
        assert_eq!(tuning_byte(-64), 0);
        assert_eq!(tuning_byte(63), 127);
    }
}
