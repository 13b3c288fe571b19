//! MIDI functionality for maqamctl
//!
//! This module provides the MIDI side of the controller, including:
//! - The MTS scale/octave tuning SysEx codec
//! - Pitch bend and program change encoding
//! - Real MIDI output via midir
//! - A mock engine for testing
//!
//! The main components are:
//! - [`MidiEngine`] trait for enumerating, binding and sending to outputs
//! - [`MidirEngine`] for real MIDI device communication
//! - [`MockMidiEngine`] for testing
//! - [`encode_scale_tuning`] and [`encode_pitch_bend`] for the wire format
//!
mod engine;
pub mod midir_engine;
pub mod mock_engine;
pub mod pitch_bend;
pub mod sysex;

pub use engine::{MidiEngine, MidiError, MidiMessage, OutputDevice, Result};

pub use midir_engine::MidirEngine;
pub use mock_engine::{MockMidiEngine, SentLog};

pub use pitch_bend::{
    bend_amount, encode_pitch_bend, encode_program_change, ribbon_to_bend, PITCH_BEND_CENTER,
    PITCH_BEND_MAX, RIBBON_CENTER,
};
pub use sysex::{encode_scale_tuning, tuning_byte, SCALE_TUNING_MESSAGE_LEN, TUNING_DATA_OFFSET};

// Set default engine type
pub type DefaultMidiEngine = MidirEngine;
