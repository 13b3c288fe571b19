use std::error::Error;
use std::fmt;

use super::pitch_bend::{encode_pitch_bend, encode_program_change};
use super::sysex::encode_scale_tuning;

/// Custom error type for MIDI operations
#[derive(Debug, Clone, PartialEq)]
pub enum MidiError {
    /// The host has no usable MIDI subsystem
    Unavailable(String),
    /// The host refused access to the MIDI subsystem
    AccessDenied(String),
    /// Error when binding an output port
    ConnectionError(String),
    /// Error when sending a MIDI message
    SendError(String),
    /// No output with the given id
    DeviceNotFound(String),
}

impl MidiError {
    /// Capability and access failures are the only ones shown to the user.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, MidiError::Unavailable(_) | MidiError::AccessDenied(_))
    }
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::Unavailable(msg) => write!(f, "MIDI is not available: {}", msg),
            MidiError::AccessDenied(msg) => write!(f, "MIDI access denied: {}", msg),
            MidiError::ConnectionError(msg) => write!(f, "MIDI connection error: {}", msg),
            MidiError::SendError(msg) => write!(f, "MIDI send error: {}", msg),
            MidiError::DeviceNotFound(id) => write!(f, "MIDI output '{}' not found", id),
        }
    }
}

impl Error for MidiError {}

impl From<midir::InitError> for MidiError {
    fn from(e: midir::InitError) -> Self {
        MidiError::Unavailable(e.to_string())
    }
}

impl From<midir::PortInfoError> for MidiError {
    fn from(e: midir::PortInfoError) -> Self {
        MidiError::ConnectionError(e.to_string())
    }
}

impl<T> From<midir::ConnectError<T>> for MidiError {
    fn from(e: midir::ConnectError<T>) -> Self {
        MidiError::ConnectionError(e.to_string())
    }
}

impl From<midir::SendError> for MidiError {
    fn from(e: midir::SendError) -> Self {
        MidiError::SendError(e.to_string())
    }
}

/// Result type for MIDI operations
pub type Result<T> = std::result::Result<T, MidiError>;

/// A MIDI destination as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDevice {
    pub id: String,
    pub name: String,
}

impl OutputDevice {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        OutputDevice {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for OutputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Messages this controller emits
#[derive(Debug, Clone, PartialEq)]
pub enum MidiMessage {
    /// MTS scale/octave tuning, 1-byte form, cents per semitone C..B
    ScaleTuning([i32; 12]),
    /// Pitch bend with a 14-bit value, 8192 is center
    PitchBend { channel: u8, value: u16 },
    /// Program change
    ProgramChange { channel: u8, program: u8 },
}

impl MidiMessage {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            MidiMessage::ScaleTuning(offsets) => encode_scale_tuning(offsets).to_vec(),
            MidiMessage::PitchBend { channel, value } => {
                encode_pitch_bend(*value, *channel).to_vec()
            }
            MidiMessage::ProgramChange { channel, program } => {
                encode_program_change(*program, *channel).to_vec()
            }
        }
    }
}

/// The host MIDI subsystem: enumerate outputs, bind one by id, send bytes
/// on the bound endpoint.
pub trait MidiEngine: Send {
    /// Queries the available output endpoints
    fn list_outputs(&mut self) -> Result<Vec<OutputDevice>>;

    /// Binds the output with the given id, replacing any previous binding
    fn bind(&mut self, id: &str) -> Result<()>;

    /// Drops the current binding, if any
    fn unbind(&mut self);

    /// Sends raw bytes on the bound output. SysEx is passed through as is.
    fn send(&mut self, bytes: &[u8]) -> Result<()>;
}
