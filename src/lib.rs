pub mod assistant;
pub mod cli;
pub mod config;
pub mod controller;
pub mod event_loop;
pub mod logging;
pub mod midi;
pub mod notes;
pub mod presets;
pub mod ribbon;
pub mod transport;
pub mod tuning;
pub mod ui;

pub use cli::{validate_device, Args};
pub use controller::{Controller, Snapshot};
pub use event_loop::{ControlEvent, EventLoop};
pub use notes::{PitchClass, NOTE_LABELS};
pub use presets::{find_preset, MaqamPreset, MAQAM_PRESETS};
pub use transport::{DeviceSelection, SendOutcome, TransportAdapter};
pub use tuning::{NoteResolution, PresetReport, ScaleTuning};
