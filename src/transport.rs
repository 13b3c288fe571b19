use crate::midi::{MidiEngine, OutputDevice, Result};
use log::{debug, info, warn};

/// Result of a device selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelection {
    Bound(OutputDevice),
    /// The id matched nothing or the bind failed; no output is active.
    Unresolved(String),
}

/// What happened to a message handed to `TransportAdapter::send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// No device selected; the message was dropped.
    NoDevice,
    /// The driver rejected the message. Already logged.
    Failed,
}

/// Owns the engine and the single active output device.
pub struct TransportAdapter<E: MidiEngine> {
    engine: E,
    devices: Vec<OutputDevice>,
    selected: Option<OutputDevice>,
}

impl<E: MidiEngine> TransportAdapter<E> {
    pub fn new(engine: E) -> Self {
        TransportAdapter {
            engine,
            devices: Vec::new(),
            selected: None,
        }
    }

    /// Enumerates outputs. On error the device list is left empty.
    pub fn initialize(&mut self) -> Result<&[OutputDevice]> {
        self.devices.clear();
        let devices = self.engine.list_outputs()?;
        info!("Found {} MIDI output(s)", devices.len());
        self.devices = devices;
        Ok(&self.devices)
    }

    pub fn list_devices(&self) -> &[OutputDevice] {
        &self.devices
    }

    pub fn selected_device(&self) -> Option<&OutputDevice> {
        self.selected.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Maps a user-supplied id or name fragment to a known device id.
    pub fn resolve(&self, query: &str) -> Option<&str> {
        self.devices
            .iter()
            .find(|d| d.id == query)
            .or_else(|| self.devices.iter().find(|d| d.name.contains(query)))
            .map(|d| d.id.as_str())
    }

    pub fn select_device(&mut self, id: &str) -> DeviceSelection {
        self.engine.unbind();
        self.selected = None;

        let Some(device) = self.devices.iter().find(|d| d.id == id).cloned() else {
            debug!("Output '{}' is not among the known devices", id);
            return DeviceSelection::Unresolved(id.to_string());
        };

        match self.engine.bind(&device.id) {
            Ok(()) => {
                info!("Selected MIDI output: {}", device.name);
                self.selected = Some(device.clone());
                DeviceSelection::Bound(device)
            }
            Err(e) => {
                warn!("Could not bind output '{}': {}", device.name, e);
                DeviceSelection::Unresolved(id.to_string())
            }
        }
    }

    /// Binds the first enumerated output, if there is one.
    pub fn select_first(&mut self) -> Option<DeviceSelection> {
        let id = self.devices.first()?.id.clone();
        Some(self.select_device(&id))
    }

    /// Fire-and-forget; there is no delivery confirmation.
    pub fn send(&mut self, bytes: &[u8]) -> SendOutcome {
        if self.selected.is_none() {
            debug!("No output selected, dropping {} byte(s)", bytes.len());
            return SendOutcome::NoDevice;
        }
        match self.engine.send(bytes) {
            Ok(()) => SendOutcome::Sent,
            Err(e) => {
                warn!("{}", e);
                SendOutcome::Failed
            }
        }
    }
}
