use crate::midi::{MidiEngine, MidiError, OutputDevice, Result};
use std::sync::{Arc, Mutex};

/// Shared record of every message a `MockMidiEngine` sent, tagged with the
/// id of the output it went to.
pub type SentLog = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

/// In-memory engine for tests and dry runs.
pub struct MockMidiEngine {
    devices: Vec<OutputDevice>,
    bound: Option<String>,
    failure: Option<MidiError>,
    bind_failure: Option<MidiError>,
    sent: SentLog,
}

impl MockMidiEngine {
    pub fn new(devices: Vec<OutputDevice>) -> Self {
        MockMidiEngine {
            devices,
            bound: None,
            failure: None,
            bind_failure: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Two devices, "Mock Device 1" (id "mock-1") and "Mock Device 2"
    /// (id "mock-2").
    pub fn with_default_devices() -> Self {
        Self::new(vec![
            OutputDevice::new("mock-1", "Mock Device 1"),
            OutputDevice::new("mock-2", "Mock Device 2"),
        ])
    }

    /// An engine whose enumeration fails with `error`.
    pub fn failing(error: MidiError) -> Self {
        let mut engine = Self::new(Vec::new());
        engine.failure = Some(error);
        engine
    }

    /// Lists devices normally but refuses every `bind` with `error`.
    pub fn with_bind_failure(mut self, error: MidiError) -> Self {
        self.bind_failure = Some(error);
        self
    }

    pub fn sent_log(&self) -> SentLog {
        Arc::clone(&self.sent)
    }

    pub fn bound(&self) -> Option<&str> {
        self.bound.as_deref()
    }
}

impl MidiEngine for MockMidiEngine {
    fn list_outputs(&mut self) -> Result<Vec<OutputDevice>> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.devices.clone()),
        }
    }

    fn bind(&mut self, id: &str) -> Result<()> {
        self.bound = None;
        if let Some(error) = &self.bind_failure {
            return Err(error.clone());
        }
        if self.devices.iter().any(|d| d.id == id) {
            self.bound = Some(id.to_string());
            Ok(())
        } else {
            Err(MidiError::DeviceNotFound(id.to_string()))
        }
    }

    fn unbind(&mut self) {
        self.bound = None;
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let id = self
            .bound
            .clone()
            .ok_or_else(|| MidiError::SendError("MIDI output not connected".to_string()))?;
        self.sent
            .lock()
            .map_err(|_| MidiError::SendError("sent log poisoned".to_string()))?
            .push((id, bytes.to_vec()));
        Ok(())
    }
}
