use crate::midi::{MidiEngine, MidiError, OutputDevice, Result};
use log::{debug, info, warn};
use midir::{MidiOutput, MidiOutputConnection};

const CLIENT_NAME: &str = "maqamctl";
const LISTER_NAME: &str = "maqamctl-port-lister";
const CONNECTION_NAME: &str = "maqamctl-output";

/// `MidiEngine` backed by the platform MIDI API through midir.
pub struct MidirEngine {
    idle: Option<MidiOutput>,
    connection: Option<MidiOutputConnection>,
}

impl MidirEngine {
    /// Opens a client on the host MIDI subsystem. Fails when the platform
    /// has no MIDI support or the sequencer can't be opened.
    pub fn new() -> Result<Self> {
        let output = MidiOutput::new(CLIENT_NAME)?;
        info!("Opened MIDI client '{}'", CLIENT_NAME);
        Ok(MidirEngine {
            idle: Some(output),
            connection: None,
        })
    }

    fn take_output(&mut self) -> Result<MidiOutput> {
        if let Some(output) = self.idle.take() {
            return Ok(output);
        }
        if let Some(conn) = self.connection.take() {
            return Ok(conn.close());
        }
        Ok(MidiOutput::new(CLIENT_NAME)?)
    }
}

impl MidiEngine for MidirEngine {
    fn list_outputs(&mut self) -> Result<Vec<OutputDevice>> {
        let midi_out = MidiOutput::new(LISTER_NAME)?;
        let devices: Vec<OutputDevice> = midi_out
            .ports()
            .iter()
            .filter_map(|port| match midi_out.port_name(port) {
                Ok(name) => Some(OutputDevice::new(port.id(), name)),
                Err(e) => {
                    warn!("Skipping output port without a name: {}", e);
                    None
                }
            })
            .collect();
        debug!("Available MIDI output ports: {:?}", devices);
        Ok(devices)
    }

    fn bind(&mut self, id: &str) -> Result<()> {
        let output = self.take_output()?;
        let port = match output.find_port_by_id(id.to_string()) {
            Some(port) => port,
            None => {
                self.idle = Some(output);
                return Err(MidiError::DeviceNotFound(id.to_string()));
            }
        };

        match output.connect(&port, CONNECTION_NAME) {
            Ok(conn) => {
                info!("Connected to MIDI output port: {}", id);
                self.connection = Some(conn);
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                self.idle = Some(e.into_inner());
                Err(MidiError::ConnectionError(message))
            }
        }
    }

    fn unbind(&mut self) {
        if let Some(conn) = self.connection.take() {
            debug!("Closing MIDI output connection");
            self.idle = Some(conn.close());
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let conn = self
            .connection
            .as_mut()
            .ok_or_else(|| MidiError::SendError("MIDI output not connected".to_string()))?;
        conn.send(bytes)?;
        Ok(())
    }
}
