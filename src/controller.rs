use crate::midi::{MidiEngine, MidiMessage, OutputDevice};
use crate::notes::PitchClass;
use crate::presets::MaqamPreset;
use crate::ribbon::{Ribbon, RibbonEvent};
use crate::transport::{DeviceSelection, SendOutcome, TransportAdapter};
use crate::tuning::{PresetReport, ScaleTuning};
use log::{debug, info, warn};

/// Read-only view of the controller for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub offsets: [i32; 12],
    pub ribbon_position: f32,
    pub selected_device: Option<OutputDevice>,
    pub devices: Vec<OutputDevice>,
}

/// Owns the tuning, the ribbon and the transport. Every tuning mutation
/// is re-encoded and sent before the call returns.
pub struct Controller<E: MidiEngine> {
    tuning: ScaleTuning,
    ribbon: Ribbon,
    transport: TransportAdapter<E>,
    channel: u8,
}

impl<E: MidiEngine> Controller<E> {
    pub fn new(transport: TransportAdapter<E>, channel: u8) -> Self {
        Controller {
            tuning: ScaleTuning::new(),
            ribbon: Ribbon::new(),
            transport,
            channel: channel & 0x0F,
        }
    }

    pub fn tuning(&self) -> &ScaleTuning {
        &self.tuning
    }

    pub fn ribbon_state(&self) -> &Ribbon {
        &self.ribbon
    }

    pub fn transport(&self) -> &TransportAdapter<E> {
        &self.transport
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            offsets: *self.tuning.offsets(),
            ribbon_position: self.ribbon.position(),
            selected_device: self.transport.selected_device().cloned(),
            devices: self.transport.list_devices().to_vec(),
        }
    }

    pub fn toggle_quarter_tone(&mut self, pc: PitchClass) -> SendOutcome {
        self.tuning.toggle_quarter_tone(pc);
        debug!("Toggled {} to {} cents", pc, self.tuning.offset(pc));
        self.sync_tuning()
    }

    pub fn apply_preset(&mut self, preset: &MaqamPreset) -> PresetReport {
        info!("Applying preset '{}'", preset.name);
        let report = self.tuning.apply_preset(preset);
        self.finish_preset(report)
    }

    pub fn apply_note_offsets<'a, I>(&mut self, entries: I) -> PresetReport
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let report = self.tuning.apply_note_offsets(entries);
        self.finish_preset(report)
    }

    pub fn reset_tuning(&mut self) -> SendOutcome {
        self.tuning.reset();
        debug!("Tuning reset");
        self.sync_tuning()
    }

    /// Feeds a ribbon sample through the state machine and sends the
    /// resulting bend. Returns `None` when the event was ignored.
    pub fn ribbon(&mut self, event: RibbonEvent) -> Option<SendOutcome> {
        let value = self.ribbon.handle(event)?;
        Some(self.send(MidiMessage::PitchBend {
            channel: self.channel,
            value,
        }))
    }

    pub fn program_change(&mut self, program: u8) -> SendOutcome {
        self.send(MidiMessage::ProgramChange {
            channel: self.channel,
            program,
        })
    }

    pub fn select_device(&mut self, id: &str) -> DeviceSelection {
        self.transport.select_device(id)
    }

    fn finish_preset(&mut self, report: PresetReport) -> PresetReport {
        for name in report.skipped() {
            warn!("Preset note '{}' is not a known note name, skipped", name);
        }
        self.sync_tuning();
        report
    }

    fn sync_tuning(&mut self) -> SendOutcome {
        self.send(MidiMessage::ScaleTuning(*self.tuning.offsets()))
    }

    fn send(&mut self, message: MidiMessage) -> SendOutcome {
        debug!("Sending {:?}", message);
        self.transport.send(&message.to_bytes())
    }
}
