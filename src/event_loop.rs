// event_loop.rs

use crate::controller::{Controller, Snapshot};
use crate::midi::MidiEngine;
use crate::notes::PitchClass;
use crate::presets::MaqamPreset;
use crate::ribbon::RibbonEvent;
use crate::transport::DeviceSelection;
use crossbeam::channel::{Receiver, Sender};
use log::{debug, info, trace, warn};

/// Gestures and commands coming from the UI.
#[derive(Debug)]
pub enum ControlEvent {
    ToggleQuarterTone(PitchClass),
    ApplyPreset(&'static MaqamPreset),
    ApplyNoteOffsets(Vec<(String, i32)>),
    ResetTuning,
    Ribbon(RibbonEvent),
    ProgramChange(u8),
    SelectDevice(String),
    /// Reply with the controller state once every earlier event is applied.
    Snapshot(Sender<Snapshot>),
    Shutdown,
}

/// Owns the controller and applies events one at a time, in order.
pub struct EventLoop<E: MidiEngine> {
    controller: Controller<E>,
    rx: Receiver<ControlEvent>,
    coalesce_ribbon_moves: bool,
}

impl<E: MidiEngine> EventLoop<E> {
    pub fn new(controller: Controller<E>, rx: Receiver<ControlEvent>) -> Self {
        EventLoop {
            controller,
            rx,
            coalesce_ribbon_moves: true,
        }
    }

    /// When on, a burst of queued ribbon moves is collapsed to the last one.
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce_ribbon_moves = enabled;
        self
    }

    /// Runs until `Shutdown` or until every sender is gone, then hands the
    /// controller back.
    pub fn run(mut self) -> Controller<E> {
        info!("Event loop started");
        let mut pending: Option<ControlEvent> = None;

        loop {
            let event = match pending.take() {
                Some(event) => event,
                None => match self.rx.recv() {
                    Ok(event) => event,
                    Err(_) => {
                        debug!("Control channel closed");
                        break;
                    }
                },
            };

            let event = if self.coalesce_ribbon_moves {
                self.coalesce(event, &mut pending)
            } else {
                event
            };

            if !self.dispatch(event) {
                break;
            }
        }

        info!("Event loop stopped");
        self.controller
    }

    fn coalesce(&self, event: ControlEvent, pending: &mut Option<ControlEvent>) -> ControlEvent {
        let mut latest = match event {
            ControlEvent::Ribbon(RibbonEvent::Move(x)) => x,
            other => return other,
        };

        let mut dropped = 0usize;
        while let Ok(next) = self.rx.try_recv() {
            match next {
                ControlEvent::Ribbon(RibbonEvent::Move(x)) => {
                    latest = x;
                    dropped += 1;
                }
                other => {
                    *pending = Some(other);
                    break;
                }
            }
        }
        if dropped > 0 {
            trace!("Coalesced {} ribbon sample(s)", dropped);
        }
        ControlEvent::Ribbon(RibbonEvent::Move(latest))
    }

    fn dispatch(&mut self, event: ControlEvent) -> bool {
        trace!("Dispatching {:?}", event);
        match event {
            ControlEvent::ToggleQuarterTone(pc) => {
                self.controller.toggle_quarter_tone(pc);
            }
            ControlEvent::ApplyPreset(preset) => {
                self.controller.apply_preset(preset);
            }
            ControlEvent::ApplyNoteOffsets(entries) => {
                self.controller
                    .apply_note_offsets(entries.iter().map(|(name, cents)| (name.as_str(), *cents)));
            }
            ControlEvent::ResetTuning => {
                self.controller.reset_tuning();
            }
            ControlEvent::Ribbon(ribbon_event) => {
                self.controller.ribbon(ribbon_event);
            }
            ControlEvent::ProgramChange(program) => {
                self.controller.program_change(program);
            }
            ControlEvent::SelectDevice(id) => {
                if let DeviceSelection::Unresolved(id) = self.controller.select_device(&id) {
                    warn!("Output '{}' could not be selected; sends will be dropped", id);
                }
            }
            ControlEvent::Snapshot(reply) => {
                if reply.send(self.controller.snapshot()).is_err() {
                    debug!("Snapshot requester went away");
                }
            }
            ControlEvent::Shutdown => return false,
        }
        true
    }
}
