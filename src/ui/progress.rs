use crate::config::Settings;
use crate::event_loop::ControlEvent;
use crate::midi::{bend_amount, RIBBON_CENTER};
use crate::ribbon::{sweep_positions, RibbonEvent};
use crossbeam::channel::{SendError, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;

pub fn create_ribbon_meter() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:40.yellow}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸ "),
    );
    pb.set_prefix("Ribbon");
    update_ribbon_meter(&pb, RIBBON_CENTER);
    pb
}

pub fn update_ribbon_meter(pb: &ProgressBar, position: f32) {
    pb.set_position(position.round().clamp(0.0, 100.0) as u64);
    pb.set_message(format!("{:+}", bend_amount(position)));
}

/// Drags the ribbon from center to `target`, holds, and releases. Every
/// sample goes to the event loop as a ribbon event.
pub fn sweep_ribbon(
    tx: &Sender<ControlEvent>,
    target: f32,
    settings: &Settings,
) -> Result<(), SendError<ControlEvent>> {
    let meter = create_ribbon_meter();
    let step = Duration::from_millis(settings.ribbon_step_ms);

    tx.send(ControlEvent::Ribbon(RibbonEvent::Start(RIBBON_CENTER)))?;
    for position in sweep_positions(RIBBON_CENTER, target, settings.ribbon_steps) {
        thread::sleep(step);
        tx.send(ControlEvent::Ribbon(RibbonEvent::Move(position)))?;
        update_ribbon_meter(&meter, position);
    }

    thread::sleep(Duration::from_millis(settings.ribbon_hold_ms));
    tx.send(ControlEvent::Ribbon(RibbonEvent::End))?;
    update_ribbon_meter(&meter, RIBBON_CENTER);
    meter.finish_with_message("released");
    Ok(())
}
