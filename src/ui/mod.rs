//! User interface components
//!
//! Terminal front end for maqamctl:
//! - A text rendering of the twelve-note tuning
//! - An indicatif meter for the pitch-bend ribbon
//! - A dialoguer menu for interactive sessions
//!
//! The UI never touches the controller directly. It sends `ControlEvent`s
//! and asks the event loop for snapshots.

mod menu;
mod progress;

pub use menu::run_interactive;
pub use progress::{create_ribbon_meter, sweep_ribbon, update_ribbon_meter};

use crate::controller::Snapshot;
use crate::event_loop::ControlEvent;
use crate::notes::PitchClass;
use crossbeam::channel::{bounded, Sender};

/// Two aligned rows: note labels, then cents offsets. Retuned notes are
/// starred.
pub fn render_tuning(offsets: &[i32; 12]) -> String {
    let mut labels = String::new();
    let mut cents = String::new();
    for pc in PitchClass::all() {
        let offset = offsets[pc.index()];
        let mark = if offset != 0 { "*" } else { "" };
        labels.push_str(&format!("{:>5}", format!("{}{}", pc.label(), mark)));
        cents.push_str(&format!("{:>5}", offset));
    }
    format!("{}\n{}", labels.trim_end(), cents.trim_end())
}

/// Blocks until the event loop has applied everything sent before and
/// replied. `None` once the loop is gone.
pub fn request_snapshot(tx: &Sender<ControlEvent>) -> Option<Snapshot> {
    let (reply_tx, reply_rx) = bounded(1);
    tx.send(ControlEvent::Snapshot(reply_tx)).ok()?;
    reply_rx.recv().ok()
}
