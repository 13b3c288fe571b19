extern crate maqamctl;

use crossbeam::channel::{bounded, unbounded};
use maqamctl::midi::{encode_scale_tuning, MockMidiEngine, SentLog};
use maqamctl::notes::PitchClass;
use maqamctl::presets::MAQAM_PRESETS;
use maqamctl::ribbon::RibbonEvent;
use maqamctl::{ControlEvent, Controller, EventLoop, TransportAdapter};
use std::thread;

fn bound_controller() -> (Controller<MockMidiEngine>, SentLog) {
    let mut transport = TransportAdapter::new(MockMidiEngine::with_default_devices());
    transport.initialize().unwrap();
    transport.select_first();
    let log = transport.engine().sent_log();
    (Controller::new(transport, 0), log)
}

fn sent_bytes(log: &SentLog) -> Vec<Vec<u8>> {
    log.lock()
        .unwrap()
        .iter()
        .map(|(_, bytes)| bytes.clone())
        .collect()
}

#[test]
fn integration_test_every_mutation_is_sent() {
    let (controller, log) = bound_controller();
    let (tx, rx) = unbounded();
    let event_loop = EventLoop::new(controller, rx);

    let handle = thread::spawn(move || event_loop.run());

    tx.send(ControlEvent::ToggleQuarterTone(PitchClass::E)).unwrap();
    tx.send(ControlEvent::ApplyPreset(&MAQAM_PRESETS[0])).unwrap();
    tx.send(ControlEvent::ResetTuning).unwrap();

    // Close the channel so that the event loop will exit.
    drop(tx);
    let controller = handle.join().expect("Event loop thread panicked");

    let mut e_flat = [0; 12];
    e_flat[4] = -50;
    let mut rast_do = e_flat;
    rast_do[11] = -50;

    assert_eq!(
        sent_bytes(&log),
        vec![
            encode_scale_tuning(&e_flat).to_vec(),
            encode_scale_tuning(&rast_do).to_vec(),
            encode_scale_tuning(&[0; 12]).to_vec(),
        ]
    );
    assert_eq!(controller.tuning().offsets(), &[0; 12]);
}

#[test]
fn integration_test_snapshot_reflects_prior_events() {
    let (controller, _log) = bound_controller();
    let (tx, rx) = unbounded();
    let handle = thread::spawn(move || EventLoop::new(controller, rx).run());

    tx.send(ControlEvent::ApplyPreset(&MAQAM_PRESETS[2])).unwrap();
    let (reply_tx, reply_rx) = bounded(1);
    tx.send(ControlEvent::Snapshot(reply_tx)).unwrap();
    let snapshot = reply_rx.recv().unwrap();

    // Rast Fa: A and E
    assert_eq!(snapshot.offsets, [0, 0, 0, 0, -50, 0, 0, 0, 0, -50, 0, 0]);
    assert_eq!(snapshot.selected_device.unwrap().id, "mock-1");
    assert_eq!(snapshot.devices.len(), 2);

    tx.send(ControlEvent::Shutdown).unwrap();
    handle.join().expect("Event loop thread panicked");
}

#[test]
fn integration_test_shutdown_stops_before_later_events() {
    let (controller, log) = bound_controller();
    let (tx, rx) = unbounded();

    tx.send(ControlEvent::ResetTuning).unwrap();
    tx.send(ControlEvent::Shutdown).unwrap();
    tx.send(ControlEvent::ResetTuning).unwrap();

    EventLoop::new(controller, rx).run();
    assert_eq!(sent_bytes(&log).len(), 1);
}

#[test]
fn integration_test_ribbon_moves_are_coalesced() {
    let (controller, log) = bound_controller();
    let (tx, rx) = unbounded();

    tx.send(ControlEvent::Ribbon(RibbonEvent::Start(50.0))).unwrap();
    for x in [60.0, 70.0, 80.0, 100.0] {
        tx.send(ControlEvent::Ribbon(RibbonEvent::Move(x))).unwrap();
    }
    tx.send(ControlEvent::Ribbon(RibbonEvent::End)).unwrap();
    drop(tx);

    EventLoop::new(controller, rx).run();

    assert_eq!(
        sent_bytes(&log),
        vec![
            vec![0xE0, 0x7F, 0x3F], // start at 50% -> 8191
            vec![0xE0, 0x7F, 0x7F], // only the last move survives
            vec![0xE0, 0x00, 0x40], // release
        ]
    );
}

#[test]
fn integration_test_coalescing_keeps_other_events_in_order() {
    let (controller, log) = bound_controller();
    let (tx, rx) = unbounded();

    tx.send(ControlEvent::Ribbon(RibbonEvent::Start(0.0))).unwrap();
    tx.send(ControlEvent::Ribbon(RibbonEvent::Move(10.0))).unwrap();
    tx.send(ControlEvent::Ribbon(RibbonEvent::Move(20.0))).unwrap();
    tx.send(ControlEvent::ProgramChange(7)).unwrap();
    tx.send(ControlEvent::Ribbon(RibbonEvent::Move(100.0))).unwrap();
    drop(tx);

    EventLoop::new(controller, rx).run();

    let sent = sent_bytes(&log);
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[1], vec![0xE0, 0x4C, 0x19]); // 20% -> 3276
    assert_eq!(sent[2], vec![0xC0, 7]);
    assert_eq!(sent[3], vec![0xE0, 0x7F, 0x7F]);
}

#[test]
fn integration_test_without_coalescing_every_sample_is_sent() {
    let (controller, log) = bound_controller();
    let (tx, rx) = unbounded();

    tx.send(ControlEvent::Ribbon(RibbonEvent::Start(50.0))).unwrap();
    for x in [60.0, 70.0, 80.0] {
        tx.send(ControlEvent::Ribbon(RibbonEvent::Move(x))).unwrap();
    }
    tx.send(ControlEvent::Ribbon(RibbonEvent::End)).unwrap();
    drop(tx);

    EventLoop::new(controller, rx).with_coalescing(false).run();
    assert_eq!(sent_bytes(&log).len(), 5);
}

#[test]
fn integration_test_unknown_device_drops_sends() {
    let (controller, log) = bound_controller();
    let (tx, rx) = unbounded();

    tx.send(ControlEvent::SelectDevice("gone".to_string())).unwrap();
    tx.send(ControlEvent::ToggleQuarterTone(PitchClass::B)).unwrap();
    tx.send(ControlEvent::SelectDevice("mock-2".to_string())).unwrap();
    tx.send(ControlEvent::ToggleQuarterTone(PitchClass::B)).unwrap();
    drop(tx);

    let controller = EventLoop::new(controller, rx).run();

    let sent = log.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "mock-2");
    assert_eq!(sent[0].1, encode_scale_tuning(&[0; 12]).to_vec());
    assert_eq!(controller.tuning().offsets(), &[0; 12]);
}

#[test]
fn integration_test_assistant_offsets_apply_as_preset() {
    let (controller, log) = bound_controller();
    let (tx, rx) = unbounded();

    tx.send(ControlEvent::ToggleQuarterTone(PitchClass::C)).unwrap();
    tx.send(ControlEvent::ApplyNoteOffsets(vec![
        ("D".to_string(), -50),
        ("Zz".to_string(), -50),
    ]))
    .unwrap();
    drop(tx);

    let controller = EventLoop::new(controller, rx).run();
    assert_eq!(
        controller.tuning().offsets(),
        &[0, 0, -50, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(sent_bytes(&log).len(), 2);
}
