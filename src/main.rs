use clap::Parser;
use crossbeam::channel::{unbounded, Sender};
use maqamctl::{
    assistant::{consult, Assistant, CommandAssistant},
    cli::{validate_device, Args},
    config::Settings,
    find_preset, logging,
    midi::{DefaultMidiEngine, MidiEngine, OutputDevice},
    ui::{render_tuning, request_snapshot, run_interactive, sweep_ribbon},
    ControlEvent, Controller, DeviceSelection, EventLoop, TransportAdapter,
};
use std::error::Error;
use std::thread;

fn main() {
    let args = parse_command_line_arguments();
    initialize_logging(args.verbose);

    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn initialize_logging(verbose: bool) {
    if let Err(e) = logging::init_logger(verbose) {
        eprintln!("Logging disabled: {}", e);
    }
    log::info!("Application starting");
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    // Capability and access failures are the only errors the user sees.
    let engine = DefaultMidiEngine::new()?;
    let mut transport = TransportAdapter::new(engine);
    let devices = transport.initialize()?.to_vec();

    if !args.needs_settings() {
        list_available_devices(&devices);
        return Ok(());
    }

    let settings = load_settings(&args)?;
    bind_output(&mut transport, &args, &settings)?;

    let controller = Controller::new(transport, settings.channel());
    let (tx, rx) = unbounded();
    let event_loop = EventLoop::new(controller, rx).with_coalescing(settings.coalesce_ribbon_moves);
    let handle = thread::spawn(move || {
        event_loop.run();
    });

    let assistant = settings
        .assistant_command
        .as_deref()
        .and_then(CommandAssistant::from_command_line);
    let assistant = assistant.as_ref().map(|a| a as &dyn Assistant);

    let result = if args.has_actions() {
        run_actions(&tx, &args, &settings, assistant)
    } else {
        run_interactive(&tx, &settings, assistant)
    };

    let _ = tx.send(ControlEvent::Shutdown);
    if handle.join().is_err() {
        log::error!("Event loop thread panicked");
    }
    result
}

fn load_settings(args: &Args) -> Result<Settings, Box<dyn Error>> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(device) = &args.bind_to_device {
        settings.output_device = Some(device.clone());
    }
    Ok(settings)
}

fn list_available_devices(devices: &[OutputDevice]) {
    println!("Available MIDI outputs:");
    for device in devices {
        println!("  - {} [{}]", device.name, device.id);
    }
}

/// Binds the configured output, or the first one when none is configured.
fn bind_output<E: MidiEngine>(
    transport: &mut TransportAdapter<E>,
    args: &Args,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    let selection = match &settings.output_device {
        Some(query) => {
            // An explicit --bind-to-device must exist; a configured default
            // falls back to idle.
            if args.bind_to_device.is_some() {
                validate_device(query, transport.list_devices())?;
            }
            let id = transport.resolve(query).map(str::to_string);
            id.map(|id| transport.select_device(&id))
        }
        None => transport.select_first(),
    };

    match selection {
        Some(DeviceSelection::Bound(device)) => {
            log::info!("Successfully connected to MIDI output: {}", device.name);
            println!("Output: {}", device.name);
        }
        Some(DeviceSelection::Unresolved(id)) => {
            log::warn!("Output '{}' unavailable, running without output", id);
        }
        None => {
            log::info!("No MIDI output selected");
            println!("No MIDI output selected; messages will not be sent.");
        }
    }
    Ok(())
}

fn run_actions(
    tx: &Sender<ControlEvent>,
    args: &Args,
    settings: &Settings,
    assistant: Option<&dyn Assistant>,
) -> Result<(), Box<dyn Error>> {
    if args.reset {
        tx.send(ControlEvent::ResetTuning)?;
    }

    if let Some(name) = &args.preset {
        let preset = find_preset(name).ok_or_else(|| format!("Unknown preset '{}'", name))?;
        tx.send(ControlEvent::ApplyPreset(preset))?;
    }

    if let Some(query) = &args.ask {
        let assistant = assistant.ok_or("No assistant configured (set assistant_command)")?;
        let suggestion = consult(assistant, query);
        println!("{}", suggestion.text.trim());
        if let Some(tunings) = suggestion.tunings {
            tx.send(ControlEvent::ApplyNoteOffsets(tunings))?;
        }
    }

    for pc in &args.toggle {
        tx.send(ControlEvent::ToggleQuarterTone(*pc))?;
    }

    if let Some(program) = args.program {
        tx.send(ControlEvent::ProgramChange(program))?;
    }

    if let Some(target) = args.bend {
        sweep_ribbon(tx, target, settings)?;
    }

    if let Some(snapshot) = request_snapshot(tx) {
        println!("{}", render_tuning(&snapshot.offsets));
    }
    Ok(())
}
