use super::{render_tuning, request_snapshot, sweep_ribbon};
use crate::assistant::{consult, Assistant};
use crate::config::Settings;
use crate::event_loop::ControlEvent;
use crate::notes::PitchClass;
use crate::presets::MAQAM_PRESETS;
use crossbeam::channel::Sender;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use log::info;
use std::error::Error;

const ACTIONS: [&str; 8] = [
    "Toggle quarter tone",
    "Apply preset",
    "Reset tuning",
    "Bend ribbon",
    "Program change",
    "Ask assistant",
    "Select output",
    "Quit",
];

/// Menu loop for an interactive session. Returns when the user quits or
/// the event loop goes away.
pub fn run_interactive(
    tx: &Sender<ControlEvent>,
    settings: &Settings,
    assistant: Option<&dyn Assistant>,
) -> Result<(), Box<dyn Error>> {
    let theme = ColorfulTheme::default();
    info!("Interactive session started");

    loop {
        let Some(snapshot) = request_snapshot(tx) else {
            break;
        };
        let output = snapshot
            .selected_device
            .as_ref()
            .map(|d| d.name.as_str())
            .unwrap_or("none");
        println!("\nOutput: {}\n{}\n", output, render_tuning(&snapshot.offsets));

        let action = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match action {
            0 => {
                let labels: Vec<String> = PitchClass::all()
                    .map(|pc| format!("{:<3} {:>4} cents", pc.label(), snapshot.offsets[pc.index()]))
                    .collect();
                let index = Select::with_theme(&theme)
                    .with_prompt("Note")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                if let Some(pc) = PitchClass::from_index(index) {
                    tx.send(ControlEvent::ToggleQuarterTone(pc))?;
                }
            }
            1 => {
                let names: Vec<String> = MAQAM_PRESETS
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.description))
                    .collect();
                let index = Select::with_theme(&theme)
                    .with_prompt("Preset")
                    .items(&names)
                    .default(0)
                    .interact()?;
                tx.send(ControlEvent::ApplyPreset(&MAQAM_PRESETS[index]))?;
            }
            2 => tx.send(ControlEvent::ResetTuning)?,
            3 => {
                let target: f32 = Input::with_theme(&theme)
                    .with_prompt("Ribbon position (0-100)")
                    .default(75.0)
                    .validate_with(|v: &f32| {
                        if (0.0..=100.0).contains(v) {
                            Ok(())
                        } else {
                            Err("position must be within 0-100")
                        }
                    })
                    .interact_text()?;
                sweep_ribbon(tx, target, settings)?;
            }
            4 => {
                let program: u8 = Input::with_theme(&theme)
                    .with_prompt("Program (0-127)")
                    .validate_with(|v: &u8| {
                        if *v < 128 {
                            Ok(())
                        } else {
                            Err("program must be within 0-127")
                        }
                    })
                    .interact_text()?;
                tx.send(ControlEvent::ProgramChange(program))?;
            }
            5 => match assistant {
                Some(assistant) => ask_assistant(tx, &theme, assistant)?,
                None => println!("No assistant configured (set assistant_command)."),
            },
            6 => {
                if snapshot.devices.is_empty() {
                    println!("No MIDI outputs available.");
                    continue;
                }
                let names: Vec<&str> = snapshot.devices.iter().map(|d| d.name.as_str()).collect();
                let index = Select::with_theme(&theme)
                    .with_prompt("Output")
                    .items(&names)
                    .default(0)
                    .interact()?;
                tx.send(ControlEvent::SelectDevice(snapshot.devices[index].id.clone()))?;
            }
            _ => break,
        }
    }

    info!("Interactive session finished");
    Ok(())
}

fn ask_assistant(
    tx: &Sender<ControlEvent>,
    theme: &ColorfulTheme,
    assistant: &dyn Assistant,
) -> Result<(), Box<dyn Error>> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Scale help")
        .allow_empty(true)
        .interact_text()?;
    let suggestion = consult(assistant, &query);
    if !suggestion.text.is_empty() {
        println!("\n{}\n", suggestion.text.trim());
    }

    if let Some(tunings) = suggestion.tunings {
        let apply = Confirm::with_theme(theme)
            .with_prompt("Apply the suggested tuning?")
            .default(true)
            .interact()?;
        if apply {
            tx.send(ControlEvent::ApplyNoteOffsets(tunings))?;
        }
    }
    Ok(())
}
