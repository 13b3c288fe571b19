use crate::midi::OutputDevice;
use crate::notes::PitchClass;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Quarter-tone scale tuning over MIDI", long_about = None)]
pub struct Args {
    /// List available MIDI output devices
    #[arg(long)]
    pub device_list: bool,

    /// Bind to a specific MIDI output, by id or name
    #[arg(long)]
    pub bind_to_device: Option<String>,

    /// Apply a maqam preset, e.g. "Rast Do (C)"
    #[arg(long)]
    pub preset: Option<String>,

    /// Toggle a quarter-tone flat on these notes (C, C#, ... B or 0-11)
    #[arg(long, num_args = 1..)]
    pub toggle: Vec<PitchClass>,

    /// Reset every note to equal temperament
    #[arg(long)]
    pub reset: bool,

    /// Sweep the ribbon to this position (0-100), hold, then release
    #[arg(long, value_parser = parse_percent)]
    pub bend: Option<f32>,

    /// Send a program change
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..128))]
    pub program: Option<u8>,

    /// Ask the scale assistant and apply any tuning it suggests
    #[arg(long)]
    pub ask: Option<String>,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// True when any one-shot action was requested; otherwise the
    /// interactive menu runs.
    pub fn has_actions(&self) -> bool {
        self.preset.is_some()
            || !self.toggle.is_empty()
            || self.reset
            || self.bend.is_some()
            || self.program.is_some()
            || self.ask.is_some()
    }

    /// A device listing runs without reading the config file, so a broken
    /// file can't hide the available outputs.
    pub fn needs_settings(&self) -> bool {
        !self.device_list
    }
}

fn parse_percent(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside 0-100", value))
    }
}

pub fn validate_device(query: &str, devices: &[OutputDevice]) -> Result<(), String> {
    if !devices
        .iter()
        .any(|d| d.id == query || d.name.contains(query))
    {
        let mut error_msg = format!(
            "Error: Device '{}' not found in available devices:\n",
            query
        );
        for device in devices {
            error_msg.push_str(&format!("  - {} [{}]\n", device.name, device.id));
        }
        return Err(error_msg);
    }
    Ok(())
}
