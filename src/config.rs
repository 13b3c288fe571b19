// config.rs

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File, FileFormat};
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "MAQAMCTL";

pub const DEFAULT_PITCH_BEND_CHANNEL: u8 = 0;
pub const DEFAULT_RIBBON_STEPS: u32 = 16;
pub const DEFAULT_RIBBON_STEP_MS: u64 = 15;
pub const DEFAULT_RIBBON_HOLD_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Output to bind at startup, by id or name fragment
    pub output_device: Option<String>,
    pub pitch_bend_channel: u8,
    pub coalesce_ribbon_moves: bool,
    /// Samples sent while sweeping the ribbon from the command line
    pub ribbon_steps: u32,
    pub ribbon_step_ms: u64,
    /// How long a swept bend is held before release
    pub ribbon_hold_ms: u64,
    /// External program used as the scale assistant
    pub assistant_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_device: None,
            pitch_bend_channel: DEFAULT_PITCH_BEND_CHANNEL,
            coalesce_ribbon_moves: true,
            ribbon_steps: DEFAULT_RIBBON_STEPS,
            ribbon_step_ms: DEFAULT_RIBBON_STEP_MS,
            ribbon_hold_ms: DEFAULT_RIBBON_HOLD_MS,
            assistant_command: None,
        }
    }
}

impl Settings {
    /// `$HOME/.config/maqamctl/config.toml`, if HOME is set.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("maqamctl")
                .join("config.toml")
        })
    }

    /// Defaults, then the TOML file at `path` (or the default path) if it
    /// exists, then `MAQAMCTL_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        match path {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    debug!("Looking for settings at {}", path.display());
                    builder = builder.add_source(
                        File::from(path.as_path())
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }

    /// Parses settings from a TOML string on top of the defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::builder_with_defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            .set_default("pitch_bend_channel", i64::from(defaults.pitch_bend_channel))?
            .set_default("coalesce_ribbon_moves", defaults.coalesce_ribbon_moves)?
            .set_default("ribbon_steps", i64::from(defaults.ribbon_steps))?
            .set_default("ribbon_step_ms", defaults.ribbon_step_ms as i64)?
            .set_default("ribbon_hold_ms", defaults.ribbon_hold_ms as i64)
    }

    pub fn channel(&self) -> u8 {
        self.pitch_bend_channel & 0x0F
    }
}
