//! Command-line interface definitions for select-audio-output.

use audio_backend::{BackendConfig, DEFAULT_OSASCRIPT, DEFAULT_SWITCH_AUDIO_SOURCE};
use clap::{Args, Parser};
use logging::LogArgs;

/// Command-line interface for the `select-audio-output` binary.
#[derive(Parser, Debug)]
#[command(
    name = "select-audio-output",
    about = "Select a macOS audio output device by name and control volume settings.",
    version
)]
pub struct Cli {
    /// Interactive mode: Selection using arrow keys
    #[arg(short, long)]
    pub interactive: bool,

    /// Shows the current audio output device
    #[arg(short, long)]
    pub current: bool,

    /// Toggles mute/unmute
    #[arg(short = 'm', long)]
    pub toggle_mute: bool,

    /// Shows the current volume level
    #[arg(short, long)]
    pub get_volume: bool,

    /// Sets the volume to a specific level (0-100)
    #[arg(short, long, value_name = "LEVEL", allow_negative_numbers = true)]
    pub volume: Option<i64>,

    /// Increases the volume by a specific amount
    #[arg(short = 'u', long, value_name = "AMOUNT", allow_negative_numbers = true)]
    pub volume_up: Option<i64>,

    /// Decreases the volume by a specific amount
    #[arg(short = 'd', long, value_name = "AMOUNT", allow_negative_numbers = true)]
    pub volume_down: Option<i64>,

    /// Name of the audio output device. If omitted, lists available devices.
    #[arg(value_name = "DEVICE")]
    pub device: Option<String>,

    /// Locations of the external audio tools.
    #[command(flatten)]
    pub tools: ToolArgs,

    /// Logging controls shared across our binaries.
    #[command(flatten)]
    pub log: LogArgs,
}

/// Paths to the programs the macOS backend drives.
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// SwitchAudioSource executable used to list and select devices
    #[arg(
        long,
        env = "SWITCH_AUDIO_SOURCE",
        default_value = DEFAULT_SWITCH_AUDIO_SOURCE,
        value_name = "PATH"
    )]
    pub switch_audio_source: String,

    /// osascript executable used for volume and mute
    #[arg(long, env = "OSASCRIPT", default_value = DEFAULT_OSASCRIPT, value_name = "PATH")]
    pub osascript: String,
}

impl ToolArgs {
    /// Backend configuration for these paths.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            switch_audio_source: self.switch_audio_source.clone(),
            osascript: self.osascript.clone(),
        }
    }
}

/// The single operation an invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the current volume.
    GetVolume,
    /// Set an absolute volume.
    SetVolume(i64),
    /// Change the volume by a signed amount.
    AdjustVolume(i64),
    /// Toggle mute.
    ToggleMute,
    /// Print the current device.
    Current,
    /// Arrow-key selection.
    Interactive,
    /// Switch to a device by name.
    Switch(String),
    /// List devices.
    List,
}

impl Cli {
    /// Pick the action to run. When several flags are given the first in
    /// this order wins: get-volume, volume, volume-up, volume-down,
    /// toggle-mute, current, interactive, device.
    pub fn action(&self) -> Action {
        if self.get_volume {
            Action::GetVolume
        } else if let Some(level) = self.volume {
            Action::SetVolume(level)
        } else if let Some(amount) = self.volume_up {
            Action::AdjustVolume(amount)
        } else if let Some(amount) = self.volume_down {
            Action::AdjustVolume(amount.saturating_neg())
        } else if self.toggle_mute {
            Action::ToggleMute
        } else if self.current {
            Action::Current
        } else if self.interactive {
            Action::Interactive
        } else if let Some(name) = &self.device {
            Action::Switch(name.clone())
        } else {
            Action::List
        }
    }
}
