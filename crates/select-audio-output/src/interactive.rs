//! Arrow-key device picker with volume and mute shortcuts.

use std::{fmt, io::Write};

use audio_backend::AudioBackend;
use audio_engine::Controller;
use console::Term;
use tracing::debug;

use crate::{
    commands,
    error::{Error, Result},
    menu,
};

/// Step used by the increase and decrease entries.
const VOLUME_STEP: i64 = 10;

/// One line in the interactive menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Switch to this device.
    Device {
        /// Device name as reported by the backend.
        name: String,
        /// Whether this is the current output.
        active: bool,
    },
    /// Flip mute.
    ToggleMute,
    /// Print the current volume.
    ShowVolume,
    /// Raise volume by [`VOLUME_STEP`].
    VolumeUp,
    /// Lower volume by [`VOLUME_STEP`].
    VolumeDown,
    /// Prompt for an absolute volume.
    AdjustVolume,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device { name, active: true } => write!(f, "{name} (active)"),
            Self::Device { name, active: false } => f.write_str(name),
            Self::ToggleMute => f.write_str("-- Toggle mute --"),
            Self::ShowVolume => f.write_str("-- Show volume --"),
            Self::VolumeUp => write!(f, "-- Increase volume (+{VOLUME_STEP}%) --"),
            Self::VolumeDown => write!(f, "-- Decrease volume (-{VOLUME_STEP}%) --"),
            Self::AdjustVolume => f.write_str("-- Adjust volume... --"),
        }
    }
}

/// Build the menu: devices first, then whichever controls are usable.
pub fn entries(
    devices: Vec<String>,
    active: Option<&str>,
    mute_available: bool,
    volume_available: bool,
) -> Vec<Entry> {
    let mut entries: Vec<Entry> = devices
        .into_iter()
        .map(|name| {
            let active = active == Some(name.as_str());
            Entry::Device { name, active }
        })
        .collect();
    if mute_available {
        entries.push(Entry::ToggleMute);
    }
    if volume_available {
        entries.extend([
            Entry::ShowVolume,
            Entry::VolumeUp,
            Entry::VolumeDown,
            Entry::AdjustVolume,
        ]);
    }
    entries
}

/// Run the interactive picker on stdout.
pub fn run<B, W>(backend: &B, out: &mut W) -> Result<()>
where
    B: AudioBackend + ?Sized,
    W: Write,
{
    let term = Term::stdout();
    if !term.is_term() {
        return Err(Error::NotATerminal);
    }
    let devices = backend.list_output_devices()?;
    if devices.is_empty() {
        return Err(Error::NoDevices);
    }
    let active = backend.active_device()?;
    let controller = Controller::new(backend);
    let mute_available = controller.mute_state().is_ok();
    let volume_available = controller.volume().is_ok();
    debug!(mute_available, volume_available, "building menu");

    let entries = entries(devices, active.as_deref(), mute_available, volume_available);
    let labels: Vec<String> = entries.iter().map(ToString::to_string).collect();
    let choice = menu::select(&term, "Please select audio output device:", &labels)?;
    let Some(entry) = choice.and_then(|i| entries.get(i)) else {
        return Err(Error::Aborted);
    };
    out.flush()?;

    match entry {
        Entry::Device { name, .. } => commands::switch(backend, name, out),
        Entry::ToggleMute => commands::toggle_mute(backend, out),
        Entry::ShowVolume => commands::show_volume(backend, out),
        Entry::VolumeUp => commands::adjust_volume(backend, VOLUME_STEP, out),
        Entry::VolumeDown => commands::adjust_volume(backend, -VOLUME_STEP, out),
        Entry::AdjustVolume => match menu::prompt_volume(&term)? {
            Some(level) => commands::set_volume(backend, i64::from(level), out),
            None => Err(Error::Aborted),
        },
    }
}
