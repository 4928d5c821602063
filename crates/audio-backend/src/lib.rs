#![warn(missing_docs)]

//! Audio output backend for select-audio-output.
//!
//! This crate owns every interaction with the operating system's audio
//! facilities. It exposes a minimal, stable API:
//! - [`AudioBackend`]: the capability set the engine needs (enumerate, query
//!   and select output devices; read and change volume and mute)
//! - [`MacBackend`]: the macOS implementation, driving `SwitchAudioSource`
//!   for devices and `osascript` for volume and mute
//! - [`first_success`]: ordered fallback across equivalent command dialects
//!
//! Device calls are the must-work path: failure to start the device tool is
//! reported as [`Error::BackendUnavailable`]. Volume and mute are best-effort
//! and report [`Error::Unsupported`] once every dialect has been exhausted.
//!
//! Enable the `test-utils` feature for [`mock::MockBackend`] and
//! [`mock::ScriptedRunner`].

mod dialect;
mod error;
mod macos;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
mod runner;
mod volume;

pub use dialect::first_success;
pub use error::{Capability, Error, Result};
pub use macos::{BackendConfig, DEFAULT_OSASCRIPT, DEFAULT_SWITCH_AUDIO_SOURCE, MacBackend};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use volume::VolumeLevel;

/// Capability set required from an operating system audio facility.
///
/// Implementations are synchronous: every call blocks until the underlying
/// tool has produced a result.
pub trait AudioBackend {
    /// Enumerate output devices in the order the OS reports them.
    fn list_output_devices(&self) -> Result<Vec<String>>;

    /// The currently selected output device, or `None` if it cannot be determined.
    fn active_device(&self) -> Result<Option<String>>;

    /// Make `name` the active output device.
    fn select_device(&self, name: &str) -> Result<()>;

    /// Current output volume.
    fn volume(&self) -> Result<VolumeLevel>;

    /// Set the output volume.
    fn set_volume(&self, level: VolumeLevel) -> Result<()>;

    /// Current output mute flag (`true` = muted).
    fn muted(&self) -> Result<bool>;

    /// Set the output mute flag.
    fn set_muted(&self, muted: bool) -> Result<()>;
}
