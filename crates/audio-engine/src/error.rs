use std::result::Result as StdResult;

use thiserror::Error;

/// Result type for device switching.
pub type Result<T> = StdResult<T, SwitchError>;

/// A volume or mute operation could not be carried out.
///
/// This is a best-effort outcome, never a reason to stop the program: device
/// switching keeps working regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unavailable {
    /// The output volume could not be read or changed.
    #[error("Volume control is not available on this system.")]
    Volume,

    /// A relative change was requested but the current volume is unknown.
    #[error("Volume could not be adjusted because the current volume could not be determined.")]
    VolumeBaseline,

    /// The mute flag could not be read.
    #[error("Mute control is not available on this system.")]
    Mute,

    /// The mute flag was read but could not be changed.
    #[error("Mute state could not be toggled.")]
    MuteToggle,
}

/// No device matched a query, even after fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No matching device found for '{query}'.")]
pub struct NotFound {
    /// The name the user asked for.
    pub query: String,
    /// Every device that was available at the time.
    pub devices: Vec<String>,
}

/// Errors from switching the output device.
#[derive(Debug, Error)]
pub enum SwitchError {
    /// Nothing matched the query.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The backend failed to list or select devices.
    #[error(transparent)]
    Backend(#[from] audio_backend::Error),
}
