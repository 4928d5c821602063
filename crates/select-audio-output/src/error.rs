//! Error handling for the select-audio-output binary.

use std::{io, result};

use audio_engine::{NotFound, SwitchError, Unavailable};
use thiserror::Error;

/// Convenient result type for command execution.
pub type Result<T> = result::Result<T, Error>;

/// Trailer printed after any volume or mute failure.
const UNAVAILABLE_TRAILER: &str = "Additional permissions may be required.\n\
     The device switching functionality is not affected and continues to work.";

/// Errors that end a run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum Error {
    /// The audio backend failed outright.
    #[error(transparent)]
    Backend(#[from] audio_backend::Error),

    /// No device matched the requested name.
    #[error("{}", not_found_message(.0))]
    NotFound(#[from] NotFound),

    /// A volume or mute capability was required but is missing.
    #[error("{0}\n{trailer}", trailer = UNAVAILABLE_TRAILER)]
    Unavailable(#[from] Unavailable),

    /// The current output device could not be determined.
    #[error("Error determining the current device")]
    CurrentDeviceUnknown,

    /// Interactive mode found nothing to offer.
    #[error("No audio output devices found.")]
    NoDevices,

    /// The user backed out of an interactive prompt.
    #[error("Aborted.")]
    Aborted,

    /// Interactive mode was requested without a terminal on stdout.
    #[error("Interactive mode requires a terminal")]
    NotATerminal,

    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<SwitchError> for Error {
    fn from(err: SwitchError) -> Self {
        match err {
            SwitchError::NotFound(nf) => Self::NotFound(nf),
            SwitchError::Backend(e) => Self::Backend(e),
        }
    }
}

/// Render a [`NotFound`] along with the devices that were available.
fn not_found_message(nf: &NotFound) -> String {
    let mut msg = format!("{nf}\n\nAvailable devices:");
    for device in &nf.devices {
        msg.push_str("\n  • ");
        msg.push_str(device);
    }
    msg
}
